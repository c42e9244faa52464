//! # Section Catalog
//!
//! Starter shapes offered by "add section". Each template builds a brand-new
//! `Section` on every call, so instances never share state with the table
//! or with each other.

use crate::registry::default_block;
use folio_model::{
    Align, Block, BlockKind, ButtonBlock, Column, ColumnSpan, ContentShape, HeadingBlock, ListBlock, Row, Section,
    VAlign,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Catalog entry
#[derive(Debug)]
pub struct SectionTemplate {
    pub key: &'static str,
    pub label_en: &'static str,
    pub label_ar: &'static str,
    build: fn() -> Section,
}

impl SectionTemplate {
    /// Fresh section with this template's shape
    pub fn instantiate(&self) -> Section {
        (self.build)()
    }

    /// Content list this template's sections use
    pub fn shape(&self) -> ContentShape {
        self.instantiate().content_shape()
    }
}

pub static CATALOG: &[SectionTemplate] = &[
    SectionTemplate {
        key: "hero",
        label_en: "Hero",
        label_ar: "واجهة رئيسية",
        build: hero,
    },
    SectionTemplate {
        key: "two-column",
        label_en: "Two columns",
        label_ar: "عمودان",
        build: two_column,
    },
    SectionTemplate {
        key: "three-column",
        label_en: "Three columns",
        label_ar: "ثلاثة أعمدة",
        build: three_column,
    },
    SectionTemplate {
        key: "features",
        label_en: "Feature grid",
        label_ar: "شبكة المزايا",
        build: features,
    },
    SectionTemplate {
        key: "cta-banner",
        label_en: "Call to action",
        label_ar: "دعوة لاتخاذ إجراء",
        build: cta_banner,
    },
    SectionTemplate {
        key: "rich-text",
        label_en: "Rich text",
        label_ar: "نص منسق",
        build: rich_text,
    },
    SectionTemplate {
        key: "gallery",
        label_en: "Image gallery",
        label_ar: "معرض الصور",
        build: gallery,
    },
    SectionTemplate {
        key: "video",
        label_en: "Video",
        label_ar: "فيديو",
        build: video,
    },
    SectionTemplate {
        key: "custom-grid",
        label_en: "Custom grid",
        label_ar: "شبكة مخصصة",
        build: custom_grid,
    },
];

pub fn templates() -> &'static [SectionTemplate] {
    CATALOG
}

pub fn find_template(key: &str) -> Option<&'static SectionTemplate> {
    CATALOG.iter().find(|t| t.key == key)
}

/// New section from the template named `key`
pub fn instantiate(key: &str) -> Option<Section> {
    find_template(key).map(SectionTemplate::instantiate)
}

/// Shape a section keeps for its whole life.
///
/// A section with content uses whichever list it holds. An emptied section
/// falls back to its template's shape; only keys outside the catalog stay
/// open to either list.
pub fn section_shape(section: &Section) -> ContentShape {
    match section.content_shape() {
        ContentShape::Empty => find_template(&section.key).map_or(ContentShape::Empty, SectionTemplate::shape),
        shape => shape,
    }
}

fn style(background: &str, padding: &str) -> Map<String, Value> {
    let value = json!({
        "background": background,
        "container": "default",
        "padding": padding,
        "dividerTop": false,
        "dividerBottom": false,
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn blocks(kinds: &[BlockKind]) -> Vec<Arc<Block>> {
    kinds.iter().map(|kind| Arc::new(default_block(*kind))).collect()
}

fn heading(level: u8) -> Arc<Block> {
    Arc::new(Block::Heading(HeadingBlock {
        level,
        text_en: String::new(),
        text_ar: String::new(),
    }))
}

fn column(span: ColumnSpan, blocks: Vec<Arc<Block>>) -> Arc<Column> {
    Arc::new(Column::new(span).with_blocks(blocks))
}

/// Row of `count` even columns, each filled by `fill`
fn even_row(count: u8, fill: impl Fn() -> Vec<Arc<Block>>) -> Arc<Row> {
    let columns = (0..count).map(|_| column(ColumnSpan::even(count), fill())).collect();
    Arc::new(Row::new(columns))
}

fn section(key: &str, style: Map<String, Value>) -> Section {
    Section {
        style,
        ..Section::new(key)
    }
}

fn hero() -> Section {
    let content = Column {
        align: Align::Center,
        v_align: VAlign::Center,
        ..Column::new(ColumnSpan::even(1))
    }
    .with_blocks(vec![
        heading(1),
        Arc::new(default_block(BlockKind::Paragraph)),
        Arc::new(default_block(BlockKind::Button)),
    ]);

    section("hero", style("image", "xl")).with_rows(vec![Arc::new(Row::new(vec![Arc::new(content)]))])
}

fn two_column() -> Section {
    let media = column(ColumnSpan::half(), blocks(&[BlockKind::Image]));
    let text = column(ColumnSpan::half(), vec![heading(2), Arc::new(default_block(BlockKind::Paragraph))]);
    section("two-column", style("none", "lg")).with_rows(vec![Arc::new(Row::new(vec![media, text]))])
}

fn three_column() -> Section {
    let row = even_row(3, || vec![heading(3), Arc::new(default_block(BlockKind::Paragraph))]);
    section("three-column", style("none", "lg")).with_rows(vec![row])
}

fn features() -> Section {
    let intro = column(ColumnSpan::even(1), vec![heading(2)]);
    let grid = even_row(3, || blocks(&[BlockKind::IconFeature]));
    section("features", style("muted", "lg")).with_rows(vec![Arc::new(Row::new(vec![intro])), grid])
}

fn cta_banner() -> Section {
    let button = Block::Button(ButtonBlock {
        label_en: "Contact us".to_string(),
        label_ar: "تواصل معنا".to_string(),
        href: "/contact".to_string(),
        variant: "primary".to_string(),
        new_tab: false,
    });
    section("cta-banner", style("primary", "md")).with_blocks(vec![
        heading(2),
        Arc::new(default_block(BlockKind::Paragraph)),
        Arc::new(button),
    ])
}

fn rich_text() -> Section {
    let list = Block::List(ListBlock {
        ordered: false,
        items_en: vec![String::new()],
        items_ar: vec![String::new()],
    });
    section("rich-text", style("none", "md")).with_blocks(vec![
        heading(2),
        Arc::new(default_block(BlockKind::Paragraph)),
        Arc::new(list),
    ])
}

fn gallery() -> Section {
    let row = even_row(3, || blocks(&[BlockKind::Image]));
    section("gallery", style("none", "md")).with_rows(vec![row])
}

fn video() -> Section {
    section("video", style("dark", "lg")).with_blocks(blocks(&[BlockKind::Heading, BlockKind::Video]))
}

fn custom_grid() -> Section {
    section("custom-grid", style("none", "md")).with_rows(vec![even_row(1, Vec::new)])
}
