//! # Block Registry
//!
//! One entry per [`BlockKind`], holding its catalog label and the
//! constructor for its default payload. Every block the editor adds comes
//! from [`default_block`], so a new block is well-formed from the start.

use folio_model::{
    Block, BlockKind, ButtonBlock, DividerBlock, EmbedBlock, HeadingBlock, IconFeatureBlock, ImageBlock, ListBlock,
    ParagraphBlock, QuoteBlock, VideoBlock,
};
use thiserror::Error;

/// Registry entry
#[derive(Debug)]
pub struct BlockSpec {
    pub kind: BlockKind,
    pub label_en: &'static str,
    pub label_ar: &'static str,
    construct: fn() -> Block,
}

impl BlockSpec {
    pub fn construct(&self) -> Block {
        (self.construct)()
    }
}

/// Indexed by `BlockKind as usize`
pub static REGISTRY: [BlockSpec; 10] = [
    BlockSpec {
        kind: BlockKind::Heading,
        label_en: "Heading",
        label_ar: "عنوان",
        construct: || {
            Block::Heading(HeadingBlock {
                level: 2,
                text_en: String::new(),
                text_ar: String::new(),
            })
        },
    },
    BlockSpec {
        kind: BlockKind::Paragraph,
        label_en: "Paragraph",
        label_ar: "فقرة",
        construct: || {
            Block::Paragraph(ParagraphBlock {
                text_en: String::new(),
                text_ar: String::new(),
            })
        },
    },
    BlockSpec {
        kind: BlockKind::Image,
        label_en: "Image",
        label_ar: "صورة",
        construct: || {
            Block::Image(ImageBlock {
                public_id: String::new(),
                alt_en: String::new(),
                alt_ar: String::new(),
                caption_en: String::new(),
                caption_ar: String::new(),
            })
        },
    },
    BlockSpec {
        kind: BlockKind::Video,
        label_en: "Video",
        label_ar: "فيديو",
        construct: || {
            Block::Video(VideoBlock {
                url: String::new(),
                caption_en: String::new(),
                caption_ar: String::new(),
            })
        },
    },
    BlockSpec {
        kind: BlockKind::List,
        label_en: "List",
        label_ar: "قائمة",
        construct: || {
            Block::List(ListBlock {
                ordered: false,
                items_en: vec![String::new()],
                items_ar: vec![String::new()],
            })
        },
    },
    BlockSpec {
        kind: BlockKind::Quote,
        label_en: "Quote",
        label_ar: "اقتباس",
        construct: || {
            Block::Quote(QuoteBlock {
                text_en: String::new(),
                text_ar: String::new(),
                cite_en: String::new(),
                cite_ar: String::new(),
            })
        },
    },
    BlockSpec {
        kind: BlockKind::Button,
        label_en: "Button",
        label_ar: "زر",
        construct: || {
            Block::Button(ButtonBlock {
                label_en: "Learn more".to_string(),
                label_ar: "اعرف المزيد".to_string(),
                href: "/".to_string(),
                variant: "primary".to_string(),
                new_tab: false,
            })
        },
    },
    BlockSpec {
        kind: BlockKind::IconFeature,
        label_en: "Icon feature",
        label_ar: "ميزة بأيقونة",
        construct: || {
            Block::IconFeature(IconFeatureBlock {
                icon: "star".to_string(),
                title_en: String::new(),
                title_ar: String::new(),
                text_en: String::new(),
                text_ar: String::new(),
            })
        },
    },
    BlockSpec {
        kind: BlockKind::Embed,
        label_en: "Embed",
        label_ar: "تضمين",
        construct: || {
            Block::Embed(EmbedBlock {
                url: String::new(),
                height: 400,
            })
        },
    },
    BlockSpec {
        kind: BlockKind::Divider,
        label_en: "Divider",
        label_ar: "فاصل",
        construct: || Block::Divider(DividerBlock {}),
    },
];

pub fn spec(kind: BlockKind) -> &'static BlockSpec {
    &REGISTRY[kind as usize]
}

/// Well-formed default block of `kind`
pub fn default_block(kind: BlockKind) -> Block {
    spec(kind).construct()
}

/// Structural defect in a block payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("heading level {0} is outside 1..=6")]
    HeadingLevel(u8),

    #[error("list has no {0} items")]
    EmptyList(&'static str),

    #[error("button has no style variant")]
    MissingVariant,

    #[error("embed height must be positive")]
    ZeroHeight,
}

/// Required-shape check for a block payload.
///
/// Text fields may be empty while an editor is still writing; this only
/// rejects payloads the public renderer cannot lay out.
pub fn shape_check(block: &Block) -> Result<(), ShapeError> {
    match block {
        Block::Heading(heading) if !(1..=6).contains(&heading.level) => Err(ShapeError::HeadingLevel(heading.level)),
        Block::List(list) if list.items_en.is_empty() => Err(ShapeError::EmptyList("English")),
        Block::List(list) if list.items_ar.is_empty() => Err(ShapeError::EmptyList("Arabic")),
        Block::Button(button) if button.variant.trim().is_empty() => Err(ShapeError::MissingVariant),
        Block::Embed(embed) if embed.height == 0 => Err(ShapeError::ZeroHeight),
        _ => Ok(()),
    }
}
