//! Content blocks
//!
//! A block is the leaf of the layout tree. Blocks carry no identifier; they are
//! addressed by their index inside the owning column or section.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content block, tagged on the wire by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    Heading(HeadingBlock),
    Paragraph(ParagraphBlock),
    Image(ImageBlock),
    Video(VideoBlock),
    List(ListBlock),
    Quote(QuoteBlock),
    Button(ButtonBlock),
    IconFeature(IconFeatureBlock),
    Embed(EmbedBlock),
    Divider(DividerBlock),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading(_) => BlockKind::Heading,
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::Image(_) => BlockKind::Image,
            Block::Video(_) => BlockKind::Video,
            Block::List(_) => BlockKind::List,
            Block::Quote(_) => BlockKind::Quote,
            Block::Button(_) => BlockKind::Button,
            Block::IconFeature(_) => BlockKind::IconFeature,
            Block::Embed(_) => BlockKind::Embed,
            Block::Divider(_) => BlockKind::Divider,
        }
    }
}

/// `<h1>`..`<h6>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingBlock {
    #[serde(default = "default_heading_level")]
    pub level: u8,
    #[serde(rename = "textEN", default)]
    pub text_en: String,
    #[serde(rename = "textAR", default)]
    pub text_ar: String,
}

fn default_heading_level() -> u8 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    #[serde(rename = "textEN", default)]
    pub text_en: String,
    #[serde(rename = "textAR", default)]
    pub text_ar: String,
}

/// Image stored in the media service, referenced by its public id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(rename = "publicId", default)]
    pub public_id: String,
    #[serde(rename = "altEN", default)]
    pub alt_en: String,
    #[serde(rename = "altAR", default)]
    pub alt_ar: String,
    #[serde(rename = "captionEN", default)]
    pub caption_en: String,
    #[serde(rename = "captionAR", default)]
    pub caption_ar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoBlock {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "captionEN", default)]
    pub caption_en: String,
    #[serde(rename = "captionAR", default)]
    pub caption_ar: String,
}

/// Bullet or numbered list; both languages keep their own item arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListBlock {
    #[serde(default)]
    pub ordered: bool,
    #[serde(rename = "itemsEN", default)]
    pub items_en: Vec<String>,
    #[serde(rename = "itemsAR", default)]
    pub items_ar: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBlock {
    #[serde(rename = "textEN", default)]
    pub text_en: String,
    #[serde(rename = "textAR", default)]
    pub text_ar: String,
    #[serde(rename = "citeEN", default)]
    pub cite_en: String,
    #[serde(rename = "citeAR", default)]
    pub cite_ar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonBlock {
    #[serde(rename = "labelEN", default)]
    pub label_en: String,
    #[serde(rename = "labelAR", default)]
    pub label_ar: String,
    #[serde(default)]
    pub href: String,
    /// Visual style name (`primary`, `secondary`, `link`)
    #[serde(default = "default_button_variant")]
    pub variant: String,
    #[serde(rename = "newTab", default)]
    pub new_tab: bool,
}

fn default_button_variant() -> String {
    "primary".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconFeatureBlock {
    /// Icon name from the site's icon set
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "titleEN", default)]
    pub title_en: String,
    #[serde(rename = "titleAR", default)]
    pub title_ar: String,
    #[serde(rename = "textEN", default)]
    pub text_en: String,
    #[serde(rename = "textAR", default)]
    pub text_ar: String,
}

/// Third-party iframe (maps, forms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedBlock {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_embed_height")]
    pub height: u32,
}

fn default_embed_height() -> u32 {
    400
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividerBlock {}

/// Closed set of block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    Image,
    Video,
    List,
    Quote,
    Button,
    IconFeature,
    Embed,
    Divider,
}

impl BlockKind {
    pub const ALL: [BlockKind; 10] = [
        BlockKind::Heading,
        BlockKind::Paragraph,
        BlockKind::Image,
        BlockKind::Video,
        BlockKind::List,
        BlockKind::Quote,
        BlockKind::Button,
        BlockKind::IconFeature,
        BlockKind::Embed,
        BlockKind::Divider,
    ];

    /// Wire tag, identical to the serde `type` value
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Image => "image",
            BlockKind::Video => "video",
            BlockKind::List => "list",
            BlockKind::Quote => "quote",
            BlockKind::Button => "button",
            BlockKind::IconFeature => "icon-feature",
            BlockKind::Embed => "embed",
            BlockKind::Divider => "divider",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown block tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlockKind(pub String);

impl fmt::Display for UnknownBlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block type '{}'", self.0)
    }
}

impl std::error::Error for UnknownBlockKind {}

impl FromStr for BlockKind {
    type Err = UnknownBlockKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownBlockKind(s.to_string()))
    }
}
