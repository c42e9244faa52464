use super::files::print_json;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::registry::REGISTRY;
use folio_editor::templates;
use folio_model::ContentShape;

#[derive(Args, Debug)]
pub struct NewSectionArgs {
    /// Template key (see `folio catalog`)
    pub key: String,
}

/// List section templates
pub fn catalog() -> Result<()> {
    println!("{}", "Section templates".bright_blue().bold());
    for template in templates() {
        let section = template.instantiate();
        let shape = match section.content_shape() {
            ContentShape::Rows => format!("{} row(s)", section.rows.len()),
            ContentShape::Blocks => format!("{} block(s)", section.blocks.len()),
            ContentShape::Empty => "empty".to_string(),
        };
        println!(
            "  {:<14} {} / {}  {}",
            template.key.green(),
            template.label_en,
            template.label_ar,
            shape.dimmed()
        );
    }
    Ok(())
}

/// Print a freshly instantiated section
pub fn new_section(args: NewSectionArgs) -> Result<()> {
    let section = folio_editor::instantiate(&args.key)
        .ok_or_else(|| anyhow::anyhow!("Unknown section template: {} (see `folio catalog`)", args.key))?;
    print_json(&section)
}

/// List block kinds
pub fn blocks() -> Result<()> {
    println!("{}", "Block kinds".bright_blue().bold());
    for spec in REGISTRY.iter() {
        println!("  {:<14} {} / {}", spec.kind.as_str().green(), spec.label_en, spec.label_ar);
    }
    Ok(())
}
