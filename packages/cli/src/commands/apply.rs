use super::files::{print_json, read_json, read_menu, resolve, DocumentFile};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{DispatchResult, EditorError, LayoutMutation, NavEditor, NavMutation, PageEditor};
use folio_model::PageDocument;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Menu or page file, or a name under the data directory
    pub input: String,

    /// JSON array of operations
    pub ops: PathBuf,

    /// Treat the input as a page layout instead of a menu
    #[arg(short, long)]
    pub page: bool,

    /// Validate and write the result back instead of printing it
    #[arg(short, long)]
    pub write: bool,
}

pub fn apply(args: ApplyArgs, config: &Config, cwd: &Path) -> Result<()> {
    if args.page {
        apply_page(args, config, cwd)
    } else {
        apply_menu(args, config, cwd)
    }
}

fn apply_menu(args: ApplyArgs, config: &Config, cwd: &Path) -> Result<()> {
    let path = resolve(&args.input, "menus", config, cwd);
    let ops: Vec<NavMutation> = read_json(&args.ops)?;
    let mut editor = NavEditor::open(read_menu(&path)?, &config.editor());
    info!(menu = %editor.menu().name, ops = ops.len(), "Applying operations");

    for (index, op) in ops.into_iter().enumerate() {
        let name = op.name();
        report(index, name, editor.dispatch(op))?;
    }

    if !args.write {
        return print_json(editor.menu());
    }
    editor
        .save(&mut DocumentFile::new(&path))
        .with_context(|| format!("Not saved: {}", path.display()))?;
    eprintln!("{} Saved {} (version {})", "✓".green(), path.display(), editor.version());
    Ok(())
}

fn apply_page(args: ApplyArgs, config: &Config, cwd: &Path) -> Result<()> {
    let path = resolve(&args.input, "pages", config, cwd);
    let ops: Vec<LayoutMutation> = read_json(&args.ops)?;
    let document: PageDocument = read_json(&path)?;
    let slug = document.slug().map(str::to_string).unwrap_or_else(|| args.input.clone());
    let mut editor = PageEditor::open(slug, document, &config.editor());
    info!(page = editor.slug(), ops = ops.len(), "Applying operations");

    for (index, op) in ops.into_iter().enumerate() {
        let name = op.name();
        report(index, name, editor.dispatch(op))?;
    }

    if !args.write {
        return print_json(editor.document());
    }
    editor
        .save(&mut DocumentFile::new(&path))
        .with_context(|| format!("Not saved: {}", path.display()))?;
    eprintln!("{} Saved {} (version {})", "✓".green(), path.display(), editor.version());
    Ok(())
}

fn report(index: usize, name: impl Display, result: Result<DispatchResult, EditorError>) -> Result<()> {
    match result {
        Ok(DispatchResult::Applied { version }) => {
            eprintln!("   {} #{} {} → v{}", "✓".green(), index, name, version);
            Ok(())
        }
        Ok(DispatchResult::Unchanged) => {
            eprintln!("   {} #{} {} (no change)", "•".yellow(), index, name);
            Ok(())
        }
        Err(err) => Err(anyhow::anyhow!("Operation #{} ({}) failed: {}", index, name, err)),
    }
}
