use super::files::{print_json, read_menu, resolve, DocumentFile};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::{MenuStore, NavEditor};
use std::path::Path;

#[derive(Args, Debug)]
pub struct RepairArgs {
    /// Menu file or menu name under the data directory
    pub input: String,

    /// Write the repaired menu back instead of printing it
    #[arg(short, long)]
    pub write: bool,
}

pub fn repair(args: RepairArgs, config: &Config, cwd: &Path) -> Result<()> {
    let path = resolve(&args.input, "menus", config, cwd);
    let editor = NavEditor::open(read_menu(&path)?, &config.editor());

    if !args.write {
        return print_json(editor.menu());
    }

    if !editor.is_dirty() {
        eprintln!("{} {} needs no repair", "✓".green(), path.display());
        return Ok(());
    }

    // Repair only touches ids; other defects are left for `folio validate`
    let mut file = DocumentFile::new(&path);
    file.save_menu(editor.menu())?;
    eprintln!("{} Repaired ids in {}", "✓".green(), path.display());
    Ok(())
}
