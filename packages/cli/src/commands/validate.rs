use super::files::{read_menu, resolve};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::NavEditor;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Menu file, directory of menu files, or menu name under the data directory
    pub input: String,
}

pub fn validate(args: ValidateArgs, config: &Config, cwd: &Path) -> Result<()> {
    let input = resolve(&args.input, "menus", config, cwd);

    let files = if input.is_dir() {
        find_json_files(&input)
    } else if input.is_file() {
        vec![input.clone()]
    } else {
        return Err(anyhow::anyhow!("Input path does not exist: {}", input.display()));
    };

    println!("🔍 {} {} menu file(s)", "Validating".green().bold(), files.len());
    println!();

    let mut failures = 0;
    for file in &files {
        if !validate_file(file, config)? {
            failures += 1;
        }
    }

    println!();
    if failures > 0 {
        return Err(anyhow::anyhow!("{} of {} menu(s) failed validation", failures, files.len()));
    }
    println!("✨ {} All menus are valid", "Done".green().bold());
    Ok(())
}

fn validate_file(file: &Path, config: &Config) -> Result<bool> {
    let menu = read_menu(file)?;
    debug!(path = %file.display(), menu = %menu.name, "Validating menu");
    let editor = NavEditor::open(menu, &config.editor());

    if editor.is_dirty() {
        println!(
            "   {} {} has missing or duplicate ids (run `folio repair`)",
            "⚠".yellow(),
            file.display()
        );
    }

    match editor.validate() {
        Ok(()) => {
            println!(
                "   {} {} ({} items)",
                "✓".green(),
                file.display(),
                editor.menu().node_count()
            );
            Ok(true)
        }
        Err(err) => {
            println!("   {} {}: {}", "✗".red(), file.display(), err);
            Ok(false)
        }
    }
}

fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.path().extension().map(|ext| ext == "json").unwrap_or(false))
        .map(|e| e.path().to_path_buf())
        .collect()
}
