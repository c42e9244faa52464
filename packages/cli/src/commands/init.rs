use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::{JsonFileStore, MenuStore};
use folio_model::{NavMenu, NavNode};
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Data directory
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Folio content...".bright_blue().bold());

    let config = Config {
        data_dir: args.data_dir.clone(),
        ..Config::default()
    };
    let data_dir = config.get_data_dir(cwd);
    fs::create_dir_all(data_dir.join("pages"))?;

    // Starter menu
    let mut store = JsonFileStore::new(&data_dir);
    if !store.menu_path("main").exists() {
        let menu = NavMenu::new("main").with_items(vec![Arc::new(NavNode::new(
            "main-home",
            "Home",
            "الرئيسية",
            "/",
        ))]);
        store.save_menu(&menu)?;
        println!("  {} Created {}/menus/main.json", "✓".green(), args.data_dir);
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: folio validate main");
    println!("  2. Run: folio apply main ops.json --write");

    Ok(())
}
