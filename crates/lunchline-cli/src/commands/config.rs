use std::path::PathBuf;

use clap::{Args, Subcommand};
use lunchline_core::Config;

#[derive(Args)]
pub struct ConfigArgs {
    /// Use this file instead of ~/.config/lunchline/config.toml
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dotted key (e.g. "contact.number")
    Get { key: String },
    /// Validate and store a value by dotted key
    Set { key: String, value: String },
    /// Print the whole configuration, or one section of it, as JSON
    List { section: Option<String> },
    /// Print the config file location
    Path,
    /// Overwrite the file with the defaults
    Reset,
}

pub fn run(args: ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = match args.file {
        Some(path) => path,
        None => Config::path()?,
    };

    match args.action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(&path)?;
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(&path)?;
            config.apply(&key, &value)?;
            config.save_to(&path)?;
            tracing::info!(%key, path = %path.display(), "config updated");
            println!("ok");
        }
        ConfigAction::List { section } => {
            let config = Config::load_from(&path)?;
            let tree = serde_json::to_value(&config)?;
            let tree = match section {
                Some(section) => tree
                    .get(&section)
                    .cloned()
                    .ok_or_else(|| format!("unknown key: {section}"))?,
                None => tree,
            };
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Reset => {
            Config::default().save_to(&path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
