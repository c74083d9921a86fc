mod config;

pub use config::{CatalogConfig, Config, ContactConfig, SessionConfig, TickerConfig};

use std::path::PathBuf;

/// Returns `~/.config/lunchline[-dev]/` based on LUNCHLINE_ENV.
///
/// Set LUNCHLINE_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LUNCHLINE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("lunchline-dev")
    } else {
        base_dir.join("lunchline")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
