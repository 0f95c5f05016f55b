use crate::models::config::Config;
use anyhow::{Context, Result};
use std::{fs::File, io::ErrorKind};
use tracing::info;

const CONFIG_FILE: &str = "config.yaml";

/// Reads `config.yaml`, or the file named by `SPELLER_CONFIG`.
///
/// A missing file falls back to defaults. `UNSPLASH_ACCESS_KEY` overrides
/// the image key of the file.
pub fn read() -> Result<Config> {
    let path =
        std::env::var("SPELLER_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());

    let mut config: Config = match File::open(&path) {
        Ok(file) => serde_yaml::from_reader(file)
            .with_context(|| format!("could not read values of {}", path))?,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            info!("No {} file found, using default configuration.", path);
            Config::default()
        },
        Err(error) => {
            return Err(error).with_context(|| format!("could not open {}", path))
        },
    };

    if let Some(key) = std::env::var("UNSPLASH_ACCESS_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
    {
        config.images.access_key = Some(key);
    }

    Ok(config)
}
