use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persistent defaults loaded with `--config`
///
/// ```json
/// { "outputPath": "stickers", "lossy": true, "quality": 90, "pattern": "*.png" }
/// ```
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub output_path: Option<String>,
    pub lossy: Option<bool>,
    pub quality: Option<i64>,
    pub pattern: Option<String>,
    pub remove_background: Option<bool>,
    pub verbose: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl Args {
    /// Load configuration from a JSON file and merge with command-line arguments
    /// Command-line arguments take precedence over config file values
    pub fn load_and_merge_config(&mut self) -> Result<()> {
        if let Some(config_path) = self.config_file.clone() {
            let config = ConfigFile::load(&config_path)?;
            self.merge_from_config(config);

            if self.verbose {
                eprintln!("Loaded configuration from: {}", config_path.display());
            }
        }
        Ok(())
    }

    fn merge_from_config(&mut self, config: ConfigFile) {
        if self.output_path.is_none() {
            self.output_path = config.output_path.map(PathBuf::from);
        }

        // Flags can only be switched on from the command line
        self.lossy |= config.lossy.unwrap_or(false);
        self.remove_background |= config.remove_background.unwrap_or(false);
        self.verbose |= config.verbose.unwrap_or(false);

        if self.quality.is_none() {
            self.quality = config.quality.map(|q| q.clamp(1, 100) as u8);
        }

        if self.pattern.is_none() {
            self.pattern = config.pattern;
        }
    }
}
