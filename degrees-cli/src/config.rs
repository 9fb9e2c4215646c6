//! Configuration loading from `.degreesrc.toml`.
//!
//! Configuration is optional - the CLI uses sensible defaults if no
//! config file exists, and flags always override config values.
//!
//! # Example Configuration
//!
//! ```toml
//! [data]
//! dir = "data"
//! limit = 10000
//!
//! [output]
//! format = "table"
//! color = true
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from `.degreesrc.toml`.
///
/// All sections are optional and will use defaults if not specified.
#[derive(Debug, Deserialize, Default)]
pub struct DegreesConfig {
    /// Where the three input tables live.
    #[serde(default)]
    pub data: DataSection,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Data source configuration.
#[derive(Debug, Deserialize, Default)]
pub struct DataSection {
    /// Directory expected to contain `people.*`, `movies.*`, and
    /// `stars.*` in any supported format.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Explicit path to the people table (overrides `dir`).
    #[serde(default)]
    pub people: Option<PathBuf>,

    /// Explicit path to the movies table (overrides `dir`).
    #[serde(default)]
    pub movies: Option<PathBuf>,

    /// Explicit path to the appearances table (overrides `dir`).
    #[serde(default)]
    pub stars: Option<PathBuf>,

    /// Row cap per source, for quick smoke runs on large dumps.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Output formatting preferences.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: "table", "json", or "csv".
    #[serde(default)]
    pub format: Option<String>,

    /// Force colored output on or off. Unset means auto-detect.
    #[serde(default)]
    pub color: Option<bool>,
}

impl DegreesConfig {
    /// Load configuration from `.degreesrc.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns
    /// defaults. Parse errors are logged as warnings but don't cause
    /// failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".degreesrc.toml");
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse .degreesrc.toml: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read .degreesrc.toml: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Default output format from config, if set.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Color override from config, if set.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DegreesConfig::load(dir.path());
        assert!(config.data.dir.is_none());
        assert!(config.default_format().is_none());
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".degreesrc.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "[data]\ndir = \"fixtures\"\nlimit = 500\n\n[output]\nformat = \"json\"\ncolor = false\n"
        )
        .unwrap();

        let config = DegreesConfig::load(dir.path());
        assert_eq!(config.data.dir, Some(PathBuf::from("fixtures")));
        assert_eq!(config.data.limit, Some(500));
        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
    }

    #[test]
    fn test_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".degreesrc.toml");
        std::fs::write(&path, "[output]\nformat = \"csv\"\n").unwrap();

        let config = DegreesConfig::load(dir.path());
        assert!(config.data.dir.is_none());
        assert_eq!(config.default_format(), Some("csv"));
    }
}
