use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "RUSTY_H5IMPORT_CONFIG";

// ---------------------------------------------------------------------------
// Import configuration
// ---------------------------------------------------------------------------

/// Tunables for the import workflow. Every field has a default, so an empty
/// JSON object (or no file at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Where the hierarchy walk starts inside the container.
    pub root_path: String,

    /// Application-specific axis token recognized next to `t c x y z`.
    pub extra_axis_token: Option<char>,

    /// Upper bound on the decoded size of a single dataset, in bytes.
    pub max_read_bytes: Option<u64>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            root_path: "/".to_string(),
            extra_axis_token: None,
            max_read_bytes: None,
        }
    }
}

impl ImportConfig {
    /// Parse a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing JSON")?;
        Ok(config)
    }

    /// Load the file named by [`CONFIG_ENV`], or defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ImportConfig::from_json("{}").unwrap();
        assert_eq!(config, ImportConfig::default());
        assert_eq!(config.root_path, "/");
    }

    #[test]
    fn fields_override_defaults() {
        let config = ImportConfig::from_json(
            r#"{ "root_path": "/volumes", "extra_axis_token": "q", "max_read_bytes": 1024 }"#,
        )
        .unwrap();
        assert_eq!(config.root_path, "/volumes");
        assert_eq!(config.extra_axis_token, Some('q'));
        assert_eq!(config.max_read_bytes, Some(1024));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ImportConfig::from_json("{ root_path: ").is_err());
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h5import.json");
        std::fs::write(&path, r#"{ "max_read_bytes": 4096 }"#).unwrap();
        let config = ImportConfig::load(&path).unwrap();
        assert_eq!(config.max_read_bytes, Some(4096));

        assert!(ImportConfig::load(Path::new("/definitely/not/here.json")).is_err());
    }
}
