//! Pipe configuration file.
//!
//! The OAuth handshake itself happens out of band; this tool consumes its
//! output (the token pair) from a TOML file alongside the application key.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Contents of the `boardpipe.toml` configuration file.
#[derive(Debug, Deserialize)]
pub struct PipeConfig {
    /// Application (consumer) key issued by the board service.
    pub app_key: String,
    /// Delegated access token from a completed authorization.
    pub access_token: String,
    /// Token secret paired with the access token.
    pub token_secret: String,
    /// Offer the aggregate "All Boards" entry during discovery.
    #[serde(default)]
    pub include_all_boards: bool,
}

impl PipeConfig {
    /// Loads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse configuration file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_a_complete_configuration() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "app_key = \"key\"\naccess_token = \"token\"\ntoken_secret = \"secret\""
        )
        .unwrap();

        let config = PipeConfig::load(file.path()).unwrap();
        assert_eq!(config.app_key, "key");
        assert!(!config.include_all_boards);
    }

    #[test]
    fn missing_token_field_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "app_key = \"key\"").unwrap();
        assert!(PipeConfig::load(file.path()).is_err());
    }
}
