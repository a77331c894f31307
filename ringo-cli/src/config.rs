use anyhow::Context;
use ringo_reveal::RevealConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub reveal: RevealConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ringo"),
            reveal: RevealConfig::default(),
        }
    }
}

impl CliConfig {
    pub fn default_path() -> PathBuf {
        Self::default().data_dir.join("ringo.json")
    }

    /// Read `path` (or the default location). A missing file means defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.reveal.validate()?;
        Ok(config)
    }

    pub fn user_id(&self, flag: Option<String>) -> anyhow::Result<String> {
        flag.or_else(|| self.reveal.user_id.clone())
            .filter(|id| !id.trim().is_empty())
            .context("no user id: pass --user or set reveal.user_id in the config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config.reveal.total_stages, 6);
    }

    #[test]
    fn test_loads_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "reveal": {{ "backend_url": "https://ringo.example", "user_id": "u-1" }} }}"#
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.reveal.backend_url, "https://ringo.example");
        assert_eq!(config.user_id(None).unwrap(), "u-1");
        assert_eq!(config.user_id(Some("u-2".into())).unwrap(), "u-2");
    }

    #[test]
    fn test_invalid_reveal_config_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "reveal": {{ "total_stages": 1 }} }}"#).unwrap();
        assert!(CliConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_user_id_required() {
        let config = CliConfig::default();
        assert!(config.user_id(None).is_err());
        assert!(config.user_id(Some("  ".into())).is_err());
    }
}
