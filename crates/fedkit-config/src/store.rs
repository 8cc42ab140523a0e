//! File-backed configuration store.

use fedkit_core::{ConfigStore, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default pipeline configuration file, kept in the project root.
pub const DEFAULT_FILE_NAME: &str = "fedkit.yaml";

type Section = BTreeMap<String, String>;
type CommandEntry = BTreeMap<String, Section>;

/// Configuration document, serialized as YAML.
///
/// Layout: command path (names joined with `_`) -> section -> key ->
/// value. The flat underscored keys inside a section are a
/// compatibility surface for existing stored configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigDocument {
    version: u32,
    #[serde(flatten)]
    commands: BTreeMap<String, CommandEntry>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            version: 1,
            commands: BTreeMap::new(),
        }
    }
}

/// File-backed [`ConfigStore`] implementation.
///
/// `put` updates the in-memory document; `save` writes the whole file
/// back, so a bootstrap run's keys land together under one section.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    path: PathBuf,
    document: ConfigDocument,
}

impl PipelineConfig {
    /// Open the configuration at `path`, or start an empty document if
    /// the file does not exist yet.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|e| Error::Serialization(e.to_string()))?
        } else {
            ConfigDocument::default()
        };
        Ok(Self { path, document })
    }

    /// Write the document back to disk.
    pub fn save(&self) -> Result<()> {
        let content = serde_yaml::to_string(&self.document)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| {
            Error::Storage(format!("failed to write {}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), "Saved pipeline configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a single value.
    pub fn get(&self, cmd_names: &[String], section: &str, key: &str) -> Option<&str> {
        self.document
            .commands
            .get(&command_key(cmd_names))
            .and_then(|entry| entry.get(section))
            .and_then(|values| values.get(key))
            .map(String::as_str)
    }

    /// All key/value entries of a section.
    pub fn section(&self, cmd_names: &[String], section: &str) -> Option<&BTreeMap<String, String>> {
        self.document
            .commands
            .get(&command_key(cmd_names))
            .and_then(|entry| entry.get(section))
    }
}

/// Command paths nest in the document under a single joined key.
fn command_key(cmd_names: &[String]) -> String {
    cmd_names.join("_")
}

impl ConfigStore for PipelineConfig {
    fn put(&mut self, cmd_names: &[String], section: &str, key: &str, value: &str) -> Result<()> {
        self.document
            .commands
            .entry(command_key(cmd_names))
            .or_default()
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd_names() -> Vec<String> {
        vec!["pipeline".to_string(), "bootstrap".to_string()]
    }

    #[test]
    fn test_missing_file_yields_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::load_or_default(dir.path().join("fedkit.yaml")).unwrap();

        assert_eq!(config.section(&cmd_names(), "parameters"), None);
    }

    #[test]
    fn test_put_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fedkit.yaml");

        let mut config = PipelineConfig::load_or_default(&path).unwrap();
        config
            .put(&cmd_names(), "parameters", "oidc_provider_url", "https://example.com")
            .unwrap();
        config
            .put(&cmd_names(), "parameters", "oidc_provider", "GitHub")
            .unwrap();
        config.save().unwrap();

        let reloaded = PipelineConfig::load_or_default(&path).unwrap();
        assert_eq!(
            reloaded.get(&cmd_names(), "parameters", "oidc_provider_url"),
            Some("https://example.com")
        );
        assert_eq!(
            reloaded.get(&cmd_names(), "parameters", "oidc_provider"),
            Some("GitHub")
        );
    }

    #[test]
    fn test_sections_are_namespaced_by_command_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fedkit.yaml");

        let mut config = PipelineConfig::load_or_default(&path).unwrap();
        config
            .put(&cmd_names(), "parameters", "key", "bootstrap-value")
            .unwrap();
        config
            .put(&["pipeline".to_string()], "parameters", "key", "pipeline-value")
            .unwrap();

        assert_eq!(
            config.get(&cmd_names(), "parameters", "key"),
            Some("bootstrap-value")
        );
        assert_eq!(
            config.get(&["pipeline".to_string()], "parameters", "key"),
            Some("pipeline-value")
        );
    }

    #[test]
    fn test_section_keys_serialize_in_deterministic_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fedkit.yaml");

        let mut config = PipelineConfig::load_or_default(&path).unwrap();
        config.put(&cmd_names(), "parameters", "oidc_provider", "GitHub").unwrap();
        config.put(&cmd_names(), "parameters", "deployment_branch", "main").unwrap();
        config.put(&cmd_names(), "parameters", "github_org", "acme").unwrap();
        config.save().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let branch = content.find("deployment_branch").unwrap();
        let org = content.find("github_org").unwrap();
        let provider = content.find("oidc_provider").unwrap();
        assert!(branch < org && org < provider);
    }

    #[test]
    fn test_put_overwrites_existing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fedkit.yaml");

        let mut config = PipelineConfig::load_or_default(&path).unwrap();
        config.put(&cmd_names(), "parameters", "key", "old").unwrap();
        config.put(&cmd_names(), "parameters", "key", "new").unwrap();

        assert_eq!(config.get(&cmd_names(), "parameters", "key"), Some("new"));
    }
}
