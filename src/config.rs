//! Project configuration loader describing manifest location and host layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::options::MixOptions;

/// File name searched for by [`MixConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "mix.config.json";

/// Default manifest directory relative to the theme root.
pub const DEFAULT_MANIFEST_DIRECTORY: &str = "build";

/// Default manifest file name written by Laravel Mix.
pub const DEFAULT_MANIFEST_NAME: &str = "mix-manifest.json";

/// Discoverable configuration for resolving versioned assets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MixConfig {
    /// Manifest directory relative to the theme root.
    pub manifest_directory: String,
    /// Manifest file name inside the manifest directory.
    pub manifest_name: String,
    /// Resolve against the child theme instead of the parent theme.
    pub is_child: bool,
    /// Optional description of the host site, used by the command line tool.
    pub host: Option<HostConfig>,
}

/// Filesystem and URL roots of the host site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Parent theme directory on disk.
    pub theme_path: PathBuf,
    /// Public URL of the parent theme directory.
    pub theme_uri: String,
    /// Child theme directory on disk.
    pub child_theme_path: Option<PathBuf>,
    /// Public URL of the child theme directory.
    pub child_theme_uri: Option<String>,
    /// Site installation root on disk.
    pub abspath: PathBuf,
    /// Public URL of the site installation.
    pub site_url: String,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            manifest_directory: DEFAULT_MANIFEST_DIRECTORY.into(),
            manifest_name: DEFAULT_MANIFEST_NAME.into(),
            is_child: false,
            host: None,
        }
    }
}

impl MixConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall back to
    /// default values so asset lookups keep working.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Resolver defaults described by this configuration.
    pub fn to_options(&self) -> MixOptions {
        MixOptions {
            is_child: self.is_child,
            manifest_directory: self.manifest_directory.clone(),
            manifest_name: self.manifest_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discover_defaults_when_file_missing() {
        let temp = tempdir().unwrap();
        let config = MixConfig::discover(temp.path());

        assert_eq!(config.manifest_directory, "build");
        assert_eq!(config.manifest_name, "mix-manifest.json");
        assert!(!config.is_child);
        assert!(config.host.is_none());
    }

    #[test]
    fn discover_defaults_when_file_is_malformed() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();

        let config = MixConfig::discover(temp.path());
        assert_eq!(config.manifest_directory, "build");
    }

    #[test]
    fn reads_partial_configuration() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"{
                "manifest_directory": "dist",
                "is_child": true,
                "host": { "theme_path": "/srv/theme", "theme_uri": "https://example.com/theme" }
            }"#,
        )
        .unwrap();

        let config = MixConfig::discover(temp.path());
        let options = config.to_options();
        assert_eq!(options.manifest_directory, "dist");
        assert_eq!(options.manifest_name, "mix-manifest.json");
        assert!(options.is_child);

        let host = config.host.unwrap();
        assert_eq!(host.theme_path, PathBuf::from("/srv/theme"));
        assert!(host.child_theme_path.is_none());
    }
}
