//! Collaborators supplied by the hosting content-management system.
//!
//! The resolver never guesses where a theme lives. It asks a [`ThemeHost`] for the
//! filesystem root and public URL of the parent or child theme, and for the site root
//! used by [`crate::MixResolver::mix_any`].

use std::path::PathBuf;

use crate::config::HostConfig;

/// Which theme directory an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    /// The parent (template) theme.
    Parent,
    /// The active child (stylesheet) theme.
    Child,
}

impl ThemeKind {
    /// Select the child theme when `is_child` is set, the parent theme otherwise.
    pub fn from_child_flag(is_child: bool) -> Self {
        if is_child { Self::Child } else { Self::Parent }
    }
}

/// Base path and URL resolution provided by the host.
pub trait ThemeHost {
    /// Filesystem root of the requested theme.
    fn theme_root_path(&self, kind: ThemeKind) -> PathBuf;

    /// Public URL of the requested theme root, with or without a trailing slash.
    fn theme_root_uri(&self, kind: ThemeKind) -> String;

    /// Filesystem root of the site installation.
    fn abspath(&self) -> PathBuf;

    /// Public URL of the site installation.
    fn site_url(&self) -> String;

    /// URL of `file` inside the requested theme.
    ///
    /// Exactly one `/` separates the root URL from `file`; an empty `file` yields the
    /// root URL itself.
    fn theme_file_uri(&self, kind: ThemeKind, file: &str) -> String {
        let root = self.theme_root_uri(kind);
        let file = file.trim_start_matches('/');
        if file.is_empty() {
            return root;
        }
        format!("{}/{}", root.trim_end_matches('/'), file)
    }
}

/// Value-backed host used by the command line tool and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticThemeHost {
    parent_path: PathBuf,
    parent_uri: String,
    child_path: Option<PathBuf>,
    child_uri: Option<String>,
    abspath: PathBuf,
    site_url: String,
}

impl StaticThemeHost {
    /// Create a host serving a single parent theme.
    pub fn new(parent_path: impl Into<PathBuf>, parent_uri: impl Into<String>) -> Self {
        Self {
            parent_path: parent_path.into(),
            parent_uri: parent_uri.into(),
            ..Self::default()
        }
    }

    /// Register an active child theme. Without one, child lookups use the parent.
    pub fn with_child(mut self, path: impl Into<PathBuf>, uri: impl Into<String>) -> Self {
        self.child_path = Some(path.into());
        self.child_uri = Some(uri.into());
        self
    }

    /// Set the site installation root and its public URL.
    pub fn with_site(mut self, abspath: impl Into<PathBuf>, site_url: impl Into<String>) -> Self {
        self.abspath = abspath.into();
        self.site_url = site_url.into();
        self
    }
}

impl ThemeHost for StaticThemeHost {
    fn theme_root_path(&self, kind: ThemeKind) -> PathBuf {
        match (kind, &self.child_path) {
            (ThemeKind::Child, Some(path)) => path.clone(),
            _ => self.parent_path.clone(),
        }
    }

    fn theme_root_uri(&self, kind: ThemeKind) -> String {
        match (kind, &self.child_uri) {
            (ThemeKind::Child, Some(uri)) => uri.clone(),
            _ => self.parent_uri.clone(),
        }
    }

    fn abspath(&self) -> PathBuf {
        self.abspath.clone()
    }

    fn site_url(&self) -> String {
        self.site_url.clone()
    }
}

impl From<HostConfig> for StaticThemeHost {
    fn from(config: HostConfig) -> Self {
        let mut host = Self::new(config.theme_path, config.theme_uri)
            .with_site(config.abspath, config.site_url);
        if let (Some(path), Some(uri)) = (config.child_theme_path, config.child_theme_uri) {
            host = host.with_child(path, uri);
        }
        host
    }
}
