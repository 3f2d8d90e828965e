//! Resolver defaults, the filter hook applied to them, and per-call overrides.

use crate::config::{DEFAULT_MANIFEST_DIRECTORY, DEFAULT_MANIFEST_NAME};

/// Effective settings for a single theme asset lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixOptions {
    /// Resolve against the child theme instead of the parent theme.
    pub is_child: bool,
    /// Manifest directory relative to the theme root.
    pub manifest_directory: String,
    /// Manifest file name inside the manifest directory.
    pub manifest_name: String,
}

impl Default for MixOptions {
    fn default() -> Self {
        Self {
            is_child: false,
            manifest_directory: DEFAULT_MANIFEST_DIRECTORY.into(),
            manifest_name: DEFAULT_MANIFEST_NAME.into(),
        }
    }
}

/// Caller supplied overrides. `None` keeps the (filtered) default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixArgs {
    /// Override for [`MixOptions::is_child`].
    pub is_child: Option<bool>,
    /// Override for [`MixOptions::manifest_directory`].
    pub manifest_directory: Option<String>,
    /// Override for [`MixOptions::manifest_name`].
    pub manifest_name: Option<String>,
}

impl MixArgs {
    /// Arguments selecting the child theme.
    pub fn child() -> Self {
        Self {
            is_child: Some(true),
            ..Self::default()
        }
    }

    /// Arguments overriding the manifest directory.
    pub fn manifest_directory(mut self, directory: impl Into<String>) -> Self {
        self.manifest_directory = Some(directory.into());
        self
    }

    /// Merge these arguments over `defaults`.
    pub fn merge_over(&self, defaults: MixOptions) -> MixOptions {
        MixOptions {
            is_child: self.is_child.unwrap_or(defaults.is_child),
            manifest_directory: self
                .manifest_directory
                .clone()
                .unwrap_or(defaults.manifest_directory),
            manifest_name: self.manifest_name.clone().unwrap_or(defaults.manifest_name),
        }
    }
}

/// Hook allowing the host to adjust resolver defaults before arguments are merged.
pub trait OptionsFilter {
    /// Return the defaults to use for this lookup.
    fn filter_defaults(&self, defaults: MixOptions) -> MixOptions;
}

/// Filter that leaves defaults untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl OptionsFilter for NoFilter {
    fn filter_defaults(&self, defaults: MixOptions) -> MixOptions {
        defaults
    }
}

impl<F> OptionsFilter for F
where
    F: Fn(MixOptions) -> MixOptions,
{
    fn filter_defaults(&self, defaults: MixOptions) -> MixOptions {
        self(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_args_keep_defaults() {
        let merged = MixArgs::default().merge_over(MixOptions::default());
        assert_eq!(merged, MixOptions::default());
    }

    #[test]
    fn args_override_only_what_they_set() {
        let merged = MixArgs::child().merge_over(MixOptions {
            manifest_directory: "dist".into(),
            ..MixOptions::default()
        });

        assert!(merged.is_child);
        assert_eq!(merged.manifest_directory, "dist");
        assert_eq!(merged.manifest_name, "mix-manifest.json");
    }

    #[test]
    fn closures_act_as_filters() {
        let filter = |mut defaults: MixOptions| {
            defaults.is_child = true;
            defaults
        };

        let filtered = filter.filter_defaults(MixOptions::default());
        assert!(filtered.is_child);
        assert_eq!(NoFilter.filter_defaults(MixOptions::default()), MixOptions::default());
    }
}
