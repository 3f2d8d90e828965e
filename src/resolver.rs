//! Versioned asset URL resolution backed by Mix manifests.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::host::{ThemeHost, ThemeKind};
use crate::manifest::{ManifestCache, normalize_key, strip_leading_slashes, trailing_slash};
use crate::options::{MixArgs, MixOptions, NoFilter, OptionsFilter};

enum CacheHandle {
    Global,
    Owned(ManifestCache),
}

impl CacheHandle {
    fn get(&self) -> &ManifestCache {
        match self {
            Self::Global => ManifestCache::global(),
            Self::Owned(cache) => cache,
        }
    }
}

/// Resolves asset paths to their versioned URLs.
///
/// Lookups never fail: a missing manifest, a missing entry or a malformed manifest
/// all produce the unversioned URL of the requested asset.
pub struct MixResolver<H, F = NoFilter> {
    host: H,
    filter: F,
    defaults: MixOptions,
    cache: CacheHandle,
}

impl<H: ThemeHost> MixResolver<H> {
    /// Create a resolver using the process-wide manifest cache.
    pub fn new(host: H) -> Self {
        Self {
            host,
            filter: NoFilter,
            defaults: MixOptions::default(),
            cache: CacheHandle::Global,
        }
    }
}

impl<H: ThemeHost, F: OptionsFilter> MixResolver<H, F> {
    /// Install a hook that adjusts the defaults before per-call arguments are merged.
    pub fn with_filter<G: OptionsFilter>(self, filter: G) -> MixResolver<H, G> {
        MixResolver {
            host: self.host,
            filter,
            defaults: self.defaults,
            cache: self.cache,
        }
    }

    /// Replace the defaults handed to the filter.
    pub fn with_defaults(mut self, defaults: MixOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Use a cache owned by this resolver instead of the process-wide one.
    pub fn with_cache(mut self, cache: ManifestCache) -> Self {
        self.cache = CacheHandle::Owned(cache);
        self
    }

    /// Manifest cache consulted by this resolver.
    pub fn cache(&self) -> &ManifestCache {
        self.cache.get()
    }

    /// Options in effect for a lookup with the given arguments.
    pub fn effective_options(&self, args: &MixArgs) -> MixOptions {
        let defaults = self.filter.filter_defaults(self.defaults.clone());
        args.merge_over(defaults)
    }

    /// Versioned URL of a theme asset using the resolver defaults.
    pub fn mix(&self, path: &str) -> String {
        self.mix_with(path, &MixArgs::default())
    }

    /// Versioned URL of a theme asset.
    ///
    /// `path` is relative to the theme root and may include the manifest directory.
    pub fn mix_with(&self, path: &str, args: &MixArgs) -> String {
        let options = self.effective_options(args);
        let kind = ThemeKind::from_child_flag(options.is_child);
        let manifest_path = self
            .host
            .theme_root_path(kind)
            .join(options.manifest_directory.trim_start_matches('/'))
            .join(&options.manifest_name);

        let Some(manifest) = self.cache().get(&manifest_path) else {
            return self.host.theme_file_uri(kind, path);
        };

        let key = normalize_key(path, &options.manifest_directory);
        match manifest.get(&key) {
            Some(versioned) => {
                let file = format!(
                    "{}{}",
                    trailing_slash(&options.manifest_directory),
                    strip_leading_slashes(versioned)
                );
                self.host.theme_file_uri(kind, &file)
            }
            None => {
                debug!(%key, manifest = %manifest_path.display(), "asset not in manifest");
                self.host.theme_file_uri(kind, path)
            }
        }
    }

    /// Versioned URL of an asset anywhere below the site root.
    ///
    /// Both `path` and `manifest_directory` are absolute filesystem paths. The manifest
    /// file name comes from the resolver defaults (`mix-manifest.json` unless changed
    /// with [`Self::with_defaults`]); the filter hook does not apply here.
    pub fn mix_any(&self, path: &str, manifest_directory: &str) -> String {
        self.mix_any_named(path, manifest_directory, &self.defaults.manifest_name)
    }

    /// Like [`Self::mix_any`] with an explicit manifest file name.
    pub fn mix_any_named(
        &self,
        path: &str,
        manifest_directory: &str,
        manifest_name: &str,
    ) -> String {
        let file_url = self.site_file_url(path);
        let manifest_path =
            PathBuf::from(format!("{}{}", trailing_slash(manifest_directory), manifest_name));

        let Some(manifest) = self.cache().get(&manifest_path) else {
            return file_url;
        };

        let key = normalize_key(path, manifest_directory);
        let Some(versioned) = manifest.get(&key) else {
            debug!(%key, manifest = %manifest_path.display(), "asset not in manifest");
            return file_url;
        };
        let versioned = format!("/{}", strip_leading_slashes(versioned));

        match file_url.strip_suffix(key.as_str()) {
            Some(prefix) => format!("{prefix}{versioned}"),
            None => file_url.replace(&key, &versioned),
        }
    }

    /// Convert a filesystem path below the site root into its public URL.
    ///
    /// Paths outside the site root are returned unchanged.
    pub fn site_file_url(&self, path: &str) -> String {
        let abspath = self.host.abspath();
        if abspath.as_os_str().is_empty() {
            return path.to_string();
        }

        let root = trailing_slash(&path_string(&abspath));
        match path.strip_prefix(root.as_str()) {
            Some(rest) => format!("{}{}", trailing_slash(&self.host.site_url()), rest),
            None => path.to_string(),
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
