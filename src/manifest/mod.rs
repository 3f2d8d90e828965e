//! Mix manifest loading, caching and key normalisation, split into focused submodules.

mod cache;
mod loader;
mod normalize;

pub use cache::ManifestCache;
pub use loader::{Manifest, ManifestError, load_manifest};
pub use normalize::{normalize_key, strip_leading_slashes, trailing_slash};
