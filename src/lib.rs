#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod host;
pub mod manifest;
pub mod options;
pub mod resolver;

pub use config::{HostConfig, MixConfig};
pub use host::{StaticThemeHost, ThemeHost, ThemeKind};
pub use manifest::{Manifest, ManifestCache, ManifestError};
pub use options::{MixArgs, MixOptions, NoFilter, OptionsFilter};
pub use resolver::MixResolver;
