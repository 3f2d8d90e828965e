//! Command line front end for resolving versioned asset URLs.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use mix_assets::{HostConfig, MixArgs, MixConfig, MixResolver, StaticThemeHost};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mix-asset", about = "Resolve versioned asset URLs from a Mix manifest")]
struct Cli {
    /// Configuration file. Defaults to `mix.config.json` in the current directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    host: HostArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct HostArgs {
    /// Parent theme directory on disk.
    #[arg(long, global = true)]
    theme_root: Option<PathBuf>,
    /// Public URL of the parent theme directory.
    #[arg(long, global = true)]
    theme_uri: Option<String>,
    /// Child theme directory on disk.
    #[arg(long, global = true)]
    child_root: Option<PathBuf>,
    /// Public URL of the child theme directory.
    #[arg(long, global = true)]
    child_uri: Option<String>,
    /// Site installation root on disk.
    #[arg(long, global = true)]
    abspath: Option<PathBuf>,
    /// Public URL of the site installation.
    #[arg(long, global = true)]
    site_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an asset relative to the parent or child theme.
    Theme {
        /// Asset path relative to the theme root.
        path: String,
        /// Resolve against the child theme.
        #[arg(long)]
        child: bool,
        /// Manifest directory relative to the theme root.
        #[arg(long)]
        manifest_dir: Option<String>,
    },
    /// Resolve an asset by absolute path below the site root.
    Any {
        /// Absolute path of the asset.
        path: String,
        /// Absolute path of the directory holding the manifest.
        #[arg(long)]
        manifest_dir: String,
        /// Manifest file name.
        #[arg(long)]
        manifest_name: Option<String>,
    },
}

impl HostArgs {
    fn apply(self, mut config: HostConfig) -> HostConfig {
        if let Some(path) = self.theme_root {
            config.theme_path = path;
        }
        if let Some(uri) = self.theme_uri {
            config.theme_uri = uri;
        }
        if self.child_root.is_some() {
            config.child_theme_path = self.child_root;
        }
        if self.child_uri.is_some() {
            config.child_theme_uri = self.child_uri;
        }
        if let Some(path) = self.abspath {
            config.abspath = path;
        }
        if let Some(url) = self.site_url {
            config.site_url = url;
        }
        config
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<MixConfig> {
    match path {
        Some(path) => MixConfig::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => {
            let cwd = env::current_dir().context("failed to determine current directory")?;
            Ok(MixConfig::discover(&cwd))
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = load_config(cli.config.as_ref())?;
    let host_config = cli.host.apply(config.host.clone().unwrap_or_default());

    let resolver = MixResolver::new(StaticThemeHost::from(host_config.clone()))
        .with_defaults(config.to_options());

    let url = match cli.command {
        Command::Theme {
            path,
            child,
            manifest_dir,
        } => {
            if host_config.theme_uri.is_empty() {
                bail!("theme URL is not configured; pass --theme-uri or set host.theme_uri");
            }
            let args = MixArgs {
                is_child: child.then_some(true),
                manifest_directory: manifest_dir,
                manifest_name: None,
            };
            resolver.mix_with(&path, &args)
        }
        Command::Any {
            path,
            manifest_dir,
            manifest_name,
        } => {
            if host_config.site_url.is_empty() {
                bail!("site URL is not configured; pass --site-url or set host.site_url");
            }
            let name = manifest_name.unwrap_or(config.manifest_name);
            resolver.mix_any_named(&path, &manifest_dir, &name)
        }
    };
    Ok(url)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let url = run(Cli::parse())?;
    println!("{url}");
    Ok(())
}
