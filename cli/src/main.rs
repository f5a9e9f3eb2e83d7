//! gather-targets: write the Tailrelay target list for known StartOS packages.
//!
//! With no arguments and no config file, fetches the built-in package list
//! and writes `startos_targets.json` in the current directory. Progress and
//! warnings go to stderr.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tailrelay_targets::{run, GatherConfig, HttpStore};
use tracing_subscriber::EnvFilter;

/// gather-targets: discover StartOS service endpoints for Tailrelay.
#[derive(Parser)]
#[command(
    name = "gather-targets",
    version,
    about = "Discover StartOS service endpoints and write Tailrelay proxy/relay targets"
)]
struct Cli {
    /// Path to targets.toml [default: ./targets.toml or ~/.config/tailrelay/targets.toml, else built-in]
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output file, overriding the config's `output`
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default info level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = config_from_source(resolve_config(cli.config)).await?;
    if let Some(output) = cli.output {
        config.output = output;
    }

    let store = HttpStore::new(&config.user_agent)?;
    run(&config, &store).await?;

    Ok(())
}

/// Where the run's configuration comes from.
#[derive(Debug, PartialEq, Eq)]
enum ConfigSource {
    /// Passed with `--config`; failing to load it aborts the run.
    Explicit(PathBuf),
    /// Found on the search path without being asked for.
    Discovered(PathBuf),
    BuiltIn,
}

/// Resolve config source: explicit flag → ./targets.toml → ~/.config/tailrelay/targets.toml.
fn resolve_config(explicit: Option<PathBuf>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path);
    }

    let local = Path::new("targets.toml");
    if local.exists() {
        return ConfigSource::Discovered(local.to_path_buf());
    }

    dirs::config_dir()
        .map(|dir| dir.join("tailrelay").join("targets.toml"))
        .filter(|path| path.exists())
        .map_or(ConfigSource::BuiltIn, ConfigSource::Discovered)
}

/// Load the config for `source`.
///
/// A discovered file that cannot be read, parsed or validated is reported and
/// replaced by the built-in defaults, so a run without flags always writes output.
async fn config_from_source(source: ConfigSource) -> Result<GatherConfig> {
    match source {
        ConfigSource::Explicit(path) => {
            tracing::info!(path = %path.display(), "loading config");
            load_config(&path).await
        }
        ConfigSource::Discovered(path) => {
            tracing::warn!(path = %path.display(), "using config file found on the search path");
            let loaded = load_config(&path).await.and_then(|config| {
                config.validate()?;
                Ok(config)
            });
            match loaded {
                Ok(config) => Ok(config),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "ignoring unusable config file, using built-in defaults"
                    );
                    Ok(GatherConfig::default())
                }
            }
        }
        ConfigSource::BuiltIn => Ok(GatherConfig::default()),
    }
}

/// Load and parse a targets.toml config file.
async fn load_config(config_path: &Path) -> Result<GatherConfig> {
    let content = tokio::fs::read_to_string(config_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read config file {:?}: {}", config_path, e))?;
    GatherConfig::from_toml(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file {:?}: {}", config_path, e))
}
