//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.termfolio/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TermfolioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Brand label shown at the left of the navigation bar.
    pub title: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub clock: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContentConfig {
    /// Directory holding `blog/`, `pages/` and `projects.toml`.
    pub root: Option<String>,
    /// Overrides `<root>/blog`.
    pub blog_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub host_key: Option<String>,
    pub idle_timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "termfolio";
pub const DEFAULT_LOG_FILE: &str = "termfolio.log";
pub const DEFAULT_CONTENT_ROOT: &str = "content";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 2222;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 3600;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub title: String,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub clock: bool,
    pub content_root: PathBuf,
    pub blog_dir: PathBuf,
    pub host: String,
    pub port: u16,
    /// `None` means generate an ephemeral key at startup.
    pub host_key: Option<PathBuf>,
    pub idle_timeout: Duration,
}

/// Values given on the command line. `None` / `false` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub content_root: Option<PathBuf>,
    pub blog_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub no_clock: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub host_key: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.termfolio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".termfolio").join("config.toml"))
}

/// Load config from `~/.termfolio/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TermfolioConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TermfolioConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(TermfolioConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<TermfolioConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TermfolioConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TermfolioConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# termfolio configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# title = "termfolio"               # Label at the left of the navigation bar
# log_level = "info"                # "error", "warn", "info", "debug", "trace", "off"
# log_file = "termfolio.log"
# clock = true                      # Show the clock in the status bar

# [content]
# root = "content"                  # Holds blog/, pages/ and projects.toml
# blog_dir = "content/blog"         # Or set TERMFOLIO_BLOG_DIR

# [server]
# host = "0.0.0.0"                  # Or set TERMFOLIO_HOST
# port = 2222                       # Or set TERMFOLIO_PORT
# host_key = "~/.termfolio/host_ed25519"  # Omit to generate a key per run
# idle_timeout_secs = 3600
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TermfolioConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &TermfolioConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let title = config
        .general
        .title
        .clone()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    // Log level: CLI → env → config → default. Unknown names fall back to the default.
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("TERMFOLIO_LOG_LEVEL"))
        .or_else(|| config.general.log_level.clone())
        .map(|s| parse_level(&s))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.general.log_file.as_deref().map(expand_home))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let clock = !cli.no_clock && config.general.clock.unwrap_or(true);

    let content_root = cli
        .content_root
        .clone()
        .or_else(|| env("TERMFOLIO_CONTENT_DIR").map(PathBuf::from))
        .or_else(|| config.content.root.as_deref().map(expand_home))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_ROOT));

    // Blog dir: CLI → env → config → <content root>/blog
    let blog_dir = cli
        .blog_dir
        .clone()
        .or_else(|| env("TERMFOLIO_BLOG_DIR").map(PathBuf::from))
        .or_else(|| config.content.blog_dir.as_deref().map(expand_home))
        .unwrap_or_else(|| content_root.join("blog"));

    let host = cli
        .host
        .clone()
        .or_else(|| env("TERMFOLIO_HOST"))
        .or_else(|| config.server.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = cli
        .port
        .or_else(|| {
            env("TERMFOLIO_PORT").and_then(|p| match p.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("Ignoring invalid TERMFOLIO_PORT: {}", p);
                    None
                }
            })
        })
        .or(config.server.port)
        .unwrap_or(DEFAULT_PORT);

    let host_key = cli
        .host_key
        .clone()
        .or_else(|| env("TERMFOLIO_HOST_KEY").map(PathBuf::from))
        .or_else(|| config.server.host_key.as_deref().map(expand_home));

    let idle_timeout = Duration::from_secs(
        config
            .server
            .idle_timeout_secs
            .unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS),
    );

    ResolvedConfig {
        title,
        log_level,
        log_file,
        clock,
        content_root,
        blog_dir,
        host,
        port,
        host_key,
        idle_timeout,
    }
}

fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or_else(|_| {
        warn!("Unknown log level {:?}, using {}", name, DEFAULT_LOG_LEVEL);
        DEFAULT_LOG_LEVEL
    })
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
