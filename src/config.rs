//! Configuration for shelf sources.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags / environment variables (SHELF_BOOKS, SHELF_MOVIES)
//! 2. Config file (.shelf/config.yaml)
//! 3. Defaults (books.csv and movies.csv in the current directory)
//!
//! Config file discovery:
//! - Searches current directory and parents for .shelf/config.yaml
//! - Falls back to ~/.shelf/config.yaml
//! - Paths in config file are relative to the directory holding .shelf/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BOOKS_FILE: &str = "books.csv";
pub const DEFAULT_MOVIES_FILE: &str = "movies.csv";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub session: Option<SessionConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    /// Books CSV (relative to config file)
    pub books: Option<String>,
    /// Movies CSV (relative to config file)
    pub movies: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub show_menu: Option<bool>,
}

/// Source paths given explicitly on the command line or via environment
#[derive(Debug, Clone, Default)]
pub struct SourceOverrides {
    pub books: Option<PathBuf>,
    pub movies: Option<PathBuf>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Path to the books CSV
    pub books: PathBuf,
    /// Path to the movies CSV
    pub movies: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Interactive session settings
    pub session: SessionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Print the command menu before every prompt
    pub show_menu: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { show_menu: true }
    }
}

/// Search `start` and its parents for .shelf/config.yaml
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".shelf").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Per-user config file (~/.shelf/config.yaml), if present
fn home_config_file() -> Option<PathBuf> {
    let path = dirs::home_dir()?.join(".shelf").join("config.yaml");
    path.exists().then_some(path)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Resolve configuration as seen from `start_dir`
fn resolve_config(
    start_dir: &Path,
    config_file: Option<PathBuf>,
    overrides: &SourceOverrides,
) -> Result<ResolvedConfig> {
    let (file_books, file_movies, session) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .shelf/
        let base_dir = config_path
            .parent() // .shelf/
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let books = config
            .sources
            .books
            .as_deref()
            .map(|p| resolve_path(base_dir, p));
        let movies = config
            .sources
            .movies
            .as_deref()
            .map(|p| resolve_path(base_dir, p));

        let session = SessionSettings {
            show_menu: config
                .session
                .as_ref()
                .and_then(|s| s.show_menu)
                .unwrap_or(true),
        };

        (books, movies, session)
    } else {
        (None, None, SessionSettings::default())
    };

    let books = overrides
        .books
        .clone()
        .or(file_books)
        .unwrap_or_else(|| start_dir.join(DEFAULT_BOOKS_FILE));
    let movies = overrides
        .movies
        .clone()
        .or(file_movies)
        .unwrap_or_else(|| start_dir.join(DEFAULT_MOVIES_FILE));

    Ok(ResolvedConfig {
        books,
        movies,
        config_file,
        session,
    })
}

/// Load configuration from all sources
pub fn load_config(overrides: &SourceOverrides) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config_file = find_config_file(&cwd).or_else(home_config_file);

    resolve_config(&cwd, config_file, overrides)
}
