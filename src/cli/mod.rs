//! Command-line interface for shelf.
//!
//! Loads the book and movie collections, then either runs the interactive
//! session or answers a one-shot list/search query.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{self, ResolvedConfig, SourceOverrides};
use crate::domain::{ItemKind, Record};
use crate::library::{load_store, CollectionStore};

pub mod input;
pub mod render;
pub mod session;

pub use input::{LineSource, Scripted, Terminal};
pub use session::{Command, Session};

/// shelf - Collection manager for a library's books and movies
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Books CSV file
    #[arg(long, global = true, env = "SHELF_BOOKS")]
    pub books: Option<PathBuf>,

    /// Movies CSV file
    #[arg(long, global = true, env = "SHELF_MOVIES")]
    pub movies: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive collection manager (default)
    Session {
        /// Don't print the command menu before each prompt
        #[arg(long)]
        no_menu: bool,
    },

    /// List every item of one kind
    List {
        /// Which collection to list
        #[arg(value_enum)]
        kind: KindArg,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search one collection by keyword
    Search {
        /// Which collection to search
        #[arg(value_enum)]
        kind: KindArg,

        /// Search query
        query: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Collection selector for CLI (maps to ItemKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// The books collection
    Books,

    /// The movies collection
    Movies,
}

impl From<KindArg> for ItemKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Books => ItemKind::Book,
            KindArg::Movies => ItemKind::Movie,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let overrides = SourceOverrides {
            books: self.books,
            movies: self.movies,
        };
        let cfg = config::load_config(&overrides)?;

        match self.command.unwrap_or(Commands::Session { no_menu: false }) {
            Commands::Session { no_menu } => run_session(&cfg, no_menu).await,
            Commands::List { kind, json } => list_items(&cfg, kind.into(), json).await,
            Commands::Search { kind, query, json } => {
                search_items(&cfg, kind.into(), &query, json).await
            }
            Commands::Config => show_config(&cfg),
        }
    }
}

/// Load both collections; any failure ends the program before a command runs
async fn load_collections(cfg: &ResolvedConfig) -> Result<CollectionStore> {
    load_store(&cfg.books, &cfg.movies)
        .await
        .context("The collections could not be loaded. Exiting.")
}

/// Run the interactive session on stdin/stdout
async fn run_session(cfg: &ResolvedConfig, no_menu: bool) -> Result<()> {
    let store = load_collections(cfg).await?;
    println!("The collections have loaded successfully.");

    let mut settings = cfg.session.clone();
    if no_menu {
        settings.show_menu = false;
    }

    let stdout = io::stdout();
    if io::stdin().is_terminal() {
        let terminal = Terminal::new().context("Failed to start the line editor")?;
        Session::with_source(store, terminal, stdout.lock(), settings).run()
    } else {
        let stdin = io::stdin();
        Session::new(store, stdin.lock(), stdout.lock(), settings).run()
    }
}

/// Print records either as text blocks or as a JSON array
fn print_records<W: Write>(
    out: &mut W,
    kind: ItemKind,
    records: &[&Record],
    json: bool,
) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(records)?;
        writeln!(out, "{}", text)?;
    } else {
        render::write_records(out, kind, records)?;
    }

    Ok(())
}

/// List every item of one kind
async fn list_items(cfg: &ResolvedConfig, kind: ItemKind, json: bool) -> Result<()> {
    let store = load_collections(cfg).await?;
    print_records(&mut io::stdout().lock(), kind, &store.list(kind), json)
}

/// Search one collection
async fn search_items(cfg: &ResolvedConfig, kind: ItemKind, query: &str, json: bool) -> Result<()> {
    let store = load_collections(cfg).await?;
    let results = store.search(kind, query)?;

    let mut out = io::stdout().lock();
    if !json && !results.is_empty() {
        writeln!(out, "Found {} result(s) for \"{}\":\n", results.len(), query)?;
    }
    print_records(&mut out, kind, &results, json)
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!("Shelf Configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Sources:");
    println!("  Books:  {}", cfg.books.display());
    println!("  Movies: {}", cfg.movies.display());
    println!();
    println!("Session:");
    println!("  Show menu: {}", cfg.session.show_menu);

    Ok(())
}
