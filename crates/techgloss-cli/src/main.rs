//! # TechGloss CLI
//!
//! Command-line admin console for the TechGloss technical glossary.
//!
//! ## Commands
//!
//! - `techgloss list [query]` - List terms, optionally filtered
//! - `techgloss show <id>` - Show one term, optionally with an AI explanation
//! - `techgloss add` / `techgloss edit <id>` - Create or change a term
//! - `techgloss delete <id>` - Delete a term
//! - `techgloss export` / `techgloss import <file>` - Snapshot the glossary
//! - `techgloss stats` - Category counts and last activity
//! - `techgloss prefs` - Theme and language preferences
//! - `techgloss key` - Inspect or switch the AI API key
//! - `techgloss config` - Locate or write the configuration file
//!
//! ## Example Usage
//!
//! ```bash
//! # Terms in the resin molding category mentioning "gate"
//! techgloss list gate --category resin-molding
//!
//! # Add a term and let the AI fill in the rest
//! techgloss add --word ゲート --mn "Хайлмал орох суваг" --auto-fill
//!
//! # Explain a term in Japanese
//! techgloss show 3 --explain --lang jp
//! ```

mod app;
mod commands;
mod key_selector;
mod prompt;

use clap::{Parser, Subcommand};
use commands::TermArgs;
use std::path::PathBuf;
use techgloss_core::{Category, Language, Theme};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// TechGloss - Multilingual technical glossary console
#[derive(Parser)]
#[command(name = "techgloss")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List terms matching a query
    #[command(alias = "ls")]
    List {
        /// Search text (supports cat:<category>)
        query: Option<String>,

        /// Only show one category
        #[arg(short = 'C', long)]
        category: Option<Category>,

        /// Maximum number of terms to show (0 = no limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Show the full detail of a term
    Show {
        /// Term id
        id: u64,

        /// Ask the AI for an explanation
        #[arg(short, long)]
        explain: bool,

        /// Language of the explanation (mn, en, jp)
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Add a new term
    Add {
        #[command(flatten)]
        fields: TermArgs,
    },

    /// Edit an existing term
    Edit {
        /// Term id
        id: u64,

        #[command(flatten)]
        fields: TermArgs,
    },

    /// Delete a term
    #[command(alias = "rm")]
    Delete {
        /// Term id
        id: u64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export the whole glossary to a JSON snapshot
    Export {
        /// Output file (default: techgloss_db_<date>.json)
        #[arg(short = 'O', long)]
        out: Option<PathBuf>,
    },

    /// Replace the glossary with a JSON snapshot
    Import {
        /// Snapshot file
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show glossary statistics
    Stats,

    /// Show or change interface preferences
    Prefs {
        /// Set the theme (light, dark)
        #[arg(long)]
        theme: Option<Theme>,

        /// Set the language (mn, en, jp)
        #[arg(long)]
        lang: Option<Language>,

        /// Flip between light and dark
        #[arg(long, conflicts_with = "theme")]
        toggle_theme: bool,
    },

    /// Manage the AI API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Locate or write the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum KeyAction {
    /// Show whether a key is configured
    Status,

    /// Enter a different key
    Switch,
}

#[derive(Subcommand, Clone, Copy)]
pub enum ConfigAction {
    /// Print the configuration file path
    Path,

    /// Write the current settings to the configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => techgloss_core::Config::load_from(path)?,
        None => techgloss_core::Config::load()?,
    };

    // Setup logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.general.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    // Execute command
    match cli.command {
        Commands::List {
            query,
            category,
            limit,
            output,
        } => commands::list::run(config, query.as_deref().unwrap_or(""), category, limit, output),
        Commands::Show { id, explain, lang } => commands::show::run(config, id, explain, lang).await,
        Commands::Add { fields } => commands::add::run(config, fields).await,
        Commands::Edit { id, fields } => commands::edit::run(config, id, fields).await,
        Commands::Delete { id, yes } => commands::delete::run(config, id, yes),
        Commands::Export { out } => commands::export::run(config, out),
        Commands::Import { file, yes } => commands::import::run(config, &file, yes),
        Commands::Stats => commands::stats::run(config),
        Commands::Prefs {
            theme,
            lang,
            toggle_theme,
        } => commands::prefs::run(config, theme, lang, toggle_theme),
        Commands::Key { action } => commands::key::run(config, action),
        Commands::Config { action } => commands::config::run(config, cli.config, action),
    }
}
