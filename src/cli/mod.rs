//! CLI interface for bookadmin

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

use crate::api::{RankingPeriod, RankingType};

#[derive(Parser)]
#[command(name = "bookadmin")]
#[command(author = "Krakaw")]
#[command(version)]
#[command(about = "Library admin client", long_about = None)]
pub struct Cli {
    /// Override the backend base URL from bookadmin.toml
    #[arg(long, global = true, env = "BOOKADMIN_API_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a bookadmin.toml with default settings
    Init,

    /// Log in and keep the session for later commands
    Login {
        #[arg(short, long)]
        username: Option<String>,

        /// Prompted for when omitted
        #[arg(short, long, env = "BOOKADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the current session
    Whoami {
        /// Also ask the backend who we are
        #[arg(long)]
        remote: bool,
    },

    /// List the application's routes and whether you may open them
    Routes {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Navigate to a route through the guard
    Open {
        /// Route path, e.g. /readers
        path: String,
    },

    /// Manage favorites
    Favorite {
        #[command(subcommand)]
        action: MarkAction,
    },

    /// Manage likes
    Like {
        #[command(subcommand)]
        action: MarkAction,
    },

    /// Book rankings
    Ranking {
        #[command(subcommand)]
        action: RankingAction,
    },
}

/// Shared by favorites and likes
#[derive(Subcommand)]
pub enum MarkAction {
    /// Toggle the mark on a book
    Toggle { book_id: u64 },

    /// Show the mark on a book
    Status { book_id: u64 },

    /// Show marks for several books, e.g. 1,2,3
    Batch {
        #[arg(value_delimiter = ',', required = true)]
        book_ids: Vec<u64>,
    },

    /// List your marked books
    List {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "10")]
        page_size: u32,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum RankingAction {
    /// Show a ranking board
    Show {
        #[arg(short = 't', long = "type", value_enum, default_value = "like")]
        kind: RankingType,

        #[arg(short, long, value_enum, default_value = "week")]
        period: RankingPeriod,

        #[arg(short, long)]
        limit: Option<u32>,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Rebuild a ranking board (admin)
    Rebuild {
        #[arg(short = 't', long = "type", value_enum)]
        kind: RankingType,

        #[arg(short, long, value_enum)]
        period: RankingPeriod,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
