use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sartthi")]
#[command(about = "Workspace store tools and documentation API client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the in-memory documentation API server
    Serve {
        /// Port to run the server on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Token admin routes require
        #[arg(long)]
        admin_token: Option<String>,

        /// Start with an empty article list
        #[arg(long)]
        no_seed: bool,
    },
    /// Store an access token for documentation requests
    Login {
        token: String,

        /// Store it as the admin token
        #[arg(long)]
        admin: bool,
    },
    /// Forget stored tokens
    Logout,
    /// Read and manage documentation articles
    Docs {
        #[command(subcommand)]
        command: DocsCommand,
    },
    /// Work with the application store
    Store {
        #[command(subcommand)]
        command: StoreCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum DocsCommand {
    /// List articles
    List {
        #[arg(short, long)]
        category: Option<String>,

        /// Include unpublished articles (requires a token)
        #[arg(long)]
        all: bool,
    },
    /// Print one published article
    Show { slug: String },
    /// Create an article
    Create {
        #[command(flatten)]
        fields: ArticleFields,
    },
    /// Update an article by id
    Update {
        id: String,

        #[command(flatten)]
        fields: ArticleFields,
    },
    /// Delete an article by id
    Delete { id: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ArticleFields {
    #[arg(long)]
    pub title: Option<String>,

    /// Lower-cased and hyphenated before sending
    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub subcategory: Option<String>,

    #[arg(long)]
    pub video_url: Option<String>,

    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the markdown body from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    #[arg(long)]
    pub order: Option<i64>,

    /// Publish (true) or unpublish (false)
    #[arg(long)]
    pub published: Option<bool>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StoreCommand {
    /// Apply a JSON array of actions and print the resulting state
    Replay {
        /// Actions file, or '-' for stdin
        file: PathBuf,

        /// Start from the demo workspace data
        #[arg(long)]
        demo: bool,

        /// Print a short overview instead of the full state JSON
        #[arg(long)]
        summary: bool,
    },
}
