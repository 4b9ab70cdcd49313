use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
pub fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("P_GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("P_GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("P_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "p", bin_name = "p", version = get_version())]
#[command(about = "Store, tag, search and edit reusable LLM prompts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new prompt
    #[command(display_order = 1)]
    Add {
        /// Prompt name
        name: String,

        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,

        /// Use the external editor ($EDITOR)
        #[arg(short, long)]
        external: bool,
    },

    /// Edit an existing prompt
    #[command(display_order = 2)]
    Edit {
        /// Prompt name
        name: String,

        /// Replace the tags (comma-separated); kept unchanged when omitted
        #[arg(short, long)]
        tags: Option<String>,

        /// Use the external editor ($EDITOR)
        #[arg(short, long)]
        external: bool,
    },

    /// Delete a prompt
    #[command(alias = "rm", display_order = 3)]
    Delete {
        /// Prompt name
        name: String,
    },

    /// List prompts, optionally filtered by tags
    #[command(alias = "ls", display_order = 4)]
    List {
        /// Tags to filter by: "a,b" matches any, "AND:a,b" matches all
        #[arg(short, long)]
        tags: Option<String>,

        /// Require every filter tag (same as the AND: prefix)
        #[arg(long, requires = "tags")]
        all_tags: bool,
    },

    /// Search prompts interactively by name
    #[command(display_order = 5)]
    Search {
        /// Initial search query
        query: Option<String>,
    },

    /// Export all prompts to a JSON file
    #[command(display_order = 10)]
    Export {
        file: PathBuf,
    },

    /// Import prompts from a JSON file
    #[command(display_order = 11)]
    Import {
        file: PathBuf,
    },

    /// Backup the database to a file
    #[command(display_order = 12)]
    Backup {
        file: PathBuf,
    },

    /// Restore the database from a backup file
    #[command(display_order = 13)]
    Restore {
        file: PathBuf,
    },

    /// Get or set configuration (editor, external-editor)
    #[command(display_order = 20)]
    Config {
        /// Configuration key
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// Print the version
    #[command(display_order = 21)]
    Version,
}
