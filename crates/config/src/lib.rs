//! Chamados client configuration
use clap::{Parser, Subcommand};
use url::Url;

/// Default backend address.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Backend connection options
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// Base URL of the chamados backend
    #[clap(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: Url,
    /// Per-request timeout in seconds. No timeout when unset.
    #[clap(long, env = "API_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

/// Operations on incidents
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all incidents
    List,
    /// Show a single incident
    Get {
        /// Incident id
        id: String,
    },
    /// Open a new incident
    Create {
        /// Title
        #[clap(long)]
        title: String,
        /// Description
        #[clap(long)]
        description: String,
        /// Department
        #[clap(long)]
        department: String,
        /// Priority label (low, medium, high, critical). Unknown labels mean low.
        #[clap(long, default_value = "low")]
        priority: String,
        /// Id of the reporting user
        #[clap(long)]
        user_id: u64,
    },
    /// Update fields of an incident. Values are sent to the backend unchanged.
    Update {
        /// Incident id
        id: String,
        /// New title
        #[clap(long)]
        title: Option<String>,
        /// New description
        #[clap(long)]
        description: Option<String>,
        /// New status
        #[clap(long)]
        status: Option<String>,
        /// New priority, as the backend expects it
        #[clap(long)]
        priority: Option<String>,
        /// New ticket code
        #[clap(long)]
        code: Option<String>,
    },
    /// Delete an incident
    Delete {
        /// Incident id
        id: String,
    },
    /// Free-text search
    Search {
        /// Search text
        query: String,
    },
    /// Filter incidents. Omitted criteria are not sent.
    Filter {
        /// Status
        #[clap(long)]
        status: Option<String>,
        /// Priority label (low, medium, high, critical)
        #[clap(long)]
        priority: Option<String>,
        /// Department
        #[clap(long)]
        department: Option<String>,
    },
}

/// CLI options for chamados
#[derive(Debug, Clone, Parser)]
#[clap(name = "chamados", about = "Command-line client for the chamados incident backend")]
pub struct Opts {
    /// Backend connection configuration
    #[clap(flatten)]
    pub api: ApiOpts,

    /// Operation to run
    #[clap(subcommand)]
    pub command: Command,
}
