use clap::{Parser, Subcommand};

/// CLI for debugging and development against a SearchAV backend
#[derive(Parser)]
#[command(name = "searchav-client")]
#[command(about = "Search and inspect videos on a SearchAV backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search videos across the backend's sources
    Search {
        /// Query to search for
        query: String,
        /// Include adult-flagged sources regardless of the stored preference
        #[arg(long)]
        adult: bool,
    },
    /// Fetch full detail for one title
    Detail {
        /// Source code the title was found on
        source: String,
        /// Vod id within that source
        id: i64,
    },
    /// Save the backend password
    Login {
        /// Password to store
        password: String,
    },
    /// Clear the saved password
    Logout,
    /// Toggle the adult-content preference
    Adult {
        /// "on" or "off"
        state: String,
    },
}
