pub mod client;
pub mod config;
pub mod error;
pub mod prefs;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::client::{Client, AUTH_HEADER};
    pub use crate::config::ClientConfig;
    pub use crate::error::ApiError;
    pub use crate::prefs::{DiskStore, KeyValueStore, MemoryStore, NoopStore, Preferences};
    pub use crate::types::{
        DetailResponse, SearchResponse, SourceInfo, SourceListItem, SourcesResponse, VideoDetail,
        VideoResult,
    };
}

pub use client::Client;
pub use config::ClientConfig;
pub use error::ApiError;
pub use prefs::Preferences;
