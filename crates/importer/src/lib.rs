pub mod classify;
pub mod config;
pub mod error;
pub mod output;
pub mod prizes;
pub mod sources;
pub mod synthesizer;
pub mod sync;
pub mod traits;

pub use config::{Pacing, ScrapeConfig, SyncConfig};
pub use error::{ImporterError, Result};
pub use sync::{SyncManager, SyncReport, SyncStats};
pub use synthesizer::Synthesizer;
pub use traits::{FieldStrategy, PageFetcher};

// Re-export Unstop types
pub use sources::unstop::{HttpFetcher, ScrapeReport, UnstopScraper};
