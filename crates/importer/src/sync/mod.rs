mod manager;
mod stats;

pub use manager::{Reconciled, SyncManager, stage_update};
pub use stats::{SyncReport, SyncStats};
