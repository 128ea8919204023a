use storage::models::HackathonStatus;
use storage::services::StatusRefresh;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub new_hackathons: usize,
    pub updated_hackathons: usize,
    pub duplicates_skipped: usize,
    pub status_updates: usize,
    pub expired_filtered: usize,
    pub invalid_skipped: usize,
    pub failed: usize,
}

/// Everything one sync run did, plus the resulting store breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub stats: SyncStats,
    pub sweep: StatusRefresh,
    pub trash_purged: u64,
    pub status_breakdown: Vec<(HackathonStatus, i64)>,
}

impl SyncReport {
    pub fn total_hackathons(&self) -> i64 {
        self.status_breakdown
            .iter()
            .filter(|(status, _)| *status != HackathonStatus::Trashed)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn log_summary(&self) {
        let stats = &self.stats;
        info!("Hackathon sync completed");
        info!("  New hackathons added: {}", stats.new_hackathons);
        info!("  Existing hackathons updated: {}", stats.updated_hackathons);
        info!("  Duplicates skipped: {}", stats.duplicates_skipped);
        info!("  Status updates: {}", stats.status_updates);
        info!("  Expired candidates dropped: {}", stats.expired_filtered);
        if stats.invalid_skipped > 0 || stats.failed > 0 {
            info!(
                "  Invalid candidates: {}, failed writes: {}",
                stats.invalid_skipped, stats.failed
            );
        }
        info!("  Status sweep changes: {}", self.sweep.changed);
        info!("  Trash entries purged: {}", self.trash_purged);
        info!("Current database: {} total hackathons", self.total_hackathons());
        for (status, count) in &self.status_breakdown {
            info!("  {}: {}", status, count);
        }
    }
}
