use std::path::Path;
use storage::dto::hackathon::HackathonSummary;
use storage::models::HackathonRecord;

use crate::Result;

/// Writes the full records as pretty-printed camelCase JSON.
pub async fn write_records(path: &Path, records: &[HackathonRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_file(path, json).await?;
    tracing::info!("Saved {} hackathons to {}", records.len(), path.display());
    Ok(())
}

/// Writes the flattened summary view consumed by lightweight clients.
pub async fn write_summaries(path: &Path, records: &[HackathonRecord]) -> Result<()> {
    let summaries: Vec<HackathonSummary> = records.iter().map(HackathonSummary::from).collect();
    let json = serde_json::to_string_pretty(&summaries)?;
    write_file(path, json).await?;
    tracing::info!("Saved simplified format to {}", path.display());
    Ok(())
}

pub async fn load_records(path: &Path) -> Result<Vec<HackathonRecord>> {
    let content = tokio::fs::read_to_string(path).await?;
    let records: Vec<HackathonRecord> = serde_json::from_str(&content)?;
    tracing::info!("Loaded {} hackathons from {}", records.len(), path.display());
    Ok(records)
}

async fn write_file(path: &Path, contents: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, contents).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImporterError;
    use chrono::{Duration, TimeZone, Utc};
    use std::path::PathBuf;
    use storage::models::Schedule;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("importer-output-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    fn record(title: &str) -> HackathonRecord {
        let start = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap();
        HackathonRecord::new(
            title,
            Schedule::clamped(start - Duration::days(3), start, start + Duration::days(2)),
        )
    }

    #[tokio::test]
    async fn test_write_then_load_records() {
        let path = scratch("nested/hackathons.json");
        let records = vec![record("One"), record("Two")];

        write_records(&path, &records).await.unwrap();
        let loaded = load_records(&path).await.unwrap();

        assert_eq!(loaded, records);
        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("\"startDate\""));
        assert!(raw.contains("\"registrationDeadline\""));
    }

    #[tokio::test]
    async fn test_write_summaries() {
        let path = scratch("simple.json");
        write_summaries(&path, &[record("One")]).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["title"], "One");
        assert!(value[0].get("totalPrize").is_some());
    }

    #[tokio::test]
    async fn test_load_malformed_json() {
        let path = scratch("broken.json");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "[{\"title\": ").await.unwrap();

        let err = load_records(&path).await.unwrap_err();
        assert!(matches!(err, ImporterError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_records(&scratch("absent.json")).await.unwrap_err();
        assert!(matches!(err, ImporterError::IoError(_)));
    }
}
