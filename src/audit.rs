use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

use crate::model::work_result::WorkResult;

pub fn works_log_path<Tz: TimeZone>(dir: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    dir.join(format!("works_{}.csv", now.format("%Y%m%d%H%M%S")))
}

/// Write the run's audit log and return its path.
pub fn write_works_log<Tz: TimeZone>(
    dir: &Path,
    results: &[WorkResult],
    now: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = works_log_path(dir, now);

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    if results.is_empty() {
        writer.write_record(["title", "source_url", "target_url", "outcome"])?;
    }
    for result in results {
        writer.serialize(result)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
