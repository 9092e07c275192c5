use crate::models::backup_changes::BackupChanges;
use crate::models::backup_record::BackupRecord;
use crate::models::error::{DashboardError, Result};
use crate::service::site_time::{site_date, SiteOffset};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Exported activity log of a site: backup activities plus the change
/// summaries computed for each day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityLog {
    #[serde(default)]
    pub activities: Vec<BackupRecord>,
    /// Keyed by site-local date
    #[serde(default)]
    pub changes: HashMap<NaiveDate, BackupChanges>,
}

impl ActivityLog {
    pub fn load(log_file: &str) -> Result<Self> {
        let path = PathBuf::from(log_file);
        info!("Loading activity log from: {}", path.display());

        let content = fs::read_to_string(&path).map_err(|cause| DashboardError::ActivityLogRead {
            path: path.clone(),
            cause,
        })?;
        let log: ActivityLog = serde_json::from_str(&content)
            .map_err(|cause| DashboardError::ActivityLogParse { path, cause })?;

        info!(
            "Loaded {} activities and {} change summaries",
            log.activities.len(),
            log.changes.len()
        );
        Ok(log)
    }

    /// Latest backup attempt recorded on a site-local day. Realtime sites
    /// count any rewindable activity as a backup point.
    pub fn backup_for_date(
        &self,
        date: NaiveDate,
        offset: &SiteOffset,
        has_realtime_backups: bool,
    ) -> Option<&BackupRecord> {
        let backup = self
            .activities
            .iter()
            .filter(|activity| {
                activity.is_backup_activity()
                    || (has_realtime_backups && activity.activity_is_rewindable)
            })
            .filter(|activity| site_date(activity.activity_ts, offset) == date)
            .max_by_key(|activity| activity.activity_ts);

        debug!(
            "Backup for {}: {}",
            date,
            backup.map_or("none", |b| b.activity_name.as_str())
        );
        backup
    }

    /// Time of the most recent successful backup, on any day
    pub fn last_date_available(&self, has_realtime_backups: bool) -> Option<DateTime<Utc>> {
        self.activities
            .iter()
            .filter(|activity| activity.is_successful(has_realtime_backups))
            .map(|activity| activity.activity_ts)
            .max()
    }

    pub fn changes_for(&self, date: NaiveDate) -> Option<&BackupChanges> {
        self.changes.get(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LOG: &str = r#"{
        "activities": [
            { "activityTs": 1760572800000, "rewindId": "a", "activityName": "rewind__backup_complete_full" },
            { "activityTs": 1760590800000, "rewindId": "b", "activityName": "post__published", "activityIsRewindable": true },
            { "activityTs": 1760659200000, "activityName": "rewind__backup_error" }
        ],
        "changes": {
            "2025-10-16": { "deltas": { "themes": ["Twenty Twenty-Five"] } }
        }
    }"#;

    fn log() -> ActivityLog {
        serde_json::from_str(LOG).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_backup_for_date_daily_ignores_other_activities() {
        // 2025-10-16 00:00 and 05:00 UTC
        let backup = log()
            .backup_for_date(date(2025, 10, 16), &SiteOffset::default(), false)
            .cloned();
        assert_eq!(backup.unwrap().rewind_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_backup_for_date_realtime_picks_latest_rewindable() {
        let log = log();
        let backup = log.backup_for_date(date(2025, 10, 16), &SiteOffset::default(), true);
        assert_eq!(backup.unwrap().rewind_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_backup_for_date_respects_site_offset() {
        let offset = SiteOffset {
            timezone: None,
            gmt_offset: -6.0,
        };
        // 2025-10-16 00:00 UTC is Oct 15 evening at UTC-6
        let log = log();
        let backup = log.backup_for_date(date(2025, 10, 15), &offset, false);
        assert_eq!(backup.unwrap().rewind_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_failed_attempt_is_still_the_days_backup() {
        let log = log();
        let backup = log.backup_for_date(date(2025, 10, 17), &SiteOffset::default(), false);
        assert_eq!(backup.unwrap().activity_name, "rewind__backup_error");
        assert!(log
            .backup_for_date(date(2025, 10, 18), &SiteOffset::default(), false)
            .is_none());
    }

    #[test]
    fn test_last_date_available_skips_failures() {
        let log = log();
        assert_eq!(
            log.last_date_available(false).map(|ts| ts.timestamp_millis()),
            Some(1760572800000)
        );
        assert_eq!(
            log.last_date_available(true).map(|ts| ts.timestamp_millis()),
            Some(1760590800000)
        );
        assert_eq!(ActivityLog::default().last_date_available(false), None);
    }

    #[test]
    fn test_changes_for_date() {
        let log = log();
        assert!(log.changes_for(date(2025, 10, 16)).is_some());
        assert!(log.changes_for(date(2025, 10, 17)).is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(LOG.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let log = ActivityLog::load(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(log.activities.len(), 3);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            ActivityLog::load("/this/does/not/exist.json"),
            Err(DashboardError::ActivityLogRead { .. })
        ));

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ \"activities\": [ { } ] }").unwrap();
        temp_file.flush().unwrap();
        assert!(matches!(
            ActivityLog::load(temp_file.path().to_str().unwrap()),
            Err(DashboardError::ActivityLogParse { .. })
        ));
    }
}
