use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Activity name of a completed full backup
pub const BACKUP_COMPLETE_FULL: &str = "rewind__backup_complete_full";

/// Activity names that mark a finished daily backup
const SUCCESSFUL_BACKUP_ACTIVITIES: [&str; 4] = [
    BACKUP_COMPLETE_FULL,
    "rewind__backup_complete_initial",
    "rewind__backup_only_complete_full",
    "rewind__backup_only_complete_initial",
];

const BACKUP_ACTIVITY_PREFIX: &str = "rewind__backup_";

/// One logged backup attempt, as delivered by the activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub activity_ts: DateTime<Utc>,
    #[serde(default)]
    pub rewind_id: Option<String>,
    pub activity_name: String,
    #[serde(default)]
    pub activity_title: String,
    /// Structured description parts; each part may carry `children`
    #[serde(default)]
    pub activity_description: Vec<Value>,
    #[serde(default)]
    pub activity_is_rewindable: bool,
}

impl BackupRecord {
    /// A backup attempt, successful or not
    pub fn is_backup_activity(&self) -> bool {
        self.activity_name.starts_with(BACKUP_ACTIVITY_PREFIX)
    }

    pub fn is_successful_daily_backup(&self) -> bool {
        SUCCESSFUL_BACKUP_ACTIVITIES.contains(&self.activity_name.as_str())
    }

    /// Realtime sites can restore to any rewindable event, not only to
    /// completed daily backups.
    pub fn is_successful_realtime_backup(&self) -> bool {
        if self.is_successful_daily_backup() {
            return true;
        }
        self.activity_is_rewindable
            && self.rewind_id.as_deref().is_some_and(|id| !id.is_empty())
            && !self.activity_name.ends_with("_error")
    }

    /// Success check matching the site's backup tier
    pub fn is_successful(&self, has_realtime_backups: bool) -> bool {
        if has_realtime_backups {
            self.is_successful_realtime_backup()
        } else {
            self.is_successful_daily_backup()
        }
    }

    pub fn is_full_backup(&self) -> bool {
        self.activity_name == BACKUP_COMPLETE_FULL
    }

    /// Short summary of what was backed up: first child of the third
    /// description part, empty when the description is shorter.
    pub fn meta(&self) -> String {
        self.activity_description
            .get(2)
            .and_then(|part| part.get("children"))
            .and_then(|children| children.get(0))
            .map(|child| match child {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .unwrap_or_default()
    }
}
