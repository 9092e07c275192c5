use crate::models::backup_changes::BackupChanges;
use crate::service::site_time::SiteOffset;
use chrono::{DateTime, NaiveDate, Utc};

/// Everything the backup status widget needs besides the record itself.
/// Fixed for the duration of one render.
#[derive(Debug, Clone)]
pub struct DisplayContext {
    pub has_realtime_backups: bool,
    /// Site-local day the user is looking at
    pub selected_date: NaiveDate,
    /// Time of the most recent successful backup on any day
    pub last_date_available: Option<DateTime<Utc>>,
    pub site_offset: SiteOffset,
    pub allow_restore: bool,
    pub site_slug: String,
    pub site_url: String,
    /// Render time; "today" is derived from it
    pub now: DateTime<Utc>,
    /// Change summary for daily sites
    pub changes: Option<BackupChanges>,
}
