use crate::models::backup_record::BackupRecord;
use crate::models::display_context::DisplayContext;
use crate::service::site_time::site_date;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;

/// Which fragment the backup status widget shows
#[derive(Debug, Clone, PartialEq)]
pub enum BackupState<'a> {
    /// The record passed the success check for the site's tier
    Good(&'a BackupRecord),
    Failed(&'a BackupRecord),
    /// The site has never produced a backup
    NeverBackedUp,
    /// Today's backup has not run yet
    NoneToday { last_backup: DateTime<Utc> },
    /// Nothing was recorded for a past day
    NoneOnDate { date: NaiveDate },
}

impl<'a> BackupState<'a> {
    /// Picks the state for a record (or its absence). The checks run in
    /// priority order: record first, then history, then the calendar.
    pub fn select(backup: Option<&'a BackupRecord>, ctx: &DisplayContext) -> Self {
        let state = if let Some(backup) = backup {
            if backup.is_successful(ctx.has_realtime_backups) {
                BackupState::Good(backup)
            } else {
                BackupState::Failed(backup)
            }
        } else if let Some(last_backup) = ctx.last_date_available {
            let today = site_date(ctx.now, &ctx.site_offset);
            if ctx.selected_date == today {
                BackupState::NoneToday { last_backup }
            } else {
                BackupState::NoneOnDate {
                    date: ctx.selected_date,
                }
            }
        } else {
            BackupState::NeverBackedUp
        };

        debug!("Backup status for {}: {}", ctx.selected_date, state.name());
        state
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackupState::Good(_) => "good",
            BackupState::Failed(_) => "failed",
            BackupState::NeverBackedUp => "never_backed_up",
            BackupState::NoneToday { .. } => "none_today",
            BackupState::NoneOnDate { .. } => "none_on_date",
        }
    }
}
