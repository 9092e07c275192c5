use crate::models::backup_changes::BackupChanges;
use crate::models::backup_record::BackupRecord;
use crate::models::backup_state::BackupState;
use crate::models::display_context::DisplayContext;
use crate::service::paths::{
    backup_download_path, backup_restore_path, backups_status_path, contact_support_url,
    BACKUP_HELP_GUIDE_URL,
};
use crate::service::site_time::{
    apply_site_offset, format_time, is_same_day, SiteOffset, MEDIUM_DATE_FORMAT,
    MONTH_DAY_FORMAT, SHORT_DATE_FORMAT,
};
use crate::service::translate::{interpolate_components, sprintf, LinkComponent, Translator};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike, Utc};
use serde::Serialize;

/// Hours added on top of the time left until the usual backup hour
pub const NEXT_BACKUP_SAFETY_MARGIN_HOURS: i64 = 3;

/// A link styled as a button. Disabled buttons carry no target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionButton {
    pub label: String,
    pub class_name: &'static str,
    pub href: Option<String>,
    pub disabled: bool,
    pub primary: bool,
    pub new_tab: bool,
}

impl ActionButton {
    fn link(label: String, class_name: &'static str, href: Option<String>, disabled: bool) -> Self {
        let disabled = disabled || href.is_none();
        Self {
            label,
            class_name,
            href: if disabled { None } else { href },
            disabled,
            primary: true,
            new_tab: false,
        }
    }

    fn secondary(mut self) -> Self {
        self.primary = false;
        self
    }

    fn in_new_tab(mut self) -> Self {
        self.new_tab = true;
        self
    }
}

/// Condensed activity card shown under a realtime backup that is not a
/// full backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub title: String,
    pub display_date: String,
    pub meta: String,
    pub restore: Option<ActionButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeGroup {
    pub label: String,
    pub items: Vec<String>,
}

/// What changed since the previous daily backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub title: String,
    pub groups: Vec<ChangeGroup>,
    pub counts: Vec<String>,
    pub empty_message: Option<String>,
}

/// Display-ready content of the widget, one variant per [`BackupState`].
/// Fields ending in `_html` are already escaped markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BackupStatusView {
    Good {
        title: String,
        display_date: String,
        meta: String,
        actions: Vec<ActionButton>,
        details: Option<ActivitySummary>,
        changes: Option<ChangeSummary>,
    },
    Failed {
        title: String,
        display_date: String,
        attempt_message: String,
        help_html: String,
        support: ActionButton,
    },
    NeverBackedUp {
        title: String,
        message: String,
        support: ActionButton,
    },
    NoneToday {
        title: String,
        next_backup: String,
        hours_for_next_backup: i64,
        last_backup_html: String,
        actions: Vec<ActionButton>,
    },
    NoneOnDate {
        title: String,
        delayed_message: String,
        next_day_html: String,
        support: ActionButton,
    },
}

impl BackupStatusView {
    pub fn state_name(&self) -> &'static str {
        match self {
            BackupStatusView::Good { .. } => "good",
            BackupStatusView::Failed { .. } => "failed",
            BackupStatusView::NeverBackedUp { .. } => "never_backed_up",
            BackupStatusView::NoneToday { .. } => "none_today",
            BackupStatusView::NoneOnDate { .. } => "none_on_date",
        }
    }
}

pub fn build_backup_status_view(
    backup: Option<&BackupRecord>,
    ctx: &DisplayContext,
    t: &dyn Translator,
) -> BackupStatusView {
    match BackupState::select(backup, ctx) {
        BackupState::Good(backup) => good_backup(backup, ctx, t),
        BackupState::Failed(backup) => failed_backup(backup, ctx, t),
        BackupState::NeverBackedUp => never_backed_up(ctx, t),
        BackupState::NoneToday { last_backup } => no_backup_today(last_backup, ctx, t),
        BackupState::NoneOnDate { date } => no_backup_on_date(date, ctx, t),
    }
}

/// Date label of a backup: "Today 2:05 PM" for the current site-local day,
/// "Oct 3, 2:05 PM" otherwise, with the year added when it is not the current
/// one. `with_latest` prefixes "Latest: ".
pub fn display_date(
    ts: DateTime<Utc>,
    with_latest: bool,
    offset: &SiteOffset,
    now: DateTime<Utc>,
    t: &dyn Translator,
) -> String {
    let backup_date = apply_site_offset(ts, offset);
    let today = apply_site_offset(now, offset);

    let is_today = is_same_day(&today, &backup_date);
    let date_format = if today.year() == backup_date.year() {
        MONTH_DAY_FORMAT
    } else {
        MEDIUM_DATE_FORMAT
    };
    let display_time = format_time(&backup_date);

    match (is_today, with_latest) {
        (true, true) => sprintf(&t.translate("Latest: Today %s"), &[display_time.as_str()], &[]),
        (true, false) => sprintf(&t.translate("Today %s"), &[display_time.as_str()], &[]),
        (false, true) => {
            let date = format!("{}, {}", backup_date.format(date_format), display_time);
            sprintf(&t.translate("Latest: %s"), &[date.as_str()], &[])
        }
        (false, false) => format!("{}, {}", backup_date.format(date_format), display_time),
    }
}

/// Hours until the next daily backup is expected, from the hour of day the
/// last one ran at. Negative when that hour has already passed today.
pub fn next_backup_hours(
    last_backup: &DateTime<FixedOffset>,
    today: &DateTime<FixedOffset>,
) -> i64 {
    i64::from(last_backup.hour()) - i64::from(today.hour()) + NEXT_BACKUP_SAFETY_MARGIN_HOURS
}

fn support_button(ctx: &DisplayContext, t: &dyn Translator) -> ActionButton {
    ActionButton::link(
        t.translate("Contact support"),
        "backup-status__support-button",
        Some(contact_support_url(&ctx.site_url)),
        false,
    )
    .secondary()
    .in_new_tab()
}

fn action_buttons(
    site_slug: Option<&str>,
    rewind_id: Option<&str>,
    disabled_download: bool,
    disabled_restore: bool,
    t: &dyn Translator,
) -> Vec<ActionButton> {
    let target = site_slug.zip(rewind_id);
    vec![
        ActionButton::link(
            t.translate("Download backup"),
            "backup-status__download-button",
            target.map(|(slug, id)| backup_download_path(slug, id)),
            disabled_download,
        )
        .secondary(),
        ActionButton::link(
            t.translate("Restore to this point"),
            "backup-status__restore-button",
            target.map(|(slug, id)| backup_restore_path(slug, id)),
            disabled_restore,
        ),
    ]
}

fn good_backup(
    backup: &BackupRecord,
    ctx: &DisplayContext,
    t: &dyn Translator,
) -> BackupStatusView {
    let show_details = ctx.has_realtime_backups && !backup.is_full_backup();

    BackupStatusView::Good {
        title: t.translate("Latest backup"),
        display_date: display_date(backup.activity_ts, true, &ctx.site_offset, ctx.now, t),
        meta: backup.meta(),
        actions: action_buttons(
            Some(&ctx.site_slug),
            backup.rewind_id.as_deref(),
            false,
            !ctx.allow_restore,
            t,
        ),
        details: show_details.then(|| activity_summary(backup, ctx, t)),
        changes: (!ctx.has_realtime_backups)
            .then(|| change_summary(ctx.changes.as_ref(), t)),
    }
}

fn activity_summary(
    backup: &BackupRecord,
    ctx: &DisplayContext,
    t: &dyn Translator,
) -> ActivitySummary {
    let restore = match (ctx.allow_restore, backup.rewind_id.as_deref()) {
        (true, Some(rewind_id)) => Some(
            ActionButton::link(
                t.translate("Restore to this point"),
                "backup-status__activity-restore",
                Some(backup_restore_path(&ctx.site_slug, rewind_id)),
                false,
            )
            .secondary(),
        ),
        _ => None,
    };

    ActivitySummary {
        title: backup.activity_title.clone(),
        display_date: display_date(backup.activity_ts, false, &ctx.site_offset, ctx.now, t),
        meta: backup.meta(),
        restore,
    }
}

fn change_summary(changes: Option<&BackupChanges>, t: &dyn Translator) -> ChangeSummary {
    let title = t.translate("Backup details");
    let changes = match changes.filter(|c| !c.is_empty()) {
        Some(changes) => changes,
        None => {
            return ChangeSummary {
                title,
                groups: vec![],
                counts: vec![],
                empty_message: Some(t.translate(
                    "Looks like there have been no new changes since your last backup.",
                )),
            }
        }
    };

    let deltas = &changes.deltas;
    let groups = [
        ("Media uploaded", &deltas.media_created),
        ("Media removed", &deltas.media_deleted),
        ("Posts published", &deltas.posts_created),
        ("Posts removed", &deltas.posts_deleted),
        ("Plugins", &deltas.plugins),
        ("Themes", &deltas.themes),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(label, items)| ChangeGroup {
        label: t.translate(label),
        items: items.clone(),
    })
    .collect();

    let counts = changes
        .meta_diff
        .iter()
        .filter(|entry| entry.num != 0)
        .map(|entry| {
            let num = format!("{:+}", entry.num);
            sprintf(
                &t.translate("%(num)s %(name)s"),
                &[],
                &[("num", num.as_str()), ("name", entry.name.as_str())],
            )
        })
        .collect();

    ChangeSummary {
        title,
        groups,
        counts,
        empty_message: None,
    }
}

fn failed_backup(
    backup: &BackupRecord,
    ctx: &DisplayContext,
    t: &dyn Translator,
) -> BackupStatusView {
    let backup_date = apply_site_offset(backup.activity_ts, &ctx.site_offset);
    let attempt_date = backup_date.format(SHORT_DATE_FORMAT).to_string();
    let attempt_time = format_time(&backup_date);

    let attempt_message = sprintf(
        &t.translate(
            "A backup for your site was attempted on %(displayDate)s at %(displayTime)s and was not able to be completed.",
        ),
        &[],
        &[("displayDate", attempt_date.as_str()), ("displayTime", attempt_time.as_str())],
    );
    let help_html = interpolate_components(
        &t.translate(
            "Check out the {{a}}backups help guide{{/a}} or contact our support team to resolve the issue.",
        ),
        &[LinkComponent {
            name: "a",
            href: BACKUP_HELP_GUIDE_URL,
            new_tab: true,
        }],
    );

    BackupStatusView::Failed {
        title: t.translate("Backup failed"),
        display_date: display_date(backup.activity_ts, false, &ctx.site_offset, ctx.now, t),
        attempt_message,
        help_html,
        support: support_button(ctx, t),
    }
}

fn never_backed_up(ctx: &DisplayContext, t: &dyn Translator) -> BackupStatusView {
    BackupStatusView::NeverBackedUp {
        title: t.translate("No backups are available yet."),
        message: t.translate(
            "But don’t worry, one should become available in the next 24 hours. Contact support if you still need help.",
        ),
        support: support_button(ctx, t),
    }
}

fn no_backup_today(
    last_backup: DateTime<Utc>,
    ctx: &DisplayContext,
    t: &dyn Translator,
) -> BackupStatusView {
    let today = apply_site_offset(ctx.now, &ctx.site_offset);
    let yesterday = today - Duration::days(1);
    let last_backup = apply_site_offset(last_backup, &ctx.site_offset);

    let last_backup_day = if is_same_day(&last_backup, &yesterday) {
        t.translate("Yesterday ")
    } else {
        last_backup.format(MEDIUM_DATE_FORMAT).to_string()
    };
    let last_backup_time = format_time(&last_backup);

    let hours = next_backup_hours(&last_backup, &today);
    let next_backup = sprintf(
        &t.translate_plural("In the next %d hour", "In the next %d hours", hours),
        &[hours.to_string().as_str()],
        &[],
    );

    let status_path = backups_status_path(&ctx.site_slug, last_backup.date_naive());
    let last_backup_html = interpolate_components(
        &sprintf(
            &t.translate(
                "Last daily backup: {{link}}%(lastBackupDay)s %(lastBackupTime)s{{/link}}",
            ),
            &[],
            &[
                ("lastBackupDay", last_backup_day.as_str()),
                ("lastBackupTime", last_backup_time.as_str()),
            ],
        ),
        &[LinkComponent {
            name: "link",
            href: &status_path,
            new_tab: false,
        }],
    );

    BackupStatusView::NoneToday {
        title: t.translate("Backup Scheduled:"),
        next_backup,
        hours_for_next_backup: hours,
        last_backup_html,
        actions: action_buttons(None, None, true, true, t),
    }
}

fn no_backup_on_date(
    date: NaiveDate,
    ctx: &DisplayContext,
    t: &dyn Translator,
) -> BackupStatusView {
    let display_date = date.format(MEDIUM_DATE_FORMAT).to_string();
    let next_date = date.succ_opt().unwrap_or(date);
    let display_next_date = next_date.format(MEDIUM_DATE_FORMAT).to_string();
    let next_day_path = backups_status_path(&ctx.site_slug, next_date);

    BackupStatusView::NoneOnDate {
        title: t.translate("No backup"),
        delayed_message: sprintf(
            &t.translate("The backup attempt for %(displayDate)s was delayed."),
            &[],
            &[("displayDate", display_date.as_str())],
        ),
        next_day_html: interpolate_components(
            &sprintf(
                &t.translate(
                    "But don’t worry, it was likely completed in the early hours the next morning. Check the following day, {{link}}%(displayNextDate)s{{/link}} or contact support if you still need help.",
                ),
                &[],
                &[("displayNextDate", display_next_date.as_str())],
            ),
            &[LinkComponent {
                name: "link",
                href: &next_day_path,
                new_tab: false,
            }],
        ),
        support: support_button(ctx, t),
    }
}
