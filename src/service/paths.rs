use chrono::NaiveDate;

pub const BACKUP_HELP_GUIDE_URL: &str = "https://jetpack.com/support/backup/";
const CONTACT_SUPPORT_URL: &str = "https://jetpack.com/contact-support/";

pub fn backup_download_path(site_slug: &str, rewind_id: &str) -> String {
    format!("/backups/{}/download/{}", site_slug, rewind_id)
}

pub fn backup_restore_path(site_slug: &str, rewind_id: &str) -> String {
    format!("/backups/{}/restore/{}", site_slug, rewind_id)
}

/// Backup status page of a site for one day
pub fn backups_status_path(site_slug: &str, date: NaiveDate) -> String {
    format!("/backups/{}?date={}", site_slug, date.format("%Y%m%d"))
}

pub fn contact_support_url(site_url: &str) -> String {
    format!("{}?url={}", CONTACT_SUPPORT_URL, urlencoding::encode(site_url))
}
