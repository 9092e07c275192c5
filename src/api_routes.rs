use crate::api_state::AppState;
use crate::models::editor_env::EditorSnapshot;
use crate::models::error::DashboardError;
use crate::service::backup_status::BackupStatusView;
use crate::service::site_time::parse_date;
use chrono::{NaiveDate, Utc};
use log::error;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;

fn selected_date(date: Option<&str>) -> Result<Option<NaiveDate>, Status> {
    date.map(parse_date).transpose().map_err(|e| {
        log::debug!("Rejecting request: {}", e);
        Status::BadRequest
    })
}

fn render_failure(e: DashboardError) -> Status {
    error!("Failed to render widget: {}", e);
    Status::InternalServerError
}

/// GET /api/tip-link/<section> - Contextual tip anchor (HTML fragment)
#[get("/tip-link/<section>?<subsection>&<post_id>&<post_type>&<text>")]
pub fn tip_link(
    section: &str,
    subsection: Option<&str>,
    post_id: Option<u64>,
    post_type: Option<&str>,
    text: Option<&str>,
    state: &State<AppState>,
) -> Result<RawHtml<String>, Status> {
    let editor = EditorSnapshot {
        post_id,
        post_type: post_type.map(str::to_string),
    };
    state
        .render_tip_link(section, subsection, text, &editor)
        .map(RawHtml)
        .map_err(render_failure)
}

/// GET /api/backup-status - Backup status widget for a day (HTML fragment)
#[get("/backup-status?<date>")]
pub fn backup_status(
    date: Option<&str>,
    state: &State<AppState>,
) -> Result<RawHtml<String>, Status> {
    let date = selected_date(date)?;
    state
        .render_backup_status(date, Utc::now())
        .map(RawHtml)
        .map_err(render_failure)
}

/// GET /api/backup-state - Backup status widget content for a day (JSON)
#[get("/backup-state?<date>")]
pub fn backup_state(
    date: Option<&str>,
    state: &State<AppState>,
) -> Result<Json<BackupStatusView>, Status> {
    let date = selected_date(date)?;
    Ok(Json(state.backup_status_view(date, Utc::now())))
}

/// GET /api/health - Health check endpoint
#[get("/health")]
pub fn health_check() -> &'static str {
    "OK"
}
