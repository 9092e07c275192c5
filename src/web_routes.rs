use crate::api_state::AppState;
use crate::models::editor_env::EditorSnapshot;
use crate::service::site_time::{parse_date, MEDIUM_DATE_FORMAT};
use chrono::Utc;
use log::error;
use rocket::http::Status;
use rocket::response::Redirect;
use rocket::State;
use rocket_dyn_templates::{context, Template};

/// GET / - Redirect to dashboard
#[get("/")]
pub fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// GET /dashboard - Dashboard page with the backup status of a day and the editor tips
#[get("/dashboard?<date>")]
pub fn dashboard(date: Option<&str>, state: &State<AppState>) -> Result<Template, Status> {
    let now = Utc::now();
    let selected_date = match date {
        Some(date) => parse_date(date).map_err(|_| Status::BadRequest)?,
        None => state.site_today(now),
    };

    let backup_status = state
        .render_backup_status(Some(selected_date), now)
        .map_err(|e| {
            error!("Failed to render backup status: {}", e);
            Status::InternalServerError
        })?;

    let editor = EditorSnapshot::default();
    let tip_links = ["themes", "plugins", "customizer"]
        .iter()
        .map(|section| state.render_tip_link(section, None, None, &editor))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!("Failed to render tip links: {}", e);
            Status::InternalServerError
        })?;

    let previous_date = selected_date.pred_opt().map(|d| d.format("%Y-%m-%d").to_string());
    let next_date = selected_date.succ_opt().map(|d| d.format("%Y-%m-%d").to_string());

    Ok(Template::render(
        "dashboard",
        context! {
            title: "Dashboard",
            site_slug: &state.config().site_slug,
            selected_date: selected_date.format(MEDIUM_DATE_FORMAT).to_string(),
            previous_date,
            next_date,
            backup_status,
            tip_links,
        },
    ))
}
