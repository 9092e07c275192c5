mod api_routes;
mod api_state;
mod models;
mod service;
mod views;
mod web_routes;

use crate::models::config::setup_config;
use crate::models::editor_env::EditorSnapshot;
use crate::service::site_time::parse_date;
use anyhow::{Context, Result};
use api_state::AppState;
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::{debug, info};
use rocket_dyn_templates::Template;

#[macro_use]
extern crate rocket;

fn build_rocket(state: AppState) -> rocket::Rocket<rocket::Build> {
    rocket::build()
        .manage(state)
        .attach(Template::fairing())
        .mount("/", routes![web_routes::index, web_routes::dashboard])
        .mount(
            "/api",
            routes![
                api_routes::tip_link,
                api_routes::backup_status,
                api_routes::backup_state,
                api_routes::health_check,
            ],
        )
}

#[rocket::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(parse_log_level(&args.log_level))
        .format_timestamp_secs()
        .init();

    info!("RustyBackupDashboard starting...");

    // Strip any surrounding quotes from config file path
    let config_file_path = args
        .config_file
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    let config = setup_config(config_file_path).context("Failed to load configuration")?;
    debug!("Loaded config: {:?}", &config);

    if args.validate_only {
        info!("Configuration is valid. Exiting (--validate-only mode).");
        return Ok(());
    }

    let state = AppState::from_config(config).context("Failed to prepare dashboard")?;

    if args.api_mode {
        build_rocket(state).launch().await?;
        return Ok(());
    }

    cli_main(args.command, &state)
}

fn parse_log_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    }
}

#[derive(Parser)]
#[command(name = "RustyBackupDashboard")]
#[command(about = "Backup status and editor tip widgets for a site dashboard", long_about = None)]
struct Cli {
    #[arg(
        short = 'c',
        long = "config",
        default_value = "config.json",
        env = "BACKUP_DASHBOARD_CONFIG"
    )]
    config_file: String,

    #[arg(
        short = 'l',
        long = "log-level",
        default_value = "info",
        env = "LOG_LEVEL"
    )]
    log_level: String,

    #[arg(short = 'v', long = "validate-only")]
    validate_only: bool,

    #[arg(long = "api")]
    api_mode: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the anchor of a contextual editor tip
    Tip {
        /// themes, plugins or customizer
        section: String,
        #[arg(short = 's', long = "subsection")]
        subsection: Option<String>,
        #[arg(long = "post-id")]
        post_id: Option<u64>,
        #[arg(long = "post-type")]
        post_type: Option<String>,
        #[arg(short = 't', long = "text")]
        text: Option<String>,
    },
    /// Print the backup status widget for a day (defaults to today at the site)
    Status {
        #[arg(short = 'd', long = "date")]
        date: Option<String>,
        /// Print the widget content as JSON instead of HTML
        #[arg(long = "json")]
        json: bool,
    },
}

fn cli_main(command: Option<Command>, state: &AppState) -> Result<()> {
    let command = command.unwrap_or(Command::Status {
        date: None,
        json: false,
    });

    match command {
        Command::Tip {
            section,
            subsection,
            post_id,
            post_type,
            text,
        } => {
            let editor = EditorSnapshot { post_id, post_type };
            let html = state
                .render_tip_link(&section, subsection.as_deref(), text.as_deref(), &editor)
                .context("Failed to render tip link")?;
            println!("{}", html);
        }
        Command::Status { date, json } => {
            let date = date
                .as_deref()
                .map(parse_date)
                .transpose()
                .context("Invalid --date")?;
            let now = Utc::now();
            if json {
                let view = state.backup_status_view(date, now);
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                let html = state
                    .render_backup_status(date, now)
                    .context("Failed to render backup status")?;
                println!("{}", html);
            }
        }
    }

    Ok(())
}
