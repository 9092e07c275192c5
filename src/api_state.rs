use crate::models::config::Config;
use crate::models::display_context::DisplayContext;
use crate::models::editor_env::{EditorEnvironment, EditorState};
use crate::models::error::Result;
use crate::models::tip_section::TipSection;
use crate::service::activity_log::ActivityLog;
use crate::service::backup_status::{build_backup_status_view, BackupStatusView};
use crate::service::site_time::{site_date, SiteOffset};
use crate::service::tip_link::build_tip_link;
use crate::service::translate::{CatalogTranslator, EnglishTranslator, Translator};
use crate::views::Renderer;
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

/// Shared, read-only state of the dashboard. Everything is fixed at startup.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,

    /// Editor environment derived from the config once
    environment: Arc<EditorEnvironment>,

    activity_log: Arc<ActivityLog>,

    translator: Arc<dyn Translator>,

    renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(
        config: Config,
        activity_log: ActivityLog,
        translator: Arc<dyn Translator>,
    ) -> Result<Self> {
        Ok(Self {
            environment: Arc::new(config.editor_environment()),
            config: Arc::new(config),
            activity_log: Arc::new(activity_log),
            translator,
            renderer: Arc::new(Renderer::new()?),
        })
    }

    /// Loads the activity log and translations named in the config. Missing or
    /// unreadable files are logged and replaced by an empty log and English.
    pub fn from_config(config: Config) -> Result<Self> {
        let activity_log = match &config.activity_log_file {
            Some(file) => ActivityLog::load(file).unwrap_or_else(|e| {
                warn!("{}. Starting with an empty activity log.", e);
                ActivityLog::default()
            }),
            None => {
                info!("No activity_log_file configured, starting with an empty activity log");
                ActivityLog::default()
            }
        };

        let translator: Arc<dyn Translator> = match &config.translations_file {
            Some(file) => match CatalogTranslator::load(file) {
                Ok(catalog) => Arc::new(catalog),
                Err(e) => {
                    warn!("{}. Falling back to English.", e);
                    Arc::new(EnglishTranslator)
                }
            },
            None => Arc::new(EnglishTranslator),
        };

        Self::new(config, activity_log, translator)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn site_offset(&self) -> SiteOffset {
        self.config.site_offset()
    }

    /// Site-local day for an instant, used when no date is selected
    pub fn site_today(&self, now: DateTime<Utc>) -> NaiveDate {
        site_date(now, &self.site_offset())
    }

    pub fn display_context(
        &self,
        selected_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> DisplayContext {
        let selected_date = selected_date.unwrap_or_else(|| self.site_today(now));
        let realtime = self.config.has_realtime_backups;

        DisplayContext {
            has_realtime_backups: realtime,
            selected_date,
            last_date_available: self.activity_log.last_date_available(realtime),
            site_offset: self.site_offset(),
            allow_restore: self.config.allow_restore,
            site_slug: self.config.site_slug.clone(),
            site_url: self.config.site_url.clone(),
            now,
            changes: self.activity_log.changes_for(selected_date).cloned(),
        }
    }

    pub fn backup_status_view(
        &self,
        selected_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> BackupStatusView {
        let ctx = self.display_context(selected_date, now);
        let backup = self.activity_log.backup_for_date(
            ctx.selected_date,
            &ctx.site_offset,
            ctx.has_realtime_backups,
        );
        build_backup_status_view(backup, &ctx, self.translator.as_ref())
    }

    pub fn render_backup_status(
        &self,
        selected_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let view = self.backup_status_view(selected_date, now);
        self.renderer.render_backup_status(&view)
    }

    pub fn render_tip_link(
        &self,
        section_tag: &str,
        subsection: Option<&str>,
        text: Option<&str>,
        editor: &dyn EditorState,
    ) -> Result<String> {
        let section = TipSection::from_tag(section_tag);
        let text = match text {
            Some(text) => text.to_string(),
            None => self.translator.translate(default_link_text(&section)),
        };
        let link = build_tip_link(&section, subsection, &text, &self.environment, editor);
        self.renderer.render_tip_link(&link)
    }
}

fn default_link_text(section: &TipSection) -> &'static str {
    match section {
        TipSection::Themes => "Browse themes",
        TipSection::Plugins => "Explore plugins",
        TipSection::Customizer => "Open the Customizer",
        TipSection::Unknown(_) => "Learn more",
    }
}
