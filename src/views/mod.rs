use crate::models::error::Result;
use crate::service::backup_status::BackupStatusView;
use crate::service::tip_link::TipLink;
use tera::{Context, Tera};

/// HTML fragments for the dashboard widgets. Templates are compiled into the
/// binary so the CLI and the server render identical markup.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("macros.html", include_str!("templates/macros.html")),
            ("tip_link.html", include_str!("templates/tip_link.html")),
            ("backup_status.html", include_str!("templates/backup_status.html")),
        ])?;
        Ok(Self { tera })
    }

    pub fn render_tip_link(&self, link: &TipLink) -> Result<String> {
        let mut context = Context::new();
        context.insert("link", link);
        Ok(self.tera.render("tip_link.html", &context)?)
    }

    pub fn render_backup_status(&self, view: &BackupStatusView) -> Result<String> {
        let mut context = Context::new();
        context.insert("view", view);
        Ok(self.tera.render("backup_status.html", &context)?)
    }
}
