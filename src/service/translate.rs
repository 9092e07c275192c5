use crate::models::error::{DashboardError, Result};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tera::escape_html;

/// Looks up the localized form of a message.
///
/// Message ids are the English source strings, placeholders included;
/// interpolation happens afterwards with [`sprintf`].
pub trait Translator: Send + Sync {
    fn translate(&self, msgid: &str) -> String;
    fn translate_plural(&self, single: &str, plural: &str, count: i64) -> String;
}

/// Returns the English source strings unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTranslator;

impl Translator for EnglishTranslator {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }

    fn translate_plural(&self, single: &str, plural: &str, count: i64) -> String {
        english_plural(single, plural, count).to_string()
    }
}

fn english_plural<'a>(single: &'a str, plural: &'a str, count: i64) -> &'a str {
    if count == 1 {
        single
    } else {
        plural
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Single(String),
    Forms(Vec<String>),
}

/// Translations loaded from a JSON object mapping message ids to either a
/// string or `[singular, plural]`. Missing entries fall back to English.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    messages: HashMap<String, CatalogEntry>,
}

impl CatalogTranslator {
    pub fn load(catalog_file: &str) -> Result<Self> {
        let path = PathBuf::from(catalog_file);
        info!("Loading translations from: {}", path.display());

        let content = fs::read_to_string(&path).map_err(|cause| DashboardError::CatalogRead {
            path: path.clone(),
            cause,
        })?;
        Self::from_json(&content).map_err(|cause| DashboardError::CatalogParse { path, cause })
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let messages: HashMap<String, CatalogEntry> = serde_json::from_str(content)?;
        debug!("Loaded {} translated messages", messages.len());
        Ok(Self { messages })
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, msgid: &str) -> String {
        match self.messages.get(msgid) {
            Some(CatalogEntry::Single(text)) => text.clone(),
            Some(CatalogEntry::Forms(forms)) => forms
                .first()
                .cloned()
                .unwrap_or_else(|| msgid.to_string()),
            None => msgid.to_string(),
        }
    }

    fn translate_plural(&self, single: &str, plural: &str, count: i64) -> String {
        let index = if count == 1 { 0 } else { 1 };
        match self.messages.get(single) {
            Some(CatalogEntry::Forms(forms)) => forms
                .get(index)
                .or_else(|| forms.first())
                .cloned()
                .unwrap_or_else(|| english_plural(single, plural, count).to_string()),
            Some(CatalogEntry::Single(text)) => text.clone(),
            None => english_plural(single, plural, count).to_string(),
        }
    }
}

/// Fills `%s`/`%d` from `positional` in order and `%(name)s` from `named`.
/// `%%` is a literal percent sign; anything unrecognised is left untouched.
pub fn sprintf(template: &str, positional: &[&str], named: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next_positional = positional.iter();
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('%') {
            out.push('%');
            rest = tail;
        } else if let Some(tail) = after.strip_prefix('s').or_else(|| after.strip_prefix('d')) {
            match next_positional.next() {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[pos..pos + 2]),
            }
            rest = tail;
        } else if let Some(named_arg) = after.strip_prefix('(') {
            let resolved = named_arg.find(')').and_then(|close| {
                let name = &named_arg[..close];
                let tail = &named_arg[close + 1..];
                let tail = tail.strip_prefix('s').or_else(|| tail.strip_prefix('d'))?;
                let value = named.iter().find(|(key, _)| *key == name)?.1;
                Some((value, tail))
            });
            match resolved {
                Some((value, tail)) => {
                    out.push_str(value);
                    rest = tail;
                }
                None => {
                    out.push('%');
                    rest = after;
                }
            }
        } else {
            out.push('%');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

/// Link target for a `{{name}}...{{/name}}` component in a message
#[derive(Debug, Clone)]
pub struct LinkComponent<'a> {
    pub name: &'a str,
    pub href: &'a str,
    pub new_tab: bool,
}

/// Turns a translated message into HTML: text is escaped and each known
/// `{{name}}inner{{/name}}` pair becomes an anchor around `inner`.
pub fn interpolate_components(text: &str, components: &[LinkComponent<'_>]) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        let tag_body = &rest[open + 2..];
        let expanded = tag_body.find("}}").and_then(|close| {
            let name = &tag_body[..close];
            let component = components.iter().find(|c| c.name == name)?;
            let inner_and_tail = &tag_body[close + 2..];
            let closing = format!("{{{{/{}}}}}", name);
            let end = inner_and_tail.find(&closing)?;
            Some((
                component,
                &inner_and_tail[..end],
                &inner_and_tail[end + closing.len()..],
            ))
        });

        match expanded {
            Some((component, inner, tail)) => {
                out.push_str(&escape_html(&rest[..open]));
                out.push_str(&anchor(component, inner));
                rest = tail;
            }
            None => {
                out.push_str(&escape_html(&rest[..open + 2]));
                rest = tag_body;
            }
        }
    }

    out.push_str(&escape_html(rest));
    out
}

fn anchor(component: &LinkComponent<'_>, inner: &str) -> String {
    let target = if component.new_tab {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };
    format!(
        r#"<a href="{}"{}>{}</a>"#,
        escape_html(component.href),
        target,
        escape_html(inner)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprintf_positional() {
        assert_eq!(sprintf("Latest: Today %s", &["2:05 PM"], &[]), "Latest: Today 2:05 PM");
        assert_eq!(sprintf("In the next %d hours", &["23"], &[]), "In the next 23 hours");
    }

    #[test]
    fn test_sprintf_named() {
        let text = sprintf(
            "attempted on %(displayDate)s at %(displayTime)s.",
            &[],
            &[("displayTime", "9:30 AM"), ("displayDate", "10/16/2026")],
        );
        assert_eq!(text, "attempted on 10/16/2026 at 9:30 AM.");
    }

    #[test]
    fn test_sprintf_leaves_unknown_placeholders() {
        assert_eq!(sprintf("100%% of %s", &[], &[]), "100% of %s");
        assert_eq!(sprintf("%(missing)s and %x", &[], &[]), "%(missing)s and %x");
    }

    #[test]
    fn test_english_plural() {
        let t = EnglishTranslator;
        assert_eq!(t.translate_plural("%d hour", "%d hours", 1), "%d hour");
        assert_eq!(t.translate_plural("%d hour", "%d hours", 0), "%d hours");
        assert_eq!(t.translate_plural("%d hour", "%d hours", -4), "%d hours");
    }

    #[test]
    fn test_catalog_translator() {
        let t = CatalogTranslator::from_json(
            r#"{
                "Latest backup": "Dernière sauvegarde",
                "In the next %d hour": ["Dans la prochaine %d heure", "Dans les prochaines %d heures"]
            }"#,
        )
        .unwrap();

        assert_eq!(t.translate("Latest backup"), "Dernière sauvegarde");
        assert_eq!(t.translate("No backup"), "No backup");
        assert_eq!(
            t.translate_plural("In the next %d hour", "In the next %d hours", 3),
            "Dans les prochaines %d heures"
        );
        assert_eq!(
            t.translate_plural("Backup failed", "Backups failed", 2),
            "Backups failed"
        );
    }

    #[test]
    fn test_catalog_load_errors() {
        assert!(matches!(
            CatalogTranslator::load("/this/does/not/exist.json"),
            Err(DashboardError::CatalogRead { .. })
        ));
    }

    #[test]
    fn test_interpolate_components_wraps_link() {
        let html = interpolate_components(
            "Check the following day, {{link}}Oct 16, 2026{{/link}} or contact support.",
            &[LinkComponent {
                name: "link",
                href: "/backups/example.com?date=20261016",
                new_tab: false,
            }],
        );
        assert!(html.starts_with("Check the following day, <a href=\""));
        assert!(html.contains(">Oct 16, 2026</a> or contact support."));
    }

    #[test]
    fn test_interpolate_components_escapes_text() {
        let html = interpolate_components("<b>{{a}}guide{{/a}}", &[]);
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("guide"));
    }

    #[test]
    fn test_interpolate_components_new_tab() {
        let html = interpolate_components(
            "See the {{a}}help guide{{/a}}.",
            &[LinkComponent {
                name: "a",
                href: "https://jetpack.com/support/backup/",
                new_tab: true,
            }],
        );
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer">help guide</a>"#));
    }
}
