use crate::models::editor_env::{EditorEnvironment, EditorState};
use crate::models::tip_section::TipSection;
use log::{debug, warn};
use serde::Serialize;

const HOSTED_DASHBOARD: &str = "https://wordpress.com";

/// Anchor target of a contextual tip. Always opens in a new tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipLink {
    pub href: String,
    pub text: String,
}

pub fn build_tip_link(
    section: &TipSection,
    subsection: Option<&str>,
    text: &str,
    env: &EditorEnvironment,
    editor: &dyn EditorState,
) -> TipLink {
    TipLink {
        href: tip_href(section, subsection, env, editor),
        text: text.to_string(),
    }
}

/// Builds the href for a tip. Inside the hosted editor iframe links go to the
/// hosted management pages, otherwise to the site's own admin pages.
///
/// The customizer gets `autofocus[section]=<subsection>` only when a
/// subsection is given. Without one the parameter is left out entirely
/// rather than sent with an empty or placeholder value.
pub fn tip_href(
    section: &TipSection,
    subsection: Option<&str>,
    env: &EditorEnvironment,
    editor: &dyn EditorState,
) -> String {
    match section {
        TipSection::Themes => {
            if env.iframed {
                format!("{}/themes/{}", HOSTED_DASHBOARD, env.hostname)
            } else {
                "./themes.php".to_string()
            }
        }
        TipSection::Plugins => {
            if env.iframed {
                format!("{}/plugins/{}", HOSTED_DASHBOARD, env.hostname)
            } else {
                "./plugin-install.php".to_string()
            }
        }
        TipSection::Customizer => customizer_href(subsection, env, editor),
        TipSection::Unknown(tag) => {
            warn!("No tip link destination for section '{}', using placeholder", tag);
            "#".to_string()
        }
    }
}

fn customizer_href(
    subsection: Option<&str>,
    env: &EditorEnvironment,
    editor: &dyn EditorState,
) -> String {
    let autofocus = subsection.map(|section| format!("autofocus[section]={}", section));

    if env.iframed && env.is_simple_site() {
        let mut href = format!("{}/customize/{}", HOSTED_DASHBOARD, env.hostname);
        if let Some(autofocus) = autofocus {
            href.push('?');
            href.push_str(&autofocus);
        }
        return href;
    }

    let return_link = if env.iframed {
        Some(return_parameter(env, editor))
    } else {
        None
    };

    let query: Vec<String> = autofocus.into_iter().chain(return_link).collect();
    if query.is_empty() {
        "./customize.php".to_string()
    } else {
        format!("./customize.php?{}", query.join("&"))
    }
}

/// The whole `return=<url>` pair is percent-encoded, `=` included, which is
/// what the customizer has always been sent.
fn return_parameter(env: &EditorEnvironment, editor: &dyn EditorState) -> String {
    let post_type = editor.current_post_type();
    let post_id = editor.current_post_id();
    if post_type.is_none() || post_id.is_none() {
        debug!("Editor has no current post, return link will be incomplete");
    }

    let return_url = format!(
        "return={}/block-editor/{}/{}/{}",
        HOSTED_DASHBOARD,
        post_type.unwrap_or_default(),
        env.hostname,
        post_id.map(|id| id.to_string()).unwrap_or_default()
    );
    urlencoding::encode(&return_url).into_owned()
}
