use serde::{Deserialize, Serialize};

/// Hosting tier of the site the editor is running on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    /// Fully hosted site without its own admin area
    Simple,
    /// Hosted site running a full install
    Atomic,
    /// Self-hosted site connected to the hosted dashboard
    #[default]
    Jetpack,
}

/// Where the block editor is running. Built once by the host from its
/// configuration and passed to every tip link; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorEnvironment {
    /// The editor is embedded in an iframe of the hosted dashboard
    pub iframed: bool,
    pub site_type: SiteType,
    /// Host name of the current site, as `window.location.hostname` would report it
    pub hostname: String,
}

impl EditorEnvironment {
    pub fn is_simple_site(&self) -> bool {
        matches!(self.site_type, SiteType::Simple)
    }
}

/// Read access to the document currently open in the editor
pub trait EditorState {
    fn current_post_id(&self) -> Option<u64>;
    fn current_post_type(&self) -> Option<String>;
}

/// A captured copy of the editor's current document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub post_id: Option<u64>,
    pub post_type: Option<String>,
}

impl EditorState for EditorSnapshot {
    fn current_post_id(&self) -> Option<u64> {
        self.post_id
    }

    fn current_post_type(&self) -> Option<String> {
        self.post_type.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_type_deserializes_lowercase() {
        let site_type: SiteType = serde_json::from_str("\"simple\"").unwrap();
        assert_eq!(site_type, SiteType::Simple);
        assert!(serde_json::from_str::<SiteType>("\"Simple\"").is_err());
    }

    #[test]
    fn test_is_simple_site() {
        let mut env = EditorEnvironment {
            iframed: true,
            site_type: SiteType::Simple,
            hostname: "example.com".to_string(),
        };
        assert!(env.is_simple_site());

        env.site_type = SiteType::Atomic;
        assert!(!env.is_simple_site());
    }
}
