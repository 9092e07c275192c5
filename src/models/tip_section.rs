use std::fmt;

/// Area of the site a contextual tip links to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipSection {
    Themes,
    Plugins,
    Customizer,
    /// Any tag without a known destination; links to `#`
    Unknown(String),
}

impl TipSection {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "themes" => TipSection::Themes,
            "plugins" => TipSection::Plugins,
            "customizer" => TipSection::Customizer,
            other => TipSection::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            TipSection::Themes => "themes",
            TipSection::Plugins => "plugins",
            TipSection::Customizer => "customizer",
            TipSection::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for TipSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
