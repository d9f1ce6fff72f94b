use serde::{Deserialize, Serialize};

/// Presentation mode of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Standard,
    Accessibility,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Standard => Self::Accessibility,
            Self::Accessibility => Self::Standard,
        }
    }

    #[must_use]
    pub const fn is_accessibility(self) -> bool {
        matches!(self, Self::Accessibility)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Accessibility => "accessibility",
        }
    }
}

/// How a [`Mode`] is written into the preference slot.
///
/// Two conventions exist in the wild: a style name stored under `siteStyle`
/// and an enabled/disabled flag stored under `accessibilityMode`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    #[default]
    SiteStyle,
    AccessibilityMode,
}

impl Encoding {
    /// Storage key used when the config does not override it.
    #[must_use]
    pub const fn default_key(self) -> &'static str {
        match self {
            Self::SiteStyle => "siteStyle",
            Self::AccessibilityMode => "accessibilityMode",
        }
    }

    #[must_use]
    pub const fn encode(self, mode: Mode) -> &'static str {
        match (self, mode) {
            (Self::SiteStyle, Mode::Standard) => "standard",
            (Self::SiteStyle, Mode::Accessibility) => "accessibility",
            (Self::AccessibilityMode, Mode::Standard) => "disabled",
            (Self::AccessibilityMode, Mode::Accessibility) => "enabled",
        }
    }

    /// Parse a stored value. Matching is exact; anything else is `None`.
    #[must_use]
    pub fn decode(self, raw: &str) -> Option<Mode> {
        [Mode::Standard, Mode::Accessibility]
            .into_iter()
            .find(|mode| self.encode(*mode) == raw)
    }
}
