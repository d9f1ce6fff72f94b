//! Controller configuration.
//!
//! One controller covers both page setups: a self-built switcher widget and
//! buttons that already exist in the page markup. The difference lives here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::mode::{Encoding, Mode};

/// Element that carries the mode marker class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootTarget {
    #[default]
    Body,
    DocumentElement,
}

/// A control the controller discovers by id and binds to.
///
/// A trigger with a mode requests that mode when activated; one without a
/// mode flips whatever is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub id: String,
    #[serde(default)]
    pub mode: Option<Mode>,
}

impl TriggerSpec {
    #[must_use]
    pub fn for_mode(id: impl Into<String>, mode: Mode) -> Self {
        Self {
            id: id.into(),
            mode: Some(mode),
        }
    }

    #[must_use]
    pub fn flip(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mode: None,
        }
    }

    /// Whether this control should look active while `current` is in effect.
    #[must_use]
    pub fn is_active_for(&self, current: Mode) -> bool {
        self.mode.map_or(current.is_accessibility(), |m| m == current)
    }
}

/// Button captions for the injected widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLabels {
    pub standard: String,
    pub accessibility: String,
}

impl WidgetLabels {
    #[must_use]
    pub fn russian() -> Self {
        Self {
            standard: "Стандартный стиль".to_string(),
            accessibility: "Версия для слабовидящих".to_string(),
        }
    }

    #[must_use]
    pub fn english() -> Self {
        Self {
            standard: "Standard style".to_string(),
            accessibility: "Low-vision version".to_string(),
        }
    }

    #[must_use]
    pub fn for_mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::Standard => &self.standard,
            Mode::Accessibility => &self.accessibility,
        }
    }
}

impl Default for WidgetLabels {
    fn default() -> Self {
        Self::russian()
    }
}

/// Errors raised when a configuration cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("storage key must not be empty")]
    EmptyStorageKey,
    #[error("{field} {class:?} must be a single non-empty class name")]
    InvalidClass { field: &'static str, class: String },
    #[error("trigger ids must not be empty")]
    EmptyTriggerId,
    #[error("trigger id {id:?} is listed more than once")]
    DuplicateTrigger { id: String },
    #[error(
        "widget needs exactly one trigger per mode (standard {standard}, accessibility {accessibility})"
    )]
    WidgetTriggers { standard: usize, accessibility: usize },
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleConfig {
    #[serde(default)]
    pub encoding: Encoding,
    /// Overrides [`Encoding::default_key`] when set.
    #[serde(default)]
    pub storage_key: Option<String>,
    #[serde(default = "ToggleConfig::default_root_class")]
    pub root_class: String,
    #[serde(default)]
    pub root_target: RootTarget,
    #[serde(default = "ToggleConfig::default_triggers")]
    pub triggers: Vec<TriggerSpec>,
    #[serde(default)]
    pub create_widget: bool,
    #[serde(default = "ToggleConfig::default_widget_class")]
    pub widget_class: String,
    #[serde(default)]
    pub labels: WidgetLabels,
    #[serde(default = "ToggleConfig::default_active_opacity")]
    pub active_opacity: String,
    #[serde(default = "ToggleConfig::default_inactive_opacity")]
    pub inactive_opacity: String,
    #[serde(default)]
    pub active_class: Option<String>,
}

impl ToggleConfig {
    pub const STANDARD_TRIGGER_ID: &'static str = "standard-style";
    pub const ACCESSIBILITY_TRIGGER_ID: &'static str = "accessibility-style";

    fn default_root_class() -> String {
        "accessibility-mode".to_string()
    }

    fn default_triggers() -> Vec<TriggerSpec> {
        vec![
            TriggerSpec::for_mode(Self::STANDARD_TRIGGER_ID, Mode::Standard),
            TriggerSpec::for_mode(Self::ACCESSIBILITY_TRIGGER_ID, Mode::Accessibility),
        ]
    }

    fn default_widget_class() -> String {
        "style-switcher".to_string()
    }

    fn default_active_opacity() -> String {
        "1".to_string()
    }

    fn default_inactive_opacity() -> String {
        "0.6".to_string()
    }

    /// Self-contained switcher: builds its own two buttons and stores the
    /// style name under `siteStyle`.
    #[must_use]
    pub fn style_switcher() -> Self {
        Self {
            create_widget: true,
            ..Self::default()
        }
    }

    /// Wires buttons that the page markup already provides and stores an
    /// enabled/disabled flag under `accessibilityMode`.
    #[must_use]
    pub fn page_buttons() -> Self {
        Self {
            encoding: Encoding::AccessibilityMode,
            create_widget: false,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        self.storage_key
            .as_deref()
            .unwrap_or_else(|| self.encoding.default_key())
    }

    #[must_use]
    pub fn trigger(&self, id: &str) -> Option<&TriggerSpec> {
        self.triggers.iter().find(|t| t.id == id)
    }

    /// Check the invariants the controller relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        check_class("root_class", &self.root_class)?;
        check_class("widget_class", &self.widget_class)?;
        if let Some(class) = &self.active_class {
            check_class("active_class", class)?;
        }
        let mut seen = HashSet::new();
        for trigger in &self.triggers {
            if trigger.id.is_empty() {
                return Err(ConfigError::EmptyTriggerId);
            }
            if !seen.insert(trigger.id.as_str()) {
                return Err(ConfigError::DuplicateTrigger {
                    id: trigger.id.clone(),
                });
            }
        }
        if self.create_widget {
            let count = |mode| {
                self.triggers
                    .iter()
                    .filter(|t| t.mode == Some(mode))
                    .count()
            };
            let standard = count(Mode::Standard);
            let accessibility = count(Mode::Accessibility);
            if standard != 1 || accessibility != 1 {
                return Err(ConfigError::WidgetTriggers {
                    standard,
                    accessibility,
                });
            }
        }
        Ok(())
    }
}

fn check_class(field: &'static str, class: &str) -> Result<(), ConfigError> {
    if class.is_empty() || class.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidClass {
            field,
            class: class.to_string(),
        });
    }
    Ok(())
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            storage_key: None,
            root_class: Self::default_root_class(),
            root_target: RootTarget::default(),
            triggers: Self::default_triggers(),
            create_widget: false,
            widget_class: Self::default_widget_class(),
            labels: WidgetLabels::default(),
            active_opacity: Self::default_active_opacity(),
            inactive_opacity: Self::default_inactive_opacity(),
            active_class: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_only_in_storage_and_widget() {
        let switcher = ToggleConfig::style_switcher();
        let buttons = ToggleConfig::page_buttons();
        assert_eq!(switcher.storage_key(), "siteStyle");
        assert_eq!(buttons.storage_key(), "accessibilityMode");
        assert!(switcher.create_widget);
        assert!(!buttons.create_widget);
        assert_eq!(switcher.triggers, buttons.triggers);
        switcher.validate().unwrap();
        buttons.validate().unwrap();
    }

    #[test]
    fn empty_json_object_yields_defaults() {
        let config = ToggleConfig::from_json("{}").unwrap();
        assert_eq!(config, ToggleConfig::default());
        assert_eq!(config.root_class, "accessibility-mode");
        assert_eq!(config.inactive_opacity, "0.6");
    }

    #[test]
    fn json_overrides_are_honoured() {
        let config = ToggleConfig::from_json(
            r#"{
                "encoding": "accessibility_mode",
                "storage_key": "a11y",
                "root_target": "document_element",
                "triggers": [{ "id": "flip" }],
                "active_class": "is-active"
            }"#,
        )
        .unwrap();
        assert_eq!(config.storage_key(), "a11y");
        assert_eq!(config.root_target, RootTarget::DocumentElement);
        assert_eq!(config.trigger("flip"), Some(&TriggerSpec::flip("flip")));
        assert_eq!(config.active_class.as_deref(), Some("is-active"));
    }

    #[test]
    fn validation_rejects_broken_configs() {
        let mut config = ToggleConfig {
            storage_key: Some(String::new()),
            ..ToggleConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyStorageKey)));

        config.storage_key = None;
        config.root_class = "two classes".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidClass {
                field: "root_class",
                ..
            })
        ));

        config.root_class = "hc".to_string();
        config.triggers.push(TriggerSpec::flip(ToggleConfig::STANDARD_TRIGGER_ID));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateTrigger { id }) if id == "standard-style"
        ));

        config.triggers = vec![TriggerSpec::flip("")];
        assert!(matches!(config.validate(), Err(ConfigError::EmptyTriggerId)));
    }

    #[test]
    fn widget_and_highlight_classes_must_be_single_names() {
        let config = ToggleConfig {
            widget_class: String::new(),
            ..ToggleConfig::style_switcher()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidClass {
                field: "widget_class",
                ..
            })
        ));

        let config = ToggleConfig {
            active_class: Some("is active".to_string()),
            ..ToggleConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidClass {
                field: "active_class",
                ..
            }
        ));
        assert!(err.to_string().contains("\"is active\""));

        let config = ToggleConfig {
            active_class: Some(String::new()),
            ..ToggleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn widget_requires_one_button_per_mode() {
        let config = ToggleConfig {
            triggers: vec![TriggerSpec::for_mode("only", Mode::Accessibility)],
            ..ToggleConfig::style_switcher()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WidgetTriggers {
                standard: 0,
                accessibility: 1
            })
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ToggleConfig::from_json("{\"encoding\": 3}").unwrap_err();
        assert!(format!("{err}").contains("JSON parsing error"));
    }

    #[test]
    fn flip_trigger_follows_accessibility() {
        let flip = TriggerSpec::flip("x");
        assert!(flip.is_active_for(Mode::Accessibility));
        assert!(!flip.is_active_for(Mode::Standard));
        let std = TriggerSpec::for_mode("s", Mode::Standard);
        assert!(std.is_active_for(Mode::Standard));
    }
}
