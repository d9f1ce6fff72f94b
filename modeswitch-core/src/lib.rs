//! Modeswitch Core
//!
//! Platform-agnostic accessibility mode toggle: a two-valued presentation
//! mode mirrored into a marker class on the page root and a persisted
//! preference slot. This crate has no browser dependencies; the DOM and
//! storage are reached through the [`Page`] and [`PreferenceStore`] traits.

#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod mode;
pub mod page;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, RootTarget, ToggleConfig, TriggerSpec, WidgetLabels};
pub use controller::ModeController;
pub use mode::{Encoding, Mode};
pub use page::{Emphasis, MemoryElement, MemoryPage, MemoryPageError, Page, WidgetButton, WidgetSpec};
pub use store::{MemoryStore, MemoryStoreError, Preference, PreferenceStore};
