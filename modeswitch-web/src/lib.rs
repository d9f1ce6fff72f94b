#![forbid(unsafe_code)]
use modeswitch_core::ToggleConfig;
use wasm_bindgen::prelude::*;

pub mod boot;
pub mod components;
pub mod dom;
pub mod page;
pub mod storage;

pub use boot::{BootError, SharedController, WebController};
pub use page::{DomError, DomPage};
pub use storage::{WebPreferenceStore, WebStorageError};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        dom::console_error("logger already initialized");
    }
    #[cfg(feature = "autostart")]
    if let Err(err) = boot::mount(ToggleConfig::style_switcher()) {
        log::error!("style switcher failed to start: {err}");
    }
}

fn parse_config(json: &str) -> Result<ToggleConfig, JsValue> {
    ToggleConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply the saved mode right away, from an inline `<head>` script.
///
/// # Errors
///
/// Rejects invalid JSON configs and documents without a root.
#[wasm_bindgen(js_name = applySavedMode)]
pub fn apply_saved_mode(config_json: &str) -> Result<(), JsValue> {
    boot::apply_saved_mode(parse_config(config_json)?)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// JS handle to a mounted controller.
#[wasm_bindgen]
pub struct ModeToggle {
    inner: SharedController,
}

#[wasm_bindgen]
impl ModeToggle {
    /// Mount a controller described by a JSON config.
    ///
    /// # Errors
    ///
    /// Rejects invalid JSON configs and pages without a document.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Self, JsValue> {
        let inner = boot::mount(parse_config(config_json)?)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Mount the self-contained switcher preset.
    ///
    /// # Errors
    ///
    /// Rejects pages without a document.
    #[wasm_bindgen(js_name = styleSwitcher)]
    pub fn style_switcher() -> Result<Self, JsValue> {
        let inner = boot::mount(ToggleConfig::style_switcher())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Mount the preset for buttons already present in the markup.
    ///
    /// # Errors
    ///
    /// Rejects pages without a document.
    #[wasm_bindgen(js_name = pageButtons)]
    pub fn page_buttons() -> Result<Self, JsValue> {
        let inner = boot::mount(ToggleConfig::page_buttons())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn mode(&self) -> String {
        self.inner.borrow().mode().name().to_string()
    }

    /// Flip the mode; returns the new mode name.
    pub fn toggle(&self) -> String {
        self.inner.borrow_mut().toggle().name().to_string()
    }
}
