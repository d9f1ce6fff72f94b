//! Page startup: build the controller, wait for the DOM, bind clicks.

use std::cell::RefCell;
use std::rc::Rc;

use modeswitch_core::{ConfigError, ModeController, ToggleConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{DocumentReadyState, Event};

use crate::dom;
use crate::page::{self, DomPage};
use crate::storage::WebPreferenceStore;

pub type WebController = ModeController<WebPreferenceStore, DomPage>;

/// Shared handle used by click closures and the JS-facing API.
pub type SharedController = Rc<RefCell<WebController>>;

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no document to attach to")]
    NoDocument,
    #[error("a controller is already mounted for root class {class:?}")]
    AlreadyMounted { class: String },
}

/// Build a controller for the current document without touching the DOM.
///
/// # Errors
///
/// Returns an error if the config is invalid or no document exists.
pub fn controller(config: ToggleConfig) -> Result<WebController, BootError> {
    let page = page::current(config.root_target).ok_or(BootError::NoDocument)?;
    Ok(ModeController::new(config, WebPreferenceStore, page)?)
}

/// Show the saved mode immediately so the page never flashes the standard
/// look. Meant for an inline script in `<head>` with a
/// [`RootTarget::DocumentElement`](modeswitch_core::RootTarget) config.
///
/// # Errors
///
/// Returns an error if the config is invalid or no document exists.
pub fn apply_saved_mode(config: ToggleConfig) -> Result<(), BootError> {
    let controller = controller(config)?;
    controller.apply(controller.preference().load());
    Ok(())
}

/// Create the controller and initialize it once the DOM is parsed.
///
/// Only one controller may own a root class per document; later mounts for
/// the same class are refused.
///
/// # Errors
///
/// Returns an error if the config is invalid, no document exists, or the
/// root class is already owned.
pub fn mount(config: ToggleConfig) -> Result<SharedController, BootError> {
    let controller = controller(config)?;
    if !controller.claim() {
        return Err(BootError::AlreadyMounted {
            class: controller.config().root_class.clone(),
        });
    }
    let shared = Rc::new(RefCell::new(controller));
    let ready_state = shared.borrow().page().document().ready_state();
    run_when_ready(&shared, ready_state);
    Ok(shared)
}

/// Initialize now, or on `DOMContentLoaded` while the document is `loading`.
pub fn run_when_ready(shared: &SharedController, ready_state: DocumentReadyState) {
    if ready_state != DocumentReadyState::Loading {
        start(shared);
        return;
    }
    let document = shared.borrow().page().document().clone();
    let pending = Rc::clone(shared);
    let on_ready = Closure::once(move || start(&pending));
    if let Err(err) = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
    {
        log::warn!("could not defer startup: {}", dom::js_error_message(&err));
    }
    on_ready.forget();
}

fn start(shared: &SharedController) {
    let ids = shared.borrow_mut().initialize();
    let document = shared.borrow().page().document().clone();
    for id in ids {
        let Some(el) = document.get_element_by_id(&id) else {
            continue;
        };
        let handle = Rc::clone(shared);
        let trigger_id = id.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            handle.borrow_mut().activate(&trigger_id);
        });
        if let Err(err) =
            el.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        {
            log::warn!(
                "could not bind #{id}: {}",
                dom::js_error_message(&err)
            );
        }
        on_click.forget();
    }
}
