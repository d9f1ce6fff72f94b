//! The DOM seam.
//!
//! [`Page`] is everything the controller needs from a document: a root
//! element to mark, controls to find and restyle, and a place to insert the
//! switcher widget. The browser implementation lives in the web crate;
//! [`MemoryPage`] backs native hosts and tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::config::ToggleConfig;
use crate::mode::Mode;

/// One button of the injected switcher widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetButton {
    pub id: String,
    pub label: String,
    pub mode: Mode,
}

/// Markup the controller asks the page to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSpec {
    pub class: String,
    pub buttons: Vec<WidgetButton>,
}

impl WidgetSpec {
    /// Build the widget for `config`, or `None` when the page supplies its own
    /// controls.
    #[must_use]
    pub fn from_config(config: &ToggleConfig) -> Option<Self> {
        config.create_widget.then(|| Self::build(config))
    }

    /// One button per trigger that requests a mode, regardless of
    /// `create_widget`.
    #[must_use]
    pub fn build(config: &ToggleConfig) -> Self {
        let buttons = config
            .triggers
            .iter()
            .filter_map(|trigger| {
                trigger.mode.map(|mode| WidgetButton {
                    id: trigger.id.clone(),
                    label: config.labels.for_mode(mode).to_string(),
                    mode,
                })
            })
            .collect();
        Self {
            class: config.widget_class.clone(),
            buttons,
        }
    }
}

/// Visual weight applied to a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emphasis {
    pub active: bool,
    pub opacity: String,
    /// Highlight class added while active and removed otherwise.
    pub class: Option<String>,
}

impl Emphasis {
    #[must_use]
    pub fn from_config(config: &ToggleConfig, active: bool) -> Self {
        let opacity = if active {
            &config.active_opacity
        } else {
            &config.inactive_opacity
        };
        Self {
            active,
            opacity: opacity.clone(),
            class: config.active_class.clone(),
        }
    }
}

pub trait Page {
    type Error: std::error::Error + 'static;

    /// Add or remove `class` on the page root.
    ///
    /// # Errors
    ///
    /// Returns an error if the root element is unavailable.
    fn set_root_class(&self, class: &str, present: bool) -> Result<(), Self::Error>;

    fn has_root_class(&self, class: &str) -> bool;

    fn has_element(&self, id: &str) -> bool;

    /// Record that a controller owns `class` on this page.
    ///
    /// Returns `false` if it was already claimed.
    fn claim_root_class(&self, class: &str) -> bool;

    /// Append the switcher widget to the page body.
    ///
    /// # Errors
    ///
    /// Returns an error if the elements cannot be created or attached.
    fn insert_widget(&self, widget: &WidgetSpec) -> Result<(), Self::Error>;

    /// Restyle the element `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is gone or rejects the style change.
    fn set_emphasis(&self, id: &str, emphasis: &Emphasis) -> Result<(), Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum MemoryPageError {
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("page is read-only")]
    ReadOnly,
}

/// Observable state of one element in a [`MemoryPage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub label: Option<String>,
    pub opacity: Option<String>,
    pub classes: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct MemoryPageInner {
    root_classes: BTreeSet<String>,
    elements: BTreeMap<String, MemoryElement>,
    widgets: Vec<String>,
    claims: BTreeSet<String>,
    read_only: bool,
    root_writes: usize,
}

/// In-memory [`Page`]. Clones share state, like handles to the same document.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    inner: Rc<RefCell<MemoryPageInner>>,
}

impl MemoryPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A page whose markup already contains elements with these ids.
    #[must_use]
    pub fn with_elements(ids: &[&str]) -> Self {
        let page = Self::new();
        {
            let mut inner = page.inner.borrow_mut();
            for id in ids {
                inner
                    .elements
                    .insert((*id).to_string(), MemoryElement::default());
            }
        }
        page
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<MemoryElement> {
        self.inner.borrow().elements.get(id).cloned()
    }

    #[must_use]
    pub fn opacity(&self, id: &str) -> Option<String> {
        self.element(id).and_then(|el| el.opacity)
    }

    #[must_use]
    pub fn root_classes(&self) -> BTreeSet<String> {
        self.inner.borrow().root_classes.clone()
    }

    /// Classes of every widget inserted so far, in insertion order.
    #[must_use]
    pub fn widgets(&self) -> Vec<String> {
        self.inner.borrow().widgets.clone()
    }

    /// Number of root class mutations that changed something.
    #[must_use]
    pub fn root_writes(&self) -> usize {
        self.inner.borrow().root_writes
    }

    /// Make every mutation fail.
    pub fn set_read_only(&self, read_only: bool) {
        self.inner.borrow_mut().read_only = read_only;
    }
}

impl Page for MemoryPage {
    type Error = MemoryPageError;

    fn set_root_class(&self, class: &str, present: bool) -> Result<(), Self::Error> {
        let mut inner = self.inner.borrow_mut();
        if inner.read_only {
            return Err(MemoryPageError::ReadOnly);
        }
        let changed = if present {
            inner.root_classes.insert(class.to_string())
        } else {
            inner.root_classes.remove(class)
        };
        if changed {
            inner.root_writes += 1;
        }
        Ok(())
    }

    fn has_root_class(&self, class: &str) -> bool {
        self.inner.borrow().root_classes.contains(class)
    }

    fn has_element(&self, id: &str) -> bool {
        self.inner.borrow().elements.contains_key(id)
    }

    fn claim_root_class(&self, class: &str) -> bool {
        self.inner.borrow_mut().claims.insert(class.to_string())
    }

    fn insert_widget(&self, widget: &WidgetSpec) -> Result<(), Self::Error> {
        let mut inner = self.inner.borrow_mut();
        if inner.read_only {
            return Err(MemoryPageError::ReadOnly);
        }
        for button in &widget.buttons {
            inner.elements.insert(
                button.id.clone(),
                MemoryElement {
                    label: Some(button.label.clone()),
                    ..MemoryElement::default()
                },
            );
        }
        inner.widgets.push(widget.class.clone());
        Ok(())
    }

    fn set_emphasis(&self, id: &str, emphasis: &Emphasis) -> Result<(), Self::Error> {
        let mut inner = self.inner.borrow_mut();
        if inner.read_only {
            return Err(MemoryPageError::ReadOnly);
        }
        let element = inner
            .elements
            .get_mut(id)
            .ok_or_else(|| MemoryPageError::MissingElement(id.to_string()))?;
        element.opacity = Some(emphasis.opacity.clone());
        if let Some(class) = &emphasis.class {
            if emphasis.active {
                element.classes.insert(class.clone());
            } else {
                element.classes.remove(class);
            }
        }
        Ok(())
    }
}
