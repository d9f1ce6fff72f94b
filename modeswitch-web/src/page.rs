//! [`Page`] over the live browser document.

use modeswitch_core::{Emphasis, Page, RootTarget, WidgetSpec};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom;

/// Attribute on `<html>` listing the root classes owned by a mounted controller.
pub const CLAIM_ATTR: &str = "data-modeswitch";

#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("root element {0:?} not available")]
    MissingRoot(RootTarget),
    #[error("document has no body")]
    MissingBody,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("DOM error: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(dom::js_error_message(&value))
    }
}

#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
    target: RootTarget,
}

impl DomPage {
    #[must_use]
    pub const fn new(document: Document, target: RootTarget) -> Self {
        Self { document, target }
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    fn element_for(&self, target: RootTarget) -> Option<Element> {
        match target {
            RootTarget::Body => self.document.body().map(Element::from),
            RootTarget::DocumentElement => self.document.document_element(),
        }
    }

    fn root(&self) -> Option<Element> {
        self.element_for(self.target)
    }

    /// The root element this page does not target.
    fn other_root(&self) -> Option<Element> {
        self.element_for(match self.target {
            RootTarget::Body => RootTarget::DocumentElement,
            RootTarget::DocumentElement => RootTarget::Body,
        })
    }

    fn html_element(&self, id: &str) -> Result<HtmlElement, DomError> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }
}

impl Page for DomPage {
    type Error = DomError;

    fn set_root_class(&self, class: &str, present: bool) -> Result<(), Self::Error> {
        let root = self.root().ok_or(DomError::MissingRoot(self.target))?;
        if present {
            root.class_list().add_1(class)?;
        } else {
            root.class_list().remove_1(class)?;
        }
        // An early apply may have marked the other root; only one may carry it.
        if let Some(other) = self.other_root() {
            other.class_list().remove_1(class)?;
        }
        Ok(())
    }

    fn has_root_class(&self, class: &str) -> bool {
        self.root()
            .is_some_and(|root| root.class_list().contains(class))
    }

    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn claim_root_class(&self, class: &str) -> bool {
        let Some(html) = self.document.document_element() else {
            return false;
        };
        let claimed = html.get_attribute(CLAIM_ATTR).unwrap_or_default();
        if claimed.split_whitespace().any(|c| c == class) {
            return false;
        }
        let next = if claimed.is_empty() {
            class.to_string()
        } else {
            format!("{claimed} {class}")
        };
        html.set_attribute(CLAIM_ATTR, &next).is_ok()
    }

    fn insert_widget(&self, widget: &WidgetSpec) -> Result<(), Self::Error> {
        let body = self.document.body().ok_or(DomError::MissingBody)?;
        let container = self.document.create_element("div")?;
        container.set_class_name(&widget.class);
        for button in &widget.buttons {
            let el = self.document.create_element("button")?;
            el.set_id(&button.id);
            el.set_attribute("type", "button")?;
            el.set_text_content(Some(&button.label));
            container.append_child(&el)?;
        }
        body.append_child(&container)?;
        Ok(())
    }

    fn set_emphasis(&self, id: &str, emphasis: &Emphasis) -> Result<(), Self::Error> {
        let el = self.html_element(id)?;
        el.style().set_property("opacity", &emphasis.opacity)?;
        if let Some(class) = &emphasis.class {
            el.class_list()
                .toggle_with_force(class, emphasis.active)?;
        }
        Ok(())
    }
}

/// Build a page over the current document, if there is one.
#[must_use]
pub fn current(target: RootTarget) -> Option<DomPage> {
    dom::document().map(|doc| DomPage::new(doc, target))
}
