//! `web-sys` implementation of the renderer
//!
//! Named page regions are resolved once at mount; a missing one aborts the
//! mount. Elements created at runtime, or registered from a selector query,
//! get a [`NodeId`] and carry it in a data attribute so event targets can be
//! mapped back.

use std::collections::HashMap;

use leptos::web_sys;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

use crate::core::renderer::{NodeId, Rect, Renderer, Target, TimeField, Viewport};
use crate::core::settings::SettingsError;

const NODE_ATTRIBUTE: &str = "data-celestia-node";

/// Error raised when the page does not have the expected structure
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no browser window or document")]
    NoDocument,

    #[error("required element `{0}` is missing from the page")]
    MissingElement(&'static str),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

fn fixed_selectors() -> [(Target, &'static str); 13] {
    [
        (Target::MouseTrail, "#mouseTrail"),
        (Target::ParticleContainer, "#particlesContainer"),
        (Target::ThemeToggle, "#themeToggle"),
        (Target::Countdown, "#countdown"),
        (Target::CountdownField(TimeField::Days), "#days"),
        (Target::CountdownField(TimeField::Hours), "#hours"),
        (Target::CountdownField(TimeField::Minutes), "#minutes"),
        (Target::CountdownField(TimeField::Seconds), "#seconds"),
        (Target::SignupInput, "#notificationForm .notification-input"),
        (Target::SignupInputWrapper, "#notificationForm .input-wrapper"),
        (Target::SignupButton, "#notificationForm .notification-btn"),
        (Target::Hero, ".hero"),
        (Target::Features, ".features"),
    ]
}

pub struct DomRenderer {
    window: Window,
    document: Document,
    fixed: HashMap<Target, HtmlElement>,
    nodes: HashMap<NodeId, HtmlElement>,
    next_id: u64,
}

impl DomRenderer {
    /// Resolve every named region of the landing page
    pub fn mount() -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoDocument)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let body = document.body().ok_or(MountError::MissingElement("body"))?;

        let mut fixed = HashMap::new();
        fixed.insert(Target::Body, body);
        for (target, selector) in fixed_selectors() {
            fixed.insert(target, query(&document, selector)?);
        }

        Ok(Self {
            window,
            document,
            fixed,
            nodes: HashMap::new(),
            next_id: 1,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, target: Target) -> Option<&HtmlElement> {
        match target {
            Target::Node(id) => self.nodes.get(&id),
            named => self.fixed.get(&named),
        }
    }

    /// Adopt an existing element
    pub fn register(&mut self, element: HtmlElement) -> NodeId {
        let id = self.allocate();
        let _ = element.set_attribute(NODE_ATTRIBUTE, &id.0.to_string());
        self.nodes.insert(id, element);
        id
    }

    /// Adopt every element matching `selector`, in document order
    pub fn register_all(&mut self, selector: &str) -> Vec<NodeId> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(|element| self.register(element))
            .collect()
    }

    /// Node id of a registered or created element
    pub fn node_of(&self, element: &Element) -> Option<NodeId> {
        let id = element
            .get_attribute(NODE_ATTRIBUTE)?
            .parse::<u64>()
            .ok()
            .map(NodeId)?;
        self.nodes.contains_key(&id).then_some(id)
    }

    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn query(document: &Document, selector: &'static str) -> Result<HtmlElement, MountError> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or(MountError::MissingElement(selector))
}

impl Renderer for DomRenderer {
    fn create_element(&mut self, parent: Target, class: Option<&str>) -> NodeId {
        let id = self.allocate();
        let Some(element) = self
            .document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return id;
        };
        if let Some(class) = class {
            element.set_class_name(class);
        }
        let _ = element.set_attribute(NODE_ATTRIBUTE, &id.0.to_string());
        if let Some(parent) = self.element(parent) {
            let _ = parent.append_child(&element);
        }
        self.nodes.insert(id, element);
        id
    }

    fn remove_element(&mut self, node: NodeId) {
        if let Some(element) = self.nodes.remove(&node) {
            element.remove();
        }
    }

    fn set_style(&mut self, target: Target, property: &str, value: &str) {
        if let Some(element) = self.element(target) {
            let style = element.style();
            if value.is_empty() {
                let _ = style.remove_property(property);
            } else {
                let _ = style.set_property(property, value);
            }
        }
    }

    fn set_attribute(&mut self, target: Target, name: &str, value: &str) {
        if let Some(element) = self.element(target) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn remove_attribute(&mut self, target: Target, name: &str) {
        if let Some(element) = self.element(target) {
            let _ = element.remove_attribute(name);
        }
    }

    fn set_class(&mut self, target: Target, class: &str) {
        if let Some(element) = self.element(target) {
            element.set_class_name(class);
        }
    }

    fn set_text(&mut self, target: Target, text: &str) {
        if let Some(element) = self.element(target) {
            element.set_text_content(Some(text));
        }
    }

    fn set_html(&mut self, target: Target, html: &str) {
        if let Some(element) = self.element(target) {
            element.set_inner_html(html);
        }
    }

    fn text(&self, target: Target) -> String {
        self.element(target)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn set_value(&mut self, target: Target, value: &str) {
        if let Some(input) = self
            .element(target)
            .and_then(|element| element.dyn_ref::<HtmlInputElement>())
        {
            input.set_value(value);
        }
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport {
            width: dimension(self.window.inner_width()),
            height: dimension(self.window.inner_height()),
        }
    }

    fn bounds(&self, target: Target) -> Rect {
        match self.element(target) {
            Some(element) => {
                let rect = element.get_bounding_client_rect();
                Rect {
                    left: rect.left(),
                    top: rect.top(),
                    width: rect.width(),
                    height: rect.height(),
                }
            }
            None => Rect::default(),
        }
    }
}
