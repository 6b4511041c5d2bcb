//! In-memory renderer used by the unit and scenario tests

use std::collections::{HashMap, HashSet};

use super::renderer::{NodeId, Rect, Renderer, Target, Viewport};

#[derive(Debug, Default, Clone)]
pub struct ElementState {
    pub parent: Option<Target>,
    pub class: String,
    pub styles: HashMap<String, String>,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub html: String,
    pub value: String,
}

/// Records every mutation so tests can assert on the resulting page state
#[derive(Debug)]
pub struct RecordingRenderer {
    pub elements: HashMap<Target, ElementState>,
    pub removed: HashSet<NodeId>,
    pub bounds: HashMap<Target, Rect>,
    pub viewport: Viewport,
    next_id: u64,
}

impl RecordingRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: HashMap::new(),
            removed: HashSet::new(),
            bounds: HashMap::new(),
            viewport: Viewport { width, height },
            next_id: 1,
        }
    }

    /// Register a pre-existing element such as a feature card
    pub fn register(&mut self, class: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            Target::Node(id),
            ElementState {
                class: class.to_string(),
                ..Default::default()
            },
        );
        id
    }

    pub fn style(&self, target: impl Into<Target>, property: &str) -> Option<&str> {
        self.elements
            .get(&target.into())
            .and_then(|e| e.styles.get(property))
            .map(String::as_str)
    }

    pub fn attribute(&self, target: impl Into<Target>, name: &str) -> Option<&str> {
        self.elements
            .get(&target.into())
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    pub fn class(&self, target: impl Into<Target>) -> &str {
        self.elements
            .get(&target.into())
            .map(|e| e.class.as_str())
            .unwrap_or("")
    }

    pub fn html(&self, target: impl Into<Target>) -> &str {
        self.elements
            .get(&target.into())
            .map(|e| e.html.as_str())
            .unwrap_or("")
    }

    pub fn value(&self, target: impl Into<Target>) -> &str {
        self.elements
            .get(&target.into())
            .map(|e| e.value.as_str())
            .unwrap_or("")
    }

    pub fn is_alive(&self, node: NodeId) -> bool {
        self.elements.contains_key(&Target::Node(node)) && !self.removed.contains(&node)
    }

    /// Live nodes created under `parent`
    pub fn children_of(&self, parent: Target) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .elements
            .iter()
            .filter(|(_, e)| e.parent == Some(parent))
            .filter_map(|(t, _)| match t {
                Target::Node(id) if !self.removed.contains(id) => Some(*id),
                _ => None,
            })
            .collect();
        ids.sort();
        ids
    }
}

impl Renderer for RecordingRenderer {
    fn create_element(&mut self, parent: Target, class: Option<&str>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            Target::Node(id),
            ElementState {
                parent: Some(parent),
                class: class.unwrap_or_default().to_string(),
                ..Default::default()
            },
        );
        id
    }

    fn remove_element(&mut self, node: NodeId) {
        if self.elements.remove(&Target::Node(node)).is_some() {
            self.removed.insert(node);
        }
    }

    fn set_style(&mut self, target: Target, property: &str, value: &str) {
        let element = self.elements.entry(target).or_default();
        if value.is_empty() {
            element.styles.remove(property);
        } else {
            element
                .styles
                .insert(property.to_string(), value.to_string());
        }
    }

    fn set_attribute(&mut self, target: Target, name: &str, value: &str) {
        self.elements
            .entry(target)
            .or_default()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, target: Target, name: &str) {
        if let Some(element) = self.elements.get_mut(&target) {
            element.attributes.remove(name);
        }
    }

    fn set_class(&mut self, target: Target, class: &str) {
        self.elements.entry(target).or_default().class = class.to_string();
    }

    fn set_text(&mut self, target: Target, text: &str) {
        self.elements.entry(target).or_default().text = text.to_string();
    }

    fn set_html(&mut self, target: Target, html: &str) {
        self.elements.entry(target).or_default().html = html.to_string();
    }

    fn text(&self, target: Target) -> String {
        self.elements
            .get(&target)
            .map(|e| e.text.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, target: Target, value: &str) {
        self.elements.entry(target).or_default().value = value.to_string();
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bounds(&self, target: Target) -> Rect {
        self.bounds.get(&target).copied().unwrap_or_default()
    }
}
