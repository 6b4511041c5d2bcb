//! Rendering surface abstraction
//!
//! Everything in `core` mutates the page through the [`Renderer`] trait so the
//! timing and bookkeeping logic can run against an in-memory surface in tests
//! and against the real DOM in the browser.

/// Identity of an element created by (or registered with) a renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// One of the four numeric countdown fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeField {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeField {
    pub const ALL: [TimeField; 4] = [
        TimeField::Days,
        TimeField::Hours,
        TimeField::Minutes,
        TimeField::Seconds,
    ];

    /// DOM id of the field
    pub fn element_id(&self) -> &'static str {
        match self {
            TimeField::Days => "days",
            TimeField::Hours => "hours",
            TimeField::Minutes => "minutes",
            TimeField::Seconds => "seconds",
        }
    }

    /// Zero-padded display width
    pub fn width(&self) -> usize {
        match self {
            TimeField::Days => 3,
            _ => 2,
        }
    }
}

/// Addressable parts of the page
///
/// Fixed page regions are named; anything created at runtime or registered
/// from a selector query is a [`Target::Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Body,
    MouseTrail,
    ParticleContainer,
    ThemeToggle,
    Countdown,
    CountdownField(TimeField),
    SignupInput,
    SignupInputWrapper,
    SignupButton,
    Hero,
    Features,
    Node(NodeId),
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Target::Node(id)
    }
}

/// Viewport size in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Client-space bounding box of an element
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Minimal capability set needed by the landing page logic
pub trait Renderer {
    /// Create a `div` under `parent`, optionally with a class name
    fn create_element(&mut self, parent: Target, class: Option<&str>) -> NodeId;

    /// Detach a created element. Removing an unknown node is a no-op.
    fn remove_element(&mut self, node: NodeId);

    fn set_style(&mut self, target: Target, property: &str, value: &str);

    fn set_attribute(&mut self, target: Target, name: &str, value: &str);

    fn remove_attribute(&mut self, target: Target, name: &str);

    /// Replace the full class list
    fn set_class(&mut self, target: Target, class: &str);

    fn set_text(&mut self, target: Target, text: &str);

    fn set_html(&mut self, target: Target, html: &str);

    fn text(&self, target: Target) -> String;

    /// Set the value of a form control
    fn set_value(&mut self, target: Target, value: &str);

    fn viewport(&self) -> Viewport;

    fn bounds(&self, target: Target) -> Rect;

    /// Apply several style properties in order
    fn set_styles(&mut self, target: Target, styles: &[(&str, &str)]) {
        for (property, value) in styles {
            self.set_style(target, property, value);
        }
    }
}
