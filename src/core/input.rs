//! Keyboard shortcuts and pointer conventions of the page

/// Selector of regions where the context menu is suppressed
pub const NO_CONTEXT_MENU_SELECTOR: &str = ".hero, .countdown-glass-card";

/// A key press as seen by the page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    /// Focus is in a text input
    pub in_text_input: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd + T
    ToggleTheme,
    /// Space outside of inputs
    SparkleBurst,
}

impl Shortcut {
    /// Map a key press to a shortcut; matching presses have their default prevented
    pub fn from_key(input: &KeyInput) -> Option<Self> {
        match input.key.to_lowercase().as_str() {
            "t" if input.ctrl || input.meta => Some(Shortcut::ToggleTheme),
            " " if !input.in_text_input => Some(Shortcut::SparkleBurst),
            _ => None,
        }
    }
}

/// Element id targeted by an in-page link, e.g. `#features` -> `features`
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
