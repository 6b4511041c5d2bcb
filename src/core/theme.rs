//! Light/dark theme state and persistence
//!
//! Provides:
//! - `Theme` enum (Light, Dark) with the colours other components derive from it
//! - `ThemeStorage` trait for best-effort persistence
//! - `ThemeStore` which applies the body class and the transition feedback

use std::fmt;
use std::str::FromStr;

use super::renderer::{Renderer, Target};

/// Storage key of the persisted theme
pub const THEME_STORAGE_KEY: &str = "celestia-theme";

const THEME_TRANSITION: &str = "all 0.3s cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// Theme options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown theme: {0:?}")]
pub struct ThemeParseError(String);

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Class applied to the body
    pub fn class_name(&self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }

    /// Accent colour used for particles and targeted sparkles
    pub fn accent(&self) -> &'static str {
        match self {
            Theme::Light => "#007AFF",
            Theme::Dark => "#0A84FF",
        }
    }

    /// Sparkle burst palette
    pub fn palette(&self) -> [&'static str; 3] {
        match self {
            Theme::Light => ["#007AFF", "#34C759", "#FF9500"],
            Theme::Dark => ["#0A84FF", "#64D2FF", "#FFD60A"],
        }
    }

    /// Inner colour of the card glow gradient
    pub fn glow(&self) -> &'static str {
        match self {
            Theme::Light => "rgba(0, 122, 255, 0.1)",
            Theme::Dark => "rgba(10, 132, 255, 0.1)",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

/// Best-effort key-value persistence for the theme preference
///
/// Implementations swallow their own failures.
pub trait ThemeStorage {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str);
}

/// Storage that lives only as long as the page
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    value: Option<String>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

#[cfg(test)]
impl ThemeStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }
}

/// Current theme plus its persistence
#[derive(Debug)]
pub struct ThemeStore<S> {
    storage: S,
    current: Theme,
}

impl<S: ThemeStorage> ThemeStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: Theme::default(),
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply the persisted theme (or dark) without a transition
    pub fn load<R: Renderer>(&mut self, renderer: &mut R) -> Theme {
        let theme = match self.storage.load() {
            Some(value) => value.parse().unwrap_or_else(|err: ThemeParseError| {
                tracing::debug!("{err}, falling back to {}", Theme::default());
                Theme::default()
            }),
            None => Theme::default(),
        };
        self.set(theme, false, renderer);
        theme
    }

    /// Apply and persist `theme`
    ///
    /// With `animate` the body gets a transition style which the caller must
    /// clear with [`ThemeStore::end_transition`] once it has played.
    pub fn set<R: Renderer>(&mut self, theme: Theme, animate: bool, renderer: &mut R) {
        self.current = theme;
        if animate {
            renderer.set_style(Target::Body, "transition", THEME_TRANSITION);
        }
        renderer.set_class(Target::Body, theme.class_name());
        self.storage.save(theme.as_str());
    }

    pub fn end_transition<R: Renderer>(&self, renderer: &mut R) {
        renderer.set_style(Target::Body, "transition", "");
    }

    /// Flip the theme with a press feedback on the toggle control
    ///
    /// The caller resets the control with [`ThemeStore::release_toggle`].
    pub fn toggle<R: Renderer>(&mut self, renderer: &mut R) -> Theme {
        let next = self.current.toggled();
        self.set(next, true, renderer);
        renderer.set_style(Target::ThemeToggle, "transform", "scale(0.9)");
        next
    }

    pub fn release_toggle<R: Renderer>(&self, renderer: &mut R) {
        renderer.set_style(Target::ThemeToggle, "transform", "scale(1)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::RecordingRenderer;

    #[test]
    fn test_theme_round_trips_through_str() {
        assert_eq!("light".parse::<Theme>().ok(), Some(Theme::Light));
        assert_eq!("dark".parse::<Theme>().ok(), Some(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_load_defaults_to_dark() {
        let mut renderer = RecordingRenderer::new(800.0, 600.0);
        let mut store = ThemeStore::new(MemoryStorage::default());

        assert_eq!(store.load(&mut renderer), Theme::Dark);
        assert_eq!(renderer.class(Target::Body), "theme-dark");
        assert_eq!(renderer.style(Target::Body, "transition"), None);
    }

    #[test]
    fn test_load_reads_persisted_value() {
        let mut renderer = RecordingRenderer::new(800.0, 600.0);
        let mut store = ThemeStore::new(MemoryStorage::with_value("light"));

        assert_eq!(store.load(&mut renderer), Theme::Light);
        assert_eq!(renderer.class(Target::Body), "theme-light");
    }

    #[test]
    fn test_load_ignores_garbage() {
        let mut renderer = RecordingRenderer::new(800.0, 600.0);
        let mut store = ThemeStore::new(MemoryStorage::with_value("neon"));

        assert_eq!(store.load(&mut renderer), Theme::Dark);
        assert_eq!(store.storage().load().as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_is_involutive_and_persisted() {
        let mut renderer = RecordingRenderer::new(800.0, 600.0);
        let mut store = ThemeStore::new(MemoryStorage::default());
        let original = store.load(&mut renderer);

        let flipped = store.toggle(&mut renderer);
        assert_ne!(flipped, original);
        assert_eq!(store.storage().load().as_deref(), Some(flipped.as_str()));

        let back = store.toggle(&mut renderer);
        assert_eq!(back, original);
        assert_eq!(store.storage().load().as_deref(), Some(original.as_str()));
        assert_eq!(renderer.class(Target::Body), original.class_name());
    }

    #[test]
    fn test_animated_set_adds_and_clears_transition() {
        let mut renderer = RecordingRenderer::new(800.0, 600.0);
        let mut store = ThemeStore::new(MemoryStorage::default());

        store.toggle(&mut renderer);
        assert!(renderer.style(Target::Body, "transition").is_some());
        assert_eq!(
            renderer.style(Target::ThemeToggle, "transform"),
            Some("scale(0.9)")
        );

        store.end_transition(&mut renderer);
        store.release_toggle(&mut renderer);
        assert_eq!(renderer.style(Target::Body, "transition"), None);
        assert_eq!(
            renderer.style(Target::ThemeToggle, "transform"),
            Some("scale(1)")
        );
    }

    #[test]
    fn test_palettes_differ_per_theme() {
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
        assert_eq!(Theme::Light.accent(), "#007AFF");
        assert_eq!(Theme::Dark.accent(), "#0A84FF");
    }
}
