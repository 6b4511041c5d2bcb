//! Core page logic of the Celestia landing page, independent of the DOM

#[cfg(feature = "ssr")]
pub mod config;
pub mod countdown;
pub mod effects;
pub mod input;
pub mod parallax;
pub mod particles;
pub mod renderer;
pub mod reveal;
pub mod runtime;
pub mod scheduler;
pub mod settings;
pub mod signup;
pub mod theme;
pub mod trail;
pub mod validation;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use renderer::{NodeId, Rect, Renderer, Target, TimeField, Viewport};
pub use runtime::{Celestia, Event, PageElements};
pub use scheduler::{Millis, TaskId, TaskQueue};
pub use settings::{LandingSettings, SettingsError};
pub use theme::{Theme, ThemeStorage};
