//! Scroll-linked section offsets

use super::renderer::{Renderer, Target};
use super::settings::PageSettings;

/// Translate the hero and features sections proportionally to the scroll offset
///
/// Output depends only on `scroll_y`, so repeated calls are harmless.
pub fn apply<R: Renderer>(settings: &PageSettings, scroll_y: f64, renderer: &mut R) {
    renderer.set_style(
        Target::Hero,
        "transform",
        &translate_y(scroll_y * settings.hero_parallax),
    );
    renderer.set_style(
        Target::Features,
        "transform",
        &translate_y(scroll_y * settings.features_parallax),
    );
}

fn translate_y(offset: f64) -> String {
    // -0.0 would print as "-0"
    let offset = if offset == 0.0 { 0.0 } else { offset };
    format!("translateY({offset}px)")
}
