//! Transient interaction effects
//!
//! Every effect creates short-lived elements and reports them back so the
//! orchestrator can schedule their removal:
//! - sparkle bursts and targeted sparkles
//! - glow overlays on hovered cards
//! - click ripples on buttons
//! - the success toast

use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use super::renderer::{NodeId, Renderer, Target};
use super::scheduler::Millis;
use super::settings::EffectSettings;
use super::theme::Theme;

const SPARKLE_BASE: [(&str, &str); 4] = [
    ("position", "fixed"),
    ("border-radius", "50%"),
    ("pointer-events", "none"),
    ("z-index", "1000"),
];

#[derive(Debug)]
pub struct Effects {
    settings: EffectSettings,
    /// Glow overlays per card that have not started fading out yet
    glows: HashMap<NodeId, Vec<NodeId>>,
}

impl Effects {
    pub fn new(settings: EffectSettings) -> Self {
        Self {
            settings,
            glows: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    /// Offsets from now at which the sparkles of one burst appear
    pub fn burst_offsets(&self) -> Vec<Millis> {
        (0..self.settings.burst_count as Millis)
            .map(|i| i * self.settings.burst_stagger_ms)
            .collect()
    }

    /// One burst sparkle at a random viewport position
    pub fn burst_sparkle<G: Rng, R: Renderer>(
        &self,
        theme: Theme,
        rng: &mut G,
        renderer: &mut R,
    ) -> NodeId {
        let viewport = renderer.viewport();
        let x = random_coordinate(rng, viewport.width);
        let y = random_coordinate(rng, viewport.height);
        let palette = theme.palette();
        let color = palette.choose(rng).copied().unwrap_or(palette[0]);
        spawn_sparkle(renderer, x, y, 4.0, color, "sparkleAnimation 1s ease-out forwards")
    }

    /// Small sparkle at a pointer position
    pub fn sparkle_at<R: Renderer>(&self, x: f64, y: f64, theme: Theme, renderer: &mut R) -> NodeId {
        spawn_sparkle(
            renderer,
            x,
            y,
            3.0,
            theme.accent(),
            "sparkleAnimation 0.8s ease-out forwards",
        )
    }

    /// Roll the per-event chance of a pointer sparkle
    pub fn should_sparkle_on_move<G: Rng>(&self, rng: &mut G) -> bool {
        let p = self.settings.move_sparkle_probability.clamp(0.0, 1.0);
        rng.gen_bool(p)
    }

    /// Attach a transparent glow overlay to `card`; fade it in with [`Effects::glow_fade_in`]
    pub fn glow_enter<R: Renderer>(&mut self, card: NodeId, theme: Theme, renderer: &mut R) -> NodeId {
        let glow = renderer.create_element(Target::Node(card), None);
        let background = format!(
            "radial-gradient(circle, {} 0%, transparent 70%)",
            theme.glow()
        );
        renderer.set_styles(
            Target::Node(glow),
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("right", "0"),
                ("bottom", "0"),
                ("background", background.as_str()),
                ("border-radius", "20px"),
                ("opacity", "0"),
                ("transition", "opacity 0.3s ease"),
                ("pointer-events", "none"),
            ],
        );
        renderer.set_style(Target::Node(card), "position", "relative");
        self.glows.entry(card).or_default().push(glow);
        glow
    }

    /// Returns false if the card was left before the fade-in started
    pub fn glow_fade_in<R: Renderer>(&self, glow: NodeId, renderer: &mut R) -> bool {
        if !self.glows.values().any(|glows| glows.contains(&glow)) {
            return false;
        }
        renderer.set_style(Target::Node(glow), "opacity", "1");
        true
    }

    /// Start fading every glow of `card`; returns the overlays to remove later
    pub fn glow_leave<R: Renderer>(&mut self, card: NodeId, renderer: &mut R) -> Vec<NodeId> {
        let glows = self.glows.remove(&card).unwrap_or_default();
        for glow in &glows {
            renderer.set_style(Target::Node(*glow), "opacity", "0");
        }
        glows
    }

    #[cfg(test)]
    pub fn active_glows(&self, card: NodeId) -> usize {
        self.glows.get(&card).map_or(0, Vec::len)
    }

    /// Ripple centred on a click inside `control`
    pub fn ripple<R: Renderer>(&self, control: Target, x: f64, y: f64, renderer: &mut R) -> NodeId {
        let geometry = RippleGeometry::new(renderer.bounds(control), x, y);
        let ripple = renderer.create_element(control, None);
        let size = format!("{}px", geometry.size);
        let left = format!("{}px", geometry.left);
        let top = format!("{}px", geometry.top);
        renderer.set_styles(
            Target::Node(ripple),
            &[
                ("position", "absolute"),
                ("border-radius", "50%"),
                ("background", "rgba(255, 255, 255, 0.3)"),
                ("transform", "scale(0)"),
                ("animation", "rippleAnimation 0.6s ease-out"),
                ("left", left.as_str()),
                ("top", top.as_str()),
                ("width", size.as_str()),
                ("height", size.as_str()),
                ("pointer-events", "none"),
            ],
        );
        // Controls are positioned by the stylesheet; only clip here
        renderer.set_style(control, "overflow", "hidden");
        ripple
    }

    /// Slide a banner in from the top
    pub fn toast<R: Renderer>(&self, message: &str, renderer: &mut R) -> NodeId {
        let toast = renderer.create_element(Target::Body, Some("toast"));
        renderer.set_styles(
            Target::Node(toast),
            &[
                ("position", "fixed"),
                ("top", "100px"),
                ("left", "50%"),
                ("transform", "translateX(-50%)"),
                ("background", "var(--glass-bg)"),
                ("backdrop-filter", "blur(20px)"),
                ("border", "1px solid var(--glass-border)"),
                ("border-radius", "16px"),
                ("padding", "16px 24px"),
                ("color", "var(--text-primary)"),
                ("z-index", "10000"),
                ("animation", "slideDown 0.3s ease-out forwards"),
            ],
        );
        renderer.set_text(Target::Node(toast), message);
        toast
    }

    pub fn toast_exit<R: Renderer>(&self, toast: NodeId, renderer: &mut R) {
        renderer.set_style(
            Target::Node(toast),
            "animation",
            "slideUp 0.3s ease-out forwards",
        );
    }
}

/// Ripple placement relative to its control
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    pub fn new(bounds: super::renderer::Rect, client_x: f64, client_y: f64) -> Self {
        let size = bounds.width.max(bounds.height);
        Self {
            size,
            left: client_x - bounds.left - size / 2.0,
            top: client_y - bounds.top - size / 2.0,
        }
    }
}

fn random_coordinate<G: Rng>(rng: &mut G, extent: f64) -> f64 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

fn spawn_sparkle<R: Renderer>(
    renderer: &mut R,
    x: f64,
    y: f64,
    size: f64,
    color: &str,
    animation: &str,
) -> NodeId {
    let sparkle = renderer.create_element(Target::Body, Some("sparkle"));
    let target = Target::Node(sparkle);
    let size = format!("{size}px");
    let left = format!("{x}px");
    let top = format!("{y}px");
    renderer.set_styles(target, &SPARKLE_BASE);
    renderer.set_styles(
        target,
        &[
            ("width", size.as_str()),
            ("height", size.as_str()),
            ("background-color", color),
            ("left", left.as_str()),
            ("top", top.as_str()),
            ("animation", animation),
        ],
    );
    sparkle
}
