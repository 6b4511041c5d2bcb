//! One-shot reveal of elements entering the viewport

use std::collections::HashSet;

use super::renderer::{NodeId, Renderer, Target};
use super::settings::RevealSettings;

pub const REVEAL_ANIMATION: &str = "fadeInUp 0.8s cubic-bezier(0.25, 0.46, 0.45, 0.94) forwards";

/// Tracks which observed elements are still hidden
#[derive(Debug)]
pub struct ScrollReveal {
    settings: RevealSettings,
    pending: HashSet<NodeId>,
    revealed: HashSet<NodeId>,
}

impl ScrollReveal {
    pub fn new(settings: RevealSettings) -> Self {
        Self {
            settings,
            pending: HashSet::new(),
            revealed: HashSet::new(),
        }
    }

    pub fn settings(&self) -> &RevealSettings {
        &self.settings
    }

    /// Hide `node` and shift it down by `offset_px` until it is revealed
    pub fn observe<R: Renderer>(&mut self, node: NodeId, offset_px: f64, renderer: &mut R) {
        if self.revealed.contains(&node) {
            return;
        }
        renderer.set_style(Target::Node(node), "opacity", "0");
        renderer.set_style(
            Target::Node(node),
            "transform",
            &format!("translateY({offset_px}px)"),
        );
        self.pending.insert(node);
    }

    /// Handle an intersection notification
    ///
    /// Returns true when this call revealed the element. Elements that leave
    /// the viewport again stay revealed.
    pub fn on_intersection<R: Renderer>(
        &mut self,
        node: NodeId,
        is_intersecting: bool,
        renderer: &mut R,
    ) -> bool {
        if !is_intersecting || !self.pending.remove(&node) {
            return false;
        }
        renderer.set_style(Target::Node(node), "animation", REVEAL_ANIMATION);
        self.revealed.insert(node);
        true
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
