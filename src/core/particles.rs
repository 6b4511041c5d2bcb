//! Drifting background particles
//!
//! The field keeps a bounded active set. Each particle carries the instant it
//! expires; the orchestrator schedules its removal when it is created.

use rand::Rng;

use super::renderer::{NodeId, Renderer, Target};
use super::scheduler::Millis;
use super::settings::ParticleSettings;
use super::theme::Theme;

/// Randomized attributes of a particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSpec {
    pub size: f64,
    pub x_position: f64,
    pub duration_secs: f64,
    pub delay_secs: f64,
    pub opacity: f64,
}

impl ParticleSpec {
    pub fn random<G: Rng>(rng: &mut G, settings: &ParticleSettings, viewport_width: f64) -> Self {
        Self {
            size: sample(rng, settings.size_px),
            x_position: sample(rng, (0.0, viewport_width)),
            duration_secs: sample(rng, settings.duration_secs),
            delay_secs: sample(rng, settings.delay_secs),
            opacity: sample(rng, settings.opacity),
        }
    }

    /// Time from creation until removal
    pub fn lifetime_ms(&self, linger_secs: f64) -> Millis {
        ((self.duration_secs + self.delay_secs + linger_secs) * 1_000.0).ceil() as Millis
    }
}

fn sample<G: Rng>(rng: &mut G, (low, high): (f64, f64)) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// A live particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub node: NodeId,
    pub spec: ParticleSpec,
    pub expires_at: Millis,
}

/// Newly created particle the caller must schedule for removal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawned {
    pub node: NodeId,
    pub lifetime_ms: Millis,
}

#[derive(Debug)]
pub struct ParticleField {
    active: Vec<Particle>,
    settings: ParticleSettings,
}

impl ParticleField {
    pub fn new(settings: ParticleSettings) -> Self {
        Self {
            active: Vec::new(),
            settings,
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active(&self) -> &[Particle] {
        &self.active
    }

    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    /// Random startup delays, one per initial particle
    pub fn initial_delays<G: Rng>(&self, rng: &mut G) -> Vec<Millis> {
        let window = self.settings.startup_window_ms.max(1);
        (0..self.settings.initial_count)
            .map(|_| rng.gen_range(0..window))
            .collect()
    }

    /// Create a particle unless the hard cap is reached
    pub fn create<G: Rng, R: Renderer>(
        &mut self,
        now: Millis,
        theme: Theme,
        rng: &mut G,
        renderer: &mut R,
    ) -> Option<Spawned> {
        if self.active.len() >= self.settings.hard_cap() {
            return None;
        }

        let spec = ParticleSpec::random(rng, &self.settings, renderer.viewport().width);
        let node = renderer.create_element(Target::ParticleContainer, Some("particle"));
        let size = px(spec.size);
        let left = px(spec.x_position);
        let duration = format!("{}s", spec.duration_secs);
        let delay = format!("{}s", spec.delay_secs);
        let opacity = spec.opacity.to_string();
        renderer.set_styles(
            Target::Node(node),
            &[
                ("width", size.as_str()),
                ("height", size.as_str()),
                ("left", left.as_str()),
                ("bottom", "-10px"),
                ("animation-duration", duration.as_str()),
                ("animation-delay", delay.as_str()),
                ("opacity", opacity.as_str()),
                ("background", theme.accent()),
            ],
        );

        let lifetime_ms = spec.lifetime_ms(self.settings.linger_secs);
        self.active.push(Particle {
            node,
            spec,
            expires_at: now.saturating_add(lifetime_ms),
        });
        Some(Spawned { node, lifetime_ms })
    }

    /// Periodic top-up: spawn one particle while below `max_active`
    pub fn maintain<G: Rng, R: Renderer>(
        &mut self,
        now: Millis,
        theme: Theme,
        rng: &mut G,
        renderer: &mut R,
    ) -> Option<Spawned> {
        if self.active.len() < self.settings.max_active {
            self.create(now, theme, rng, renderer)
        } else {
            None
        }
    }

    /// Remove a particle from the page and the active set
    pub fn remove<R: Renderer>(&mut self, node: NodeId, renderer: &mut R) -> bool {
        let Some(index) = self.active.iter().position(|p| p.node == node) else {
            return false;
        };
        self.active.swap_remove(index);
        renderer.remove_element(node);
        true
    }

    pub fn recolor<R: Renderer>(&self, theme: Theme, renderer: &mut R) {
        for particle in &self.active {
            renderer.set_style(Target::Node(particle.node), "background", theme.accent());
        }
    }

    /// Pull particles that ended up beyond the new viewport back to the left edge
    pub fn on_resize<R: Renderer>(&mut self, renderer: &mut R) -> usize {
        let width = renderer.viewport().width;
        let mut moved = 0;
        for particle in self.active.iter_mut() {
            if particle.spec.x_position > width {
                particle.spec.x_position = 0.0;
                renderer.set_style(Target::Node(particle.node), "left", "0px");
                moved += 1;
            }
        }
        moved
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}
