//! Pointer-following trail indicator
//!
//! The indicator eases toward the last pointer position once per display
//! frame and fades out after the pointer has been idle for a while.

use super::renderer::{Renderer, Target};
use super::scheduler::TaskId;
use super::settings::TrailSettings;

/// Smoothed position with exponential easing toward a target
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TrailPosition {
    pub current_x: f64,
    pub current_y: f64,
    pub target_x: f64,
    pub target_y: f64,
}

impl TrailPosition {
    pub fn set_target(&mut self, x: f64, y: f64) {
        self.target_x = x;
        self.target_y = y;
    }

    /// Move `smoothing` of the remaining distance toward the target
    pub fn step(&mut self, smoothing: f64) -> (f64, f64) {
        self.current_x += (self.target_x - self.current_x) * smoothing;
        self.current_y += (self.target_y - self.current_y) * smoothing;
        (self.current_x, self.current_y)
    }

    #[cfg(test)]
    pub fn distance_to_target(&self) -> f64 {
        (self.target_x - self.current_x).hypot(self.target_y - self.current_y)
    }
}

#[derive(Debug)]
pub struct MouseTrail {
    position: TrailPosition,
    visible: bool,
    hide_task: Option<TaskId>,
    settings: TrailSettings,
}

impl MouseTrail {
    pub fn new(settings: TrailSettings) -> Self {
        Self {
            position: TrailPosition::default(),
            visible: false,
            hide_task: None,
            settings,
        }
    }

    pub fn position(&self) -> TrailPosition {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn settings(&self) -> &TrailSettings {
        &self.settings
    }

    /// Advance one frame and position the indicator centred on the eased point
    pub fn frame<R: Renderer>(&mut self, renderer: &mut R) -> (f64, f64) {
        let (x, y) = self.position.step(self.settings.smoothing);
        let offset = self.settings.half_size_px;
        renderer.set_style(Target::MouseTrail, "left", &format!("{}px", x - offset));
        renderer.set_style(Target::MouseTrail, "top", &format!("{}px", y - offset));
        (x, y)
    }

    /// Record a pointer move
    ///
    /// Returns the previously pending hide task, which the caller must cancel
    /// before scheduling a fresh one with [`MouseTrail::set_hide_task`].
    pub fn pointer_moved<R: Renderer>(
        &mut self,
        x: f64,
        y: f64,
        renderer: &mut R,
    ) -> Option<TaskId> {
        self.position.set_target(x, y);
        if !self.visible {
            renderer.set_style(
                Target::MouseTrail,
                "opacity",
                &self.settings.visible_opacity.to_string(),
            );
            self.visible = true;
        }
        self.hide_task.take()
    }

    pub fn set_hide_task(&mut self, task: TaskId) {
        self.hide_task = Some(task);
    }

    /// Fade out after the idle timeout
    pub fn hide<R: Renderer>(&mut self, renderer: &mut R) {
        renderer.set_style(Target::MouseTrail, "opacity", "0");
        self.visible = false;
        self.hide_task = None;
    }
}
