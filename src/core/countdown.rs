//! Countdown to the launch instant
//!
//! The state is derived from the target and the current time on every tick.
//! Once the target has passed the engine latches into [`CountdownState::Launched`]
//! for the rest of the session.

use super::renderer::{Renderer, Target, TimeField};
use super::scheduler::Millis;

pub const MS_PER_SECOND: Millis = 1_000;
pub const MS_PER_MINUTE: Millis = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: Millis = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: Millis = 24 * MS_PER_HOUR;

/// Markup shown once the target has passed
pub const LAUNCH_HTML: &str = r#"<div style="text-align: center; animation: launchPulse 2s ease-in-out infinite;"><div style="font-size: 3rem; margin-bottom: 1rem;">🚀</div><div style="font-size: 2rem; font-weight: 700; color: var(--accent);">LAUNCHED!</div></div>"#;

/// Remaining time split into display units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// Sub-second remainder, never displayed
    pub millis: i64,
}

impl Remaining {
    /// Split a non-negative distance; negative input clamps to zero
    pub fn from_distance(distance: Millis) -> Self {
        let distance = distance.max(0);
        Self {
            days: distance / MS_PER_DAY,
            hours: (distance % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance % MS_PER_MINUTE) / MS_PER_SECOND,
            millis: distance % MS_PER_SECOND,
        }
    }

    pub fn total_millis(&self) -> Millis {
        self.days * MS_PER_DAY
            + self.hours * MS_PER_HOUR
            + self.minutes * MS_PER_MINUTE
            + self.seconds * MS_PER_SECOND
            + self.millis
    }

    pub fn value(&self, field: TimeField) -> i64 {
        match field {
            TimeField::Days => self.days,
            TimeField::Hours => self.hours,
            TimeField::Minutes => self.minutes,
            TimeField::Seconds => self.seconds,
        }
    }

    /// Zero-padded text for one field
    pub fn format(&self, field: TimeField) -> String {
        format!("{:0width$}", self.value(field), width = field.width())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownState {
    Counting(Remaining),
    Launched,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    target: Millis,
    launched: bool,
}

impl Countdown {
    pub fn new(target: Millis) -> Self {
        Self {
            target,
            launched: false,
        }
    }

    pub fn target(&self) -> Millis {
        self.target
    }

    pub fn is_launched(&self) -> bool {
        self.launched
    }

    /// State at `now`, latching the launch
    pub fn state_at(&mut self, now: Millis) -> CountdownState {
        if self.launched {
            return CountdownState::Launched;
        }
        let distance = self.target - now;
        if distance <= 0 {
            self.launched = true;
            tracing::info!("countdown reached its target, switching to launch display");
            return CountdownState::Launched;
        }
        CountdownState::Counting(Remaining::from_distance(distance))
    }

    /// Advance one tick and render the result
    ///
    /// The launch message is written only on the transitioning tick.
    pub fn tick<R: Renderer>(&mut self, now: Millis, renderer: &mut R) -> CountdownState {
        let was_launched = self.launched;
        let state = self.state_at(now);
        match state {
            CountdownState::Counting(remaining) => {
                for field in TimeField::ALL {
                    renderer.set_text(Target::CountdownField(field), &remaining.format(field));
                }
            }
            CountdownState::Launched if !was_launched => {
                renderer.set_html(Target::Countdown, LAUNCH_HTML);
            }
            CountdownState::Launched => {}
        }
        state
    }
}
