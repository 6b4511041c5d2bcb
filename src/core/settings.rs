//! Tuning constants of the landing page
//!
//! Everything timing- or density-related lives in [`LandingSettings`]. The
//! server resolves it from its config, embeds it in the page as JSON and the
//! client reads it back at mount. Missing fields fall back to the defaults.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::scheduler::Millis;

/// Name of the `<meta>` tag carrying the serialized settings
pub const SETTINGS_META_NAME: &str = "celestia-settings";

/// Default launch instant, interpreted in the visitor's local time zone
pub const DEFAULT_LAUNCH_AT: &str = "2025-10-01T00:00:00";

/// Longest accepted delay or period, one day
pub const MAX_DELAY_MS: Millis = 86_400_000;

/// Longest accepted particle animation, delay or linger time
pub const MAX_PARTICLE_SECS: f64 = 3_600.0;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid launch instant {0:?}: expected RFC 3339 or YYYY-MM-DDTHH:MM:SS")]
    InvalidLaunchAt(String),

    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingSettings {
    /// Instant the countdown runs to
    pub launch_at: String,
    pub countdown: CountdownSettings,
    pub theme: ThemeSettings,
    pub particles: ParticleSettings,
    pub trail: TrailSettings,
    pub effects: EffectSettings,
    pub reveal: RevealSettings,
    pub signup: SignupSettings,
    pub page: PageSettings,
}

impl Default for LandingSettings {
    fn default() -> Self {
        Self {
            launch_at: DEFAULT_LAUNCH_AT.to_string(),
            countdown: CountdownSettings::default(),
            theme: ThemeSettings::default(),
            particles: ParticleSettings::default(),
            trail: TrailSettings::default(),
            effects: EffectSettings::default(),
            reveal: RevealSettings::default(),
            signup: SignupSettings::default(),
            page: PageSettings::default(),
        }
    }
}

impl LandingSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Launch instant in epoch milliseconds
    pub fn target_millis(&self) -> Result<Millis, SettingsError> {
        parse_instant(&self.launch_at)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.target_millis()?;

        let p = self.effects.move_sparkle_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(SettingsError::OutOfRange {
                field: "effects.move_sparkle_probability",
                reason: format!("{p} is not a probability"),
            });
        }

        let s = self.trail.smoothing;
        if !(s > 0.0 && s <= 1.0) {
            return Err(SettingsError::OutOfRange {
                field: "trail.smoothing",
                reason: format!("{s} must be in (0, 1]"),
            });
        }

        let ranges = [
            ("particles.size_px", self.particles.size_px),
            ("particles.duration_secs", self.particles.duration_secs),
            ("particles.delay_secs", self.particles.delay_secs),
            ("particles.opacity", self.particles.opacity),
        ];
        for (field, (low, high)) in ranges {
            if !(low < high) || low < 0.0 || !high.is_finite() {
                return Err(SettingsError::OutOfRange {
                    field,
                    reason: format!("[{low}, {high}) is empty, negative or unbounded"),
                });
            }
        }

        let timings = [
            ("particles.duration_secs", self.particles.duration_secs.1),
            ("particles.delay_secs", self.particles.delay_secs.1),
            ("particles.linger_secs", self.particles.linger_secs),
        ];
        for (field, secs) in timings {
            if !(0.0..=MAX_PARTICLE_SECS).contains(&secs) {
                return Err(SettingsError::OutOfRange {
                    field,
                    reason: format!("{secs}s must be within [0, {MAX_PARTICLE_SECS}]"),
                });
            }
        }

        if self.countdown.tick_ms <= 0 {
            return Err(SettingsError::OutOfRange {
                field: "countdown.tick_ms",
                reason: "must be positive".to_string(),
            });
        }

        let delays = [
            ("countdown.tick_ms", self.countdown.tick_ms),
            ("theme.transition_ms", self.theme.transition_ms),
            ("theme.toggle_feedback_ms", self.theme.toggle_feedback_ms),
            ("particles.startup_window_ms", self.particles.startup_window_ms),
            ("particles.maintain_interval_ms", self.particles.maintain_interval_ms),
            ("trail.idle_hide_ms", self.trail.idle_hide_ms),
            ("effects.burst_stagger_ms", self.effects.burst_stagger_ms),
            ("effects.burst_lifetime_ms", self.effects.burst_lifetime_ms),
            ("effects.sparkle_lifetime_ms", self.effects.sparkle_lifetime_ms),
            ("effects.glow_fade_in_delay_ms", self.effects.glow_fade_in_delay_ms),
            ("effects.glow_fade_out_ms", self.effects.glow_fade_out_ms),
            ("effects.ripple_lifetime_ms", self.effects.ripple_lifetime_ms),
            ("effects.toast_visible_ms", self.effects.toast_visible_ms),
            ("effects.toast_exit_ms", self.effects.toast_exit_ms),
            ("signup.latency_ms", self.signup.latency_ms),
            ("signup.restore_after_ms", self.signup.restore_after_ms),
            ("page.fade_in_delay_ms", self.page.fade_in_delay_ms),
            ("page.welcome_sparkle_delay_ms", self.page.welcome_sparkle_delay_ms),
        ];
        for (field, ms) in delays {
            if !(0..=MAX_DELAY_MS).contains(&ms) {
                return Err(SettingsError::OutOfRange {
                    field,
                    reason: format!("{ms}ms must be within [0, {MAX_DELAY_MS}]"),
                });
            }
        }

        let stagger = self.page.card_stagger_secs;
        if !(0.0..=MAX_PARTICLE_SECS).contains(&stagger) {
            return Err(SettingsError::OutOfRange {
                field: "page.card_stagger_secs",
                reason: format!("{stagger}s must be within [0, {MAX_PARTICLE_SECS}]"),
            });
        }

        Ok(())
    }
}

/// Parse an RFC 3339 timestamp, or a naive one in local time
pub fn parse_instant(value: &str) -> Result<Millis, SettingsError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis());
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| SettingsError::InvalidLaunchAt(value.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| SettingsError::InvalidLaunchAt(value.to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    pub tick_ms: Millis,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self { tick_ms: 1_000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// How long the body keeps its transition style after a switch
    pub transition_ms: Millis,
    /// Press feedback duration on the toggle control
    pub toggle_feedback_ms: Millis,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            transition_ms: 300,
            toggle_feedback_ms: 150,
        }
    }
}

/// Particle population tuning
///
/// Ranges are half-open `[low, high)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Particles created during startup
    pub initial_count: usize,
    /// Startup creations are spread over this window
    pub startup_window_ms: Millis,
    pub maintain_interval_ms: Millis,
    /// Maintenance only spawns while the active set is below this
    pub max_active: usize,
    pub size_px: (f64, f64),
    pub duration_secs: (f64, f64),
    pub delay_secs: (f64, f64),
    pub opacity: (f64, f64),
    /// Extra lifetime after the animation ends
    pub linger_secs: f64,
}

impl ParticleSettings {
    /// Absolute ceiling on the active set
    pub fn hard_cap(&self) -> usize {
        self.initial_count.max(self.max_active)
    }
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            initial_count: 30,
            startup_window_ms: 3_000,
            maintain_interval_ms: 2_000,
            max_active: 25,
            size_px: (1.0, 4.0),
            duration_secs: (15.0, 25.0),
            delay_secs: (0.0, 5.0),
            opacity: (0.2, 0.8),
            linger_secs: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailSettings {
    /// Fraction of the remaining distance covered per frame
    pub smoothing: f64,
    pub idle_hide_ms: Millis,
    pub visible_opacity: f64,
    /// Half the indicator size, used to centre it on the pointer
    pub half_size_px: f64,
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            idle_hide_ms: 1_000,
            visible_opacity: 0.6,
            half_size_px: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub burst_count: usize,
    pub burst_stagger_ms: Millis,
    pub burst_lifetime_ms: Millis,
    pub sparkle_lifetime_ms: Millis,
    /// Chance that a single pointer move event drops a sparkle
    pub move_sparkle_probability: f64,
    pub glow_fade_in_delay_ms: Millis,
    pub glow_fade_out_ms: Millis,
    pub ripple_lifetime_ms: Millis,
    pub toast_visible_ms: Millis,
    pub toast_exit_ms: Millis,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            burst_count: 8,
            burst_stagger_ms: 100,
            burst_lifetime_ms: 1_000,
            sparkle_lifetime_ms: 800,
            move_sparkle_probability: 0.005,
            glow_fade_in_delay_ms: 10,
            glow_fade_out_ms: 300,
            ripple_lifetime_ms: 600,
            toast_visible_ms: 3_000,
            toast_exit_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    /// Visible fraction that triggers the reveal
    pub threshold: f64,
    pub root_margin: String,
    pub card_offset_px: f64,
    pub section_offset_px: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            card_offset_px: 40.0,
            section_offset_px: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupSettings {
    /// Simulated network latency
    pub latency_ms: Millis,
    pub restore_after_ms: Millis,
    pub working_label: String,
    pub success_label: String,
    pub success_background: String,
    pub success_message: String,
}

impl Default for SignupSettings {
    fn default() -> Self {
        Self {
            latency_ms: 1_500,
            restore_after_ms: 3_000,
            working_label: "Subscribing...".to_string(),
            success_label: "✓ Subscribed!".to_string(),
            success_background: "#34C759".to_string(),
            success_message: "You'll be notified when Celestia launches!".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub fade_in_delay_ms: Millis,
    pub welcome_sparkle_delay_ms: Millis,
    /// Per-card animation delay step for the feature grid
    pub card_stagger_secs: f64,
    pub hero_parallax: f64,
    pub features_parallax: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            fade_in_delay_ms: 100,
            welcome_sparkle_delay_ms: 2_000,
            card_stagger_secs: 0.1,
            hero_parallax: -0.5,
            features_parallax: 0.1,
        }
    }
}
