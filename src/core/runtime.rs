//! Application context of the landing page
//!
//! [`Celestia`] owns every component, the task queue and the random source.
//! It is built once when the page mounts and lives as long as the page. All
//! inputs (browser events, animation frames, due tasks) enter through its
//! methods together with the current time and a renderer.

use rand::Rng;

use super::countdown::{Countdown, CountdownState};
use super::effects::Effects;
use super::input::{KeyInput, Shortcut};
use super::parallax;
use super::particles::{ParticleField, Spawned};
use super::renderer::{NodeId, Renderer, Target};
use super::reveal::ScrollReveal;
use super::scheduler::{Millis, TaskId, TaskQueue};
use super::settings::{LandingSettings, SettingsError};
use super::signup::{SignupForm, SubmitOutcome};
use super::theme::{Theme, ThemeStorage, ThemeStore};
use super::trail::MouseTrail;

/// Deferred work of the page
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    CountdownTick,
    SpawnParticle,
    MaintainParticles,
    ExpireParticle(NodeId),
    RemoveNode(NodeId),
    HideTrail,
    EndThemeTransition,
    ReleaseToggle,
    BurstSparkle,
    FadeInGlow(NodeId),
    CompleteSignup,
    RestoreSignup,
    DismissToast(NodeId),
    RevealBody,
    WelcomeSparkles,
}

/// Pre-existing elements the page logic hooks into
#[derive(Clone, Debug, Default)]
pub struct PageElements {
    /// `.feature-card` elements in document order
    pub feature_cards: Vec<NodeId>,
    /// `.notification-card` elements
    pub notification_cards: Vec<NodeId>,
}

pub struct Celestia<S, G> {
    settings: LandingSettings,
    theme: ThemeStore<S>,
    countdown: Countdown,
    particles: ParticleField,
    trail: MouseTrail,
    effects: Effects,
    reveal: ScrollReveal,
    signup: SignupForm,
    queue: TaskQueue<Event>,
    rng: G,
    countdown_task: Option<TaskId>,
    started: bool,
}

impl<S: ThemeStorage, G: Rng> Celestia<S, G> {
    pub fn new(settings: LandingSettings, storage: S, rng: G) -> Result<Self, SettingsError> {
        let target = settings.target_millis()?;
        Ok(Self {
            theme: ThemeStore::new(storage),
            countdown: Countdown::new(target),
            particles: ParticleField::new(settings.particles.clone()),
            trail: MouseTrail::new(settings.trail.clone()),
            effects: Effects::new(settings.effects.clone()),
            reveal: ScrollReveal::new(settings.reveal.clone()),
            signup: SignupForm::new(settings.signup.clone()),
            queue: TaskQueue::new(),
            rng,
            countdown_task: None,
            started: false,
            settings,
        })
    }

    pub fn settings(&self) -> &LandingSettings {
        &self.settings
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn theme_store(&self) -> &ThemeStore<S> {
        &self.theme
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn trail(&self) -> &MouseTrail {
        &self.trail
    }

    #[cfg(test)]
    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    pub fn signup(&self) -> &SignupForm {
        &self.signup
    }

    /// Due time of the next pending task
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.next_due()
    }

    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    /// Initialize every component; later calls are ignored
    pub fn start<R: Renderer>(&mut self, now: Millis, page: &PageElements, renderer: &mut R) {
        if self.started {
            return;
        }
        self.started = true;

        let theme = self.theme.load(renderer);

        if self.countdown.tick(now, renderer) != CountdownState::Launched {
            let tick = self.settings.countdown.tick_ms;
            self.countdown_task = Some(self.queue.schedule_repeating(now, tick, Event::CountdownTick));
        }

        for delay in self.particles.initial_delays(&mut self.rng) {
            self.queue.schedule_once(now, delay, Event::SpawnParticle);
        }
        let maintain_every = self.particles.settings().maintain_interval_ms;
        self.queue
            .schedule_repeating(now, maintain_every, Event::MaintainParticles);

        let stagger = self.settings.page.card_stagger_secs;
        let card_offset = self.settings.reveal.card_offset_px;
        for (index, card) in page.feature_cards.iter().enumerate() {
            let delay = format!("{}ms", (index as f64 * stagger * 1_000.0).round());
            renderer.set_style(Target::Node(*card), "animation-delay", &delay);
            self.reveal.observe(*card, card_offset, renderer);
        }
        let section_offset = self.settings.reveal.section_offset_px;
        for card in &page.notification_cards {
            self.reveal.observe(*card, section_offset, renderer);
        }

        let page_settings = &self.settings.page;
        self.queue
            .schedule_once(now, page_settings.fade_in_delay_ms, Event::RevealBody);
        self.queue
            .schedule_once(now, page_settings.welcome_sparkle_delay_ms, Event::WelcomeSparkles);

        tracing::info!(
            theme = %theme,
            launched = self.countdown.is_launched(),
            feature_cards = page.feature_cards.len(),
            "landing page started"
        );
    }

    /// Fire every task due at `now`; returns how many ran
    pub fn run_due<R: Renderer>(&mut self, now: Millis, renderer: &mut R) -> usize {
        let mut fired = 0;
        while let Some((_, event)) = self.queue.pop_due(now) {
            self.handle(event, now, renderer);
            fired += 1;
        }
        fired
    }

    fn handle<R: Renderer>(&mut self, event: Event, now: Millis, renderer: &mut R) {
        match event {
            Event::CountdownTick => {
                if self.countdown.tick(now, renderer) == CountdownState::Launched {
                    if let Some(task) = self.countdown_task.take() {
                        self.queue.cancel(task);
                    }
                }
            }
            Event::SpawnParticle => {
                let theme = self.theme.current();
                let spawned = self
                    .particles
                    .create(now, theme, &mut self.rng, renderer);
                self.schedule_expiry(now, spawned);
            }
            Event::MaintainParticles => {
                let theme = self.theme.current();
                let spawned = self
                    .particles
                    .maintain(now, theme, &mut self.rng, renderer);
                self.schedule_expiry(now, spawned);
            }
            Event::ExpireParticle(node) => {
                self.particles.remove(node, renderer);
            }
            Event::RemoveNode(node) => renderer.remove_element(node),
            Event::HideTrail => self.trail.hide(renderer),
            Event::EndThemeTransition => self.theme.end_transition(renderer),
            Event::ReleaseToggle => self.theme.release_toggle(renderer),
            Event::BurstSparkle => {
                let node = self
                    .effects
                    .burst_sparkle(self.theme.current(), &mut self.rng, renderer);
                let lifetime = self.effects.settings().burst_lifetime_ms;
                self.queue
                    .schedule_once(now, lifetime, Event::RemoveNode(node));
            }
            Event::FadeInGlow(glow) => {
                self.effects.glow_fade_in(glow, renderer);
            }
            Event::CompleteSignup => {
                if self.signup.complete(renderer) {
                    self.sparkle_burst(now);
                    let toast = self
                        .effects
                        .toast(&self.signup.settings().success_message, renderer);
                    let visible = self.effects.settings().toast_visible_ms;
                    self.queue
                        .schedule_once(now, visible, Event::DismissToast(toast));
                    let restore = self.signup.settings().restore_after_ms;
                    self.queue.schedule_once(now, restore, Event::RestoreSignup);
                    tracing::info!("signup succeeded");
                }
            }
            Event::RestoreSignup => {
                self.signup.restore(renderer);
            }
            Event::DismissToast(toast) => {
                self.effects.toast_exit(toast, renderer);
                let exit = self.effects.settings().toast_exit_ms;
                self.queue.schedule_once(now, exit, Event::RemoveNode(toast));
            }
            Event::RevealBody => renderer.set_style(Target::Body, "opacity", "1"),
            Event::WelcomeSparkles => self.sparkle_burst(now),
        }
    }

    fn schedule_expiry(&mut self, now: Millis, spawned: Option<Spawned>) {
        if let Some(spawned) = spawned {
            self.queue.schedule_once(
                now,
                spawned.lifetime_ms,
                Event::ExpireParticle(spawned.node),
            );
        }
    }

    /// Queue one staggered sparkle burst
    pub fn sparkle_burst(&mut self, now: Millis) {
        for offset in self.effects.burst_offsets() {
            self.queue.schedule_once(now, offset, Event::BurstSparkle);
        }
    }

    pub fn toggle_theme<R: Renderer>(&mut self, now: Millis, renderer: &mut R) -> Theme {
        let theme = self.theme.toggle(renderer);
        self.particles.recolor(theme, renderer);

        let settings = &self.settings.theme;
        self.queue
            .schedule_once(now, settings.transition_ms, Event::EndThemeTransition);
        self.queue
            .schedule_once(now, settings.toggle_feedback_ms, Event::ReleaseToggle);
        tracing::debug!(theme = %theme, "theme toggled");
        theme
    }

    /// Returns true when the key was a shortcut and its default action should be prevented
    pub fn on_key<R: Renderer>(&mut self, input: &KeyInput, now: Millis, renderer: &mut R) -> bool {
        match Shortcut::from_key(input) {
            Some(Shortcut::ToggleTheme) => {
                self.toggle_theme(now, renderer);
                true
            }
            Some(Shortcut::SparkleBurst) => {
                self.sparkle_burst(now);
                true
            }
            None => false,
        }
    }

    pub fn on_pointer_move<R: Renderer>(&mut self, x: f64, y: f64, now: Millis, renderer: &mut R) {
        if let Some(pending) = self.trail.pointer_moved(x, y, renderer) {
            self.queue.cancel(pending);
        }
        let idle = self.trail.settings().idle_hide_ms;
        let hide = self.queue.schedule_once(now, idle, Event::HideTrail);
        self.trail.set_hide_task(hide);

        if self.effects.should_sparkle_on_move(&mut self.rng) {
            let node = self
                .effects
                .sparkle_at(x, y, self.theme.current(), renderer);
            let lifetime = self.effects.settings().sparkle_lifetime_ms;
            self.queue
                .schedule_once(now, lifetime, Event::RemoveNode(node));
        }
    }

    /// Display refresh callback
    pub fn on_frame<R: Renderer>(&mut self, renderer: &mut R) -> (f64, f64) {
        self.trail.frame(renderer)
    }

    pub fn on_resize<R: Renderer>(&mut self, renderer: &mut R) -> usize {
        self.particles.on_resize(renderer)
    }

    pub fn on_scroll<R: Renderer>(&mut self, scroll_y: f64, renderer: &mut R) {
        parallax::apply(&self.settings.page, scroll_y, renderer);
    }

    pub fn on_card_enter<R: Renderer>(&mut self, card: NodeId, now: Millis, renderer: &mut R) {
        let glow = self
            .effects
            .glow_enter(card, self.theme.current(), renderer);
        let delay = self.effects.settings().glow_fade_in_delay_ms;
        self.queue.schedule_once(now, delay, Event::FadeInGlow(glow));
    }

    pub fn on_card_leave<R: Renderer>(&mut self, card: NodeId, now: Millis, renderer: &mut R) {
        let fade = self.effects.settings().glow_fade_out_ms;
        for glow in self.effects.glow_leave(card, renderer) {
            self.queue.schedule_once(now, fade, Event::RemoveNode(glow));
        }
    }

    /// Ripple feedback on a button-like control
    pub fn on_button_click<R: Renderer>(
        &mut self,
        control: Target,
        x: f64,
        y: f64,
        now: Millis,
        renderer: &mut R,
    ) {
        let ripple = self.effects.ripple(control, x, y, renderer);
        let lifetime = self.effects.settings().ripple_lifetime_ms;
        self.queue
            .schedule_once(now, lifetime, Event::RemoveNode(ripple));
    }

    pub fn on_intersection<R: Renderer>(
        &mut self,
        node: NodeId,
        is_intersecting: bool,
        renderer: &mut R,
    ) -> bool {
        self.reveal.on_intersection(node, is_intersecting, renderer)
    }

    pub fn on_submit<R: Renderer>(&mut self, raw: &str, now: Millis, renderer: &mut R) -> SubmitOutcome {
        let outcome = self.signup.submit(raw, renderer);
        if outcome == SubmitOutcome::Started {
            let latency = self.signup.settings().latency_ms;
            self.queue.schedule_once(now, latency, Event::CompleteSignup);
        }
        outcome
    }

    pub fn on_input_focus<R: Renderer>(&mut self, focused: bool, renderer: &mut R) {
        self.signup.focus_changed(focused, renderer);
    }
}
