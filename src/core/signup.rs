//! Signup form controller
//!
//! Drives the notify-me button through its phases. There is no backend: the
//! subscription is a fixed delay scheduled by the orchestrator, which calls
//! [`SignupForm::complete`] and later [`SignupForm::restore`].

use super::renderer::{Renderer, Target};
use super::settings::SignupSettings;
use super::validation::{EmailError, validate_email};

/// Lifecycle of a single attempt
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SignupPhase {
    #[default]
    Idle,
    Validating,
    Rejected(EmailError),
    Submitting,
    Succeeded,
}

impl SignupPhase {
    /// An attempt is in flight and new submits are ignored
    pub fn is_busy(&self) -> bool {
        matches!(self, SignupPhase::Submitting | SignupPhase::Succeeded)
    }
}

/// Result of a submit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Valid address, subscription under way
    Started,
    Rejected(EmailError),
    /// Previous attempt still running
    Busy,
}

#[derive(Debug)]
pub struct SignupForm {
    phase: SignupPhase,
    original_label: Option<String>,
    settings: SignupSettings,
}

impl SignupForm {
    pub fn new(settings: SignupSettings) -> Self {
        Self {
            phase: SignupPhase::Idle,
            original_label: None,
            settings,
        }
    }

    pub fn phase(&self) -> &SignupPhase {
        &self.phase
    }

    pub fn settings(&self) -> &SignupSettings {
        &self.settings
    }

    /// Validate the raw input and, if valid, switch the button to its working state
    pub fn submit<R: Renderer>(&mut self, raw: &str, renderer: &mut R) -> SubmitOutcome {
        if self.phase.is_busy() {
            return SubmitOutcome::Busy;
        }

        self.phase = SignupPhase::Validating;
        let email = raw.trim();
        if let Err(err) = validate_email(email) {
            tracing::debug!("signup rejected: {err}");
            self.phase = SignupPhase::Rejected(err.clone());
            return SubmitOutcome::Rejected(err);
        }

        self.original_label = Some(renderer.text(Target::SignupButton));
        renderer.set_text(Target::SignupButton, &self.settings.working_label);
        renderer.set_attribute(Target::SignupButton, "disabled", "");
        self.phase = SignupPhase::Submitting;
        tracing::debug!("signup submitting");
        SubmitOutcome::Started
    }

    /// The simulated request finished
    pub fn complete<R: Renderer>(&mut self, renderer: &mut R) -> bool {
        if self.phase != SignupPhase::Submitting {
            return false;
        }
        renderer.set_text(Target::SignupButton, &self.settings.success_label);
        renderer.set_style(
            Target::SignupButton,
            "background",
            &self.settings.success_background,
        );
        self.phase = SignupPhase::Succeeded;
        true
    }

    /// Put the button back the way it was and clear the input
    pub fn restore<R: Renderer>(&mut self, renderer: &mut R) -> bool {
        if self.phase != SignupPhase::Succeeded {
            return false;
        }
        let label = self.original_label.take().unwrap_or_default();
        renderer.set_text(Target::SignupButton, &label);
        renderer.remove_attribute(Target::SignupButton, "disabled");
        renderer.set_style(Target::SignupButton, "background", "");
        renderer.set_value(Target::SignupInput, "");
        self.phase = SignupPhase::Idle;
        true
    }

    /// Scale the input wrapper while the input has focus
    pub fn focus_changed<R: Renderer>(&self, focused: bool, renderer: &mut R) {
        let scale = if focused { "scale(1.02)" } else { "scale(1)" };
        renderer.set_style(Target::SignupInputWrapper, "transform", scale);
    }
}
