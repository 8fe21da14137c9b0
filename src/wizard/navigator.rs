//! Step navigator: the wizard's page cursor and its transitions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::collaborators::Collaborators;
use super::Step;
use crate::config::WizardConfig;

/// Shown when leaving the object page with nothing checked
pub const NO_OBJECTS_MESSAGE: &str = "Please check at least one object";

/// Shown when leaving the parameter page with a bad TTL
pub const INVALID_TTL_MESSAGE: &str = "Please specify TTL (Time to live) as numeric value";

/// Offered on entering the parameter page with a large selection
pub const LARGE_SELECTION_MESSAGE: &str = "You have checked lot of objects. This webform has \
automatic request generation enabled by default. Do you want to disable automatic generation \
to prevent the page from lagging?";

/// Offered on entering the send page while automatic regeneration is off
pub const STALE_REQUEST_MESSAGE: &str = "You have disabled automatic generation, thus your \
request might not be up-to-date. Do you want to generate the message once more before sending? \
(Note: your manual changes to the request will be overwritten)";

/// Selections above this size offer to turn automatic regeneration off
pub const DEFAULT_LARGE_SELECTION_THRESHOLD: usize = 100;

/// Alert shown when leaving `step` with invalid input.
///
/// `None` for the send page, which is never left forwards.
pub fn validation_message(step: Step) -> Option<&'static str> {
    match step {
        Step::Objects => Some(NO_OBJECTS_MESSAGE),
        Step::Parameters => Some(INVALID_TTL_MESSAGE),
        Step::Send => None,
    }
}

/// Delays used when moving between pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    /// How long the exit animation runs
    pub exit_animation: Duration,
    /// Delay between the trigger and the cursor moving
    pub transition_delay: Duration,
    /// Debounce for the regeneration triggered on entering the parameter page
    pub regenerate_debounce: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            exit_animation: Duration::from_millis(150),
            transition_delay: Duration::from_millis(300),
            regenerate_debounce: Duration::from_millis(1000),
        }
    }
}

impl From<&WizardConfig> for TransitionTiming {
    fn from(config: &WizardConfig) -> Self {
        Self {
            exit_animation: Duration::from_millis(config.exit_animation_ms),
            transition_delay: Duration::from_millis(config.transition_delay_ms),
            regenerate_debounce: Duration::from_millis(config.regenerate_debounce_ms),
        }
    }
}

/// Why a command left the cursor where it was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another transition is still in flight
    Busy,
    /// Retreat on the first page
    AtFirstStep,
    /// Advance on the last page
    AtLastStep,
}

/// Outcome of a navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Step, to: Step },
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("step {step} is incomplete: {message}")]
    Validation { step: Step, message: &'static str },
}

/// Releases the busy token when the transition is done (or dropped).
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the step cursor; `advance` and `retreat` are its only mutators.
///
/// Shared behind an `Arc` so UI events can spawn transitions. At most one
/// transition is in flight at a time; commands arriving meanwhile are
/// ignored.
pub struct StepNavigator {
    cursor: Mutex<Step>,
    busy: AtomicBool,
    collaborators: Collaborators,
    timing: TransitionTiming,
    large_selection_threshold: usize,
}

impl StepNavigator {
    pub fn new(collaborators: Collaborators, timing: TransitionTiming) -> Self {
        Self {
            cursor: Mutex::new(Step::FIRST),
            busy: AtomicBool::new(false),
            collaborators,
            timing,
            large_selection_threshold: DEFAULT_LARGE_SELECTION_THRESHOLD,
        }
    }

    /// Build a navigator from the `[wizard]` config section
    pub fn from_config(collaborators: Collaborators, config: &WizardConfig) -> Self {
        Self::new(collaborators, TransitionTiming::from(config))
            .with_large_selection_threshold(config.large_selection_threshold)
    }

    pub fn with_large_selection_threshold(mut self, threshold: usize) -> Self {
        self.large_selection_threshold = threshold;
        self
    }

    pub fn current_step(&self) -> Step {
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn timing(&self) -> TransitionTiming {
        self.timing
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }

    fn move_cursor(&self, to: Step) {
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner) = to;
        self.collaborators.progress.set_active_step(to);
    }

    /// Move to the next page.
    ///
    /// Validation failures are alerted to the user and returned; the cursor
    /// does not move.
    pub async fn advance(&self) -> Result<Transition, NavigationError> {
        if self.is_busy() {
            debug!("advance ignored, transition in flight");
            return Ok(Transition::Ignored(IgnoreReason::Busy));
        }

        let from = self.current_step();
        let Some(to) = from.next() else {
            debug!(step = %from, "advance ignored on last step");
            return Ok(Transition::Ignored(IgnoreReason::AtLastStep));
        };

        // Held through the validation alert
        let Some(_busy) = self.try_begin() else {
            debug!("advance ignored, transition in flight");
            return Ok(Transition::Ignored(IgnoreReason::Busy));
        };

        if let Some(message) =
            validation_message(from).filter(|_| !self.collaborators.form.is_step_valid(from))
        {
            warn!(step = %from, message, "step validation failed");
            self.collaborators.prompt.alert(message).await;
            return Err(NavigationError::Validation {
                step: from,
                message,
            });
        }

        if from == Step::Parameters {
            self.collaborators.sender.clear_response();
        }

        self.collaborators
            .progress
            .start_exit_animation(from, self.timing.exit_animation);
        tokio::time::sleep(self.timing.transition_delay).await;

        self.move_cursor(to);
        info!(from = %from, to = %to, "advanced step");

        self.on_enter_step(to).await;
        Ok(Transition::Moved { from, to })
    }

    /// Move to the previous page. Never prompts.
    pub async fn retreat(&self) -> Transition {
        if self.is_busy() {
            debug!("retreat ignored, transition in flight");
            return Transition::Ignored(IgnoreReason::Busy);
        }

        let from = self.current_step();
        let Some(to) = from.prev() else {
            debug!(step = %from, "retreat ignored on first step");
            return Transition::Ignored(IgnoreReason::AtFirstStep);
        };

        let Some(_busy) = self.try_begin() else {
            debug!("retreat ignored, transition in flight");
            return Transition::Ignored(IgnoreReason::Busy);
        };

        if from == Step::Send {
            self.collaborators.sender.cancel();
        }

        self.collaborators
            .progress
            .start_exit_animation(from, self.timing.exit_animation);
        tokio::time::sleep(self.timing.transition_delay).await;

        self.move_cursor(to);
        info!(from = %from, to = %to, "retreated step");
        Transition::Moved { from, to }
    }

    async fn on_enter_step(&self, step: Step) {
        let c = &self.collaborators;
        match step {
            Step::Objects => {}
            Step::Parameters => {
                let selected = c.form.selection_count();
                if selected > self.large_selection_threshold
                    && c.prompt.confirm(LARGE_SELECTION_MESSAGE).await
                {
                    info!(selected, "automatic regeneration disabled for large selection");
                    c.form.set_auto_regenerate(false);
                }
                c.builder.regenerate_request(self.timing.regenerate_debounce);
            }
            Step::Send => {
                // A debounced regeneration still waiting would land after the send
                c.builder.flush();
                if !c.form.auto_regenerate() && c.prompt.confirm(STALE_REQUEST_MESSAGE).await {
                    c.builder.regenerate_request(Duration::ZERO);
                }
                c.sender.send();
            }
        }
    }
}
