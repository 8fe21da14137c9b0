//! Collaborator traits the step navigator calls into.
//!
//! The navigator owns none of these. The TUI wires in the real form session,
//! progress bar, request builder/sender and prompt dialogs; tests wire in
//! recording mocks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::Step;

/// Read access to the form the wizard is filling in.
pub trait FormInspector: Send + Sync {
    /// Whether the given step's inputs allow moving forward
    fn is_step_valid(&self, step: Step) -> bool;

    /// Number of currently selected objects
    fn selection_count(&self) -> usize;

    /// Whether the request is regenerated automatically on form edits
    fn auto_regenerate(&self) -> bool;

    fn set_auto_regenerate(&self, enabled: bool);
}

/// Visual step indicator (the progress bar).
pub trait ProgressIndicator: Send + Sync {
    /// Mark `step` as the active page
    fn set_active_step(&self, step: Step);

    /// Start the exit animation for the page being left.
    ///
    /// Fire-and-forget: the indicator ends the animation on its own after
    /// `duration`.
    fn start_exit_animation(&self, from: Step, duration: Duration);
}

/// Produces the pending outbound request from the form.
pub trait RequestBuilder: Send + Sync {
    /// Regenerate the request after `debounce`.
    ///
    /// A zero debounce regenerates before returning. Otherwise any pending
    /// regeneration is replaced, so rapid calls collapse into one.
    fn regenerate_request(&self, debounce: Duration);

    /// Run a regeneration that is still waiting out its debounce now.
    /// No-op when nothing is waiting.
    fn flush(&self);
}

/// Dispatches the pending request.
pub trait RequestSender: Send + Sync {
    /// Dispatch the current request. Returns once the dispatch is started.
    fn send(&self);

    /// Forget the last response
    fn clear_response(&self);

    /// Stop waiting for an in-flight response
    fn cancel(&self);
}

/// Blocking user notifications.
#[async_trait]
pub trait UserPrompt: Send + Sync {
    /// Show a message and wait until it is dismissed
    async fn alert(&self, message: &str);

    /// Ask a yes/no question
    async fn confirm(&self, message: &str) -> bool;
}

/// Everything the navigator talks to, bundled for construction.
#[derive(Clone)]
pub struct Collaborators {
    pub form: Arc<dyn FormInspector>,
    pub progress: Arc<dyn ProgressIndicator>,
    pub builder: Arc<dyn RequestBuilder>,
    pub sender: Arc<dyn RequestSender>,
    pub prompt: Arc<dyn UserPrompt>,
}
