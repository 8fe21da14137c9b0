//! Three-page request wizard: the step cursor and the collaborators it drives.

pub mod collaborators;
pub mod navigator;
pub mod step;

pub use collaborators::{
    Collaborators, FormInspector, ProgressIndicator, RequestBuilder, RequestSender, UserPrompt,
};
pub use navigator::{
    validation_message, IgnoreReason, NavigationError, StepNavigator, Transition,
    TransitionTiming, LARGE_SELECTION_MESSAGE, STALE_REQUEST_MESSAGE,
};
pub use step::Step;

#[cfg(test)]
mod mock;
