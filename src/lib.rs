//! omi-wizard - step-by-step O-MI read request builder
//!
//! The [`wizard`] module holds the step navigator and the collaborator
//! traits it drives; [`request`] and [`ui`] provide the concrete
//! collaborators used by the terminal app.

pub mod app;
pub mod config;
pub mod logging;
pub mod request;
pub mod ui;
pub mod wizard;
