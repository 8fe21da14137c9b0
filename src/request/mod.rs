//! O-MI request composition and dispatch.
//!
//! Concrete collaborators for the wizard: the form session (validation),
//! the debounced request builder and the HTTP sender.

pub mod builder;
pub mod catalog;
pub mod envelope;
pub mod form;
pub mod odf;
pub mod sender;

pub use builder::OmiRequestBuilder;
pub use catalog::{load_catalog, parse_catalog};
pub use envelope::{EnvelopeRenderer, ReadRequest};
pub use form::{FormData, FormSession, ParameterField, ResponseState};
pub use odf::{OdfPath, OdfPathError};
pub use sender::{http_client, post_request, HttpRequestSender, NodeResponse, SendError};
