//! Debounced O-MI request regeneration

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;

use super::envelope::EnvelopeRenderer;
use super::form::FormSession;
use crate::wizard::RequestBuilder;

/// Regenerates the form's request text from its current inputs.
///
/// A new debounced call replaces the one still waiting, so a burst of edits
/// renders once.
pub struct OmiRequestBuilder {
    form: Arc<FormSession>,
    renderer: Arc<EnvelopeRenderer>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

fn regenerate(form: &FormSession, renderer: &EnvelopeRenderer) -> Result<()> {
    let request = form.read_request();
    let xml = renderer.render(&request)?;
    form.set_request(xml);
    tracing::debug!(objects = request.paths.len(), "Regenerated request");
    Ok(())
}

impl OmiRequestBuilder {
    pub fn new(form: Arc<FormSession>) -> Result<Self> {
        Ok(Self {
            form,
            renderer: Arc::new(EnvelopeRenderer::new()?),
            pending: Mutex::new(None),
        })
    }

    /// Render immediately, bypassing the debounce
    pub fn regenerate_now(&self) -> Result<()> {
        regenerate(&self.form, &self.renderer)
    }

    /// Whether a debounced regeneration is still waiting to run
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl RequestBuilder for OmiRequestBuilder {
    fn regenerate_request(&self, debounce: Duration) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        if debounce.is_zero() {
            if let Err(e) = self.regenerate_now() {
                tracing::warn!(error = %e, "Request regeneration failed");
            }
            return;
        }

        let form = self.form.clone();
        let renderer = self.renderer.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Err(e) = regenerate(&form, &renderer) {
                tracing::warn!(error = %e, "Request regeneration failed");
            }
        }));
    }

    fn flush(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(handle) = pending.take() else {
            return;
        };
        if handle.is_finished() {
            return;
        }

        handle.abort();
        tracing::debug!("Flushing pending regeneration");
        if let Err(e) = self.regenerate_now() {
            tracing::warn!(error = %e, "Request regeneration failed");
        }
    }
}

impl Drop for OmiRequestBuilder {
    fn drop(&mut self) {
        if let Some(handle) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}
