//! Bridges navigator prompts to the dialogs drawn by the event loop.
//!
//! The navigator awaits an answer while the event loop keeps drawing; each
//! prompt travels over a channel with a oneshot for the reply.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use super::dialogs::{PromptDialog, PromptKind};
use crate::wizard::UserPrompt;

/// A prompt waiting to be shown
#[derive(Debug)]
pub struct PromptRequest {
    pub kind: PromptKind,
    pub message: String,
    pub reply: oneshot::Sender<bool>,
}

impl PromptRequest {
    /// Split into the dialog to draw and the channel to answer on
    pub fn into_dialog(self) -> (PromptDialog, oneshot::Sender<bool>) {
        (PromptDialog::new(self.kind, self.message), self.reply)
    }
}

/// [`UserPrompt`] that asks the TUI to show a dialog
#[derive(Debug, Clone)]
pub struct TuiPrompt {
    tx: mpsc::UnboundedSender<PromptRequest>,
}

impl TuiPrompt {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PromptRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// `None` when the UI is gone
    async fn ask(&self, kind: PromptKind, message: &str) -> Option<bool> {
        let (reply, answer) = oneshot::channel();
        let request = PromptRequest {
            kind,
            message: message.to_string(),
            reply,
        };
        if self.tx.send(request).is_err() {
            tracing::debug!("Prompt dropped, UI closed");
            return None;
        }
        answer.await.ok()
    }
}

#[async_trait]
impl UserPrompt for TuiPrompt {
    async fn alert(&self, message: &str) {
        self.ask(PromptKind::Alert, message).await;
    }

    /// Declines when the UI closes before answering
    async fn confirm(&self, message: &str) -> bool {
        self.ask(PromptKind::Confirm, message)
            .await
            .unwrap_or(false)
    }
}
