//! Posting requests to an O-MI node

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::task::JoinHandle;

use super::form::{FormSession, ResponseState};
use crate::config::RequestConfig;
use crate::wizard::RequestSender;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("request is empty")]
    EmptyRequest,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Status and body returned by the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeResponse {
    pub status: u16,
    pub body: String,
}

/// POST `body` as XML to `endpoint`
pub async fn post_request(
    client: &Client,
    endpoint: &str,
    body: String,
) -> Result<NodeResponse, SendError> {
    if body.trim().is_empty() {
        return Err(SendError::EmptyRequest);
    }

    let response = client
        .post(endpoint)
        .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
        .body(body)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok(NodeResponse { status, body })
}

/// Build the HTTP client used for node requests
pub fn http_client(config: &RequestConfig) -> Result<Client, SendError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

/// Sends the form's request and records the outcome in the form.
pub struct HttpRequestSender {
    form: Arc<FormSession>,
    endpoint: String,
    client: Client,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl HttpRequestSender {
    pub fn new(form: Arc<FormSession>, endpoint: String, client: Client) -> Self {
        Self {
            form,
            endpoint,
            client,
            in_flight: Mutex::new(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn take_in_flight(&self) -> Option<JoinHandle<()>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl RequestSender for HttpRequestSender {
    fn send(&self) {
        if let Some(previous) = self.take_in_flight() {
            previous.abort();
        }

        let body = self.form.request();
        if body.trim().is_empty() {
            tracing::warn!("Not sending an empty request");
            self.form
                .set_response(ResponseState::Failed(SendError::EmptyRequest.to_string()));
            return;
        }

        self.form.set_response(ResponseState::Pending);
        tracing::info!(endpoint = %self.endpoint, bytes = body.len(), "Sending request");

        let form = self.form.clone();
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let handle = tokio::spawn(async move {
            let state = match post_request(&client, &endpoint, body).await {
                Ok(response) => {
                    tracing::info!(status = response.status, "Received response");
                    ResponseState::Received {
                        status: response.status,
                        body: response.body,
                    }
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "Request failed");
                    ResponseState::Failed(e.to_string())
                }
            };
            form.set_response(state);
        });

        *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    fn clear_response(&self) {
        self.form.set_response(ResponseState::Empty);
    }

    fn cancel(&self) {
        if let Some(handle) = self.take_in_flight() {
            handle.abort();
        }
        if self.form.response() == ResponseState::Pending {
            tracing::debug!("Cancelled pending request");
            self.form.set_response(ResponseState::Empty);
        }
    }
}
