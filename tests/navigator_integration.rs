//! End-to-end wizard runs against the real form, builder and sender.
//!
//! The O-MI node is a one-shot TCP listener on localhost that answers every
//! request with a canned response.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use omi_wizard::request::{
    FormSession, HttpRequestSender, OmiRequestBuilder, ParameterField, ResponseState,
};
use omi_wizard::ui::TuiProgress;
use omi_wizard::wizard::{
    Collaborators, FormInspector, RequestBuilder, RequestSender, Step, StepNavigator, Transition, TransitionTiming,
    UserPrompt,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Answers every confirm the same way and records what was asked
struct ScriptedPrompt {
    answer: bool,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            asked: Mutex::new(Vec::new()),
        })
    }

    fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserPrompt for ScriptedPrompt {
    async fn alert(&self, message: &str) {
        self.asked.lock().unwrap().push(message.to_string());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.asked.lock().unwrap().push(message.to_string());
        self.answer
    }
}

/// Captures the request text at the moment it is sent
struct CapturingSender {
    form: Arc<FormSession>,
    sent: Mutex<Vec<String>>,
}

impl RequestSender for CapturingSender {
    fn send(&self) {
        self.sent.lock().unwrap().push(self.form.request());
    }

    fn clear_response(&self) {}

    fn cancel(&self) {}
}

fn fast_timing() -> TransitionTiming {
    TransitionTiming {
        exit_animation: Duration::from_millis(1),
        transition_delay: Duration::from_millis(1),
        regenerate_debounce: Duration::ZERO,
    }
}

fn catalog_form(paths: &[&str]) -> Arc<FormSession> {
    let objects = paths.iter().map(|p| p.parse().unwrap()).collect();
    Arc::new(FormSession::new(objects, "10", true))
}

/// Serve exactly one HTTP exchange, returning the raw request it received
async fn one_shot_node(response_body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];
        while !String::from_utf8_lossy(&received).contains("</omiEnvelope>") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }
        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            response_body.len(),
            response_body
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&received).to_string()
    });

    (endpoint, handle)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_full_run_sends_request_for_checked_objects() {
    let form = catalog_form(&["House/Temperature", "House/Humidity", "Car/Speed"]);
    let sender = Arc::new(CapturingSender {
        form: form.clone(),
        sent: Mutex::new(Vec::new()),
    });
    let progress = Arc::new(TuiProgress::new());
    let prompt = ScriptedPrompt::new(true);

    let navigator = StepNavigator::new(
        Collaborators {
            form: form.clone(),
            progress: progress.clone(),
            builder: Arc::new(OmiRequestBuilder::new(form.clone()).unwrap()),
            sender: sender.clone(),
            prompt: prompt.clone(),
        },
        fast_timing(),
    );

    form.toggle_object(0);
    form.toggle_object(2);
    assert_eq!(
        navigator.advance().await,
        Ok(Transition::Moved {
            from: Step::Objects,
            to: Step::Parameters
        })
    );
    assert_eq!(progress.active_step(), Step::Parameters);

    form.push_char(ParameterField::Interval, '5');
    navigator.advance().await.unwrap();

    assert_eq!(navigator.current_step(), Step::Send);
    assert!(prompt.asked().is_empty());

    let sent = sender.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    // Rendered on entering the parameter page, before the interval was typed
    assert!(sent[0].contains("<Object>\n"));
    assert!(sent[0].contains("<id>House</id>"));
    assert!(sent[0].contains("<InfoItem name=\"Temperature\"/>"));
    assert!(sent[0].contains("<InfoItem name=\"Speed\"/>"));
    assert!(!sent[0].contains("Humidity"));
    assert!(!sent[0].contains("interval="));
}

#[tokio::test]
async fn test_stale_request_is_regenerated_before_sending() {
    let form = catalog_form(&["House/Temperature"]);
    form.set_auto_regenerate(false);
    let sender = Arc::new(CapturingSender {
        form: form.clone(),
        sent: Mutex::new(Vec::new()),
    });
    let prompt = ScriptedPrompt::new(true);

    let navigator = StepNavigator::new(
        Collaborators {
            form: form.clone(),
            progress: Arc::new(TuiProgress::new()),
            builder: Arc::new(OmiRequestBuilder::new(form.clone()).unwrap()),
            sender: sender.clone(),
            prompt: prompt.clone(),
        },
        fast_timing(),
    );

    form.toggle_object(0);
    navigator.advance().await.unwrap();
    form.push_char(ParameterField::Interval, '5');
    navigator.advance().await.unwrap();

    assert_eq!(prompt.asked().len(), 1);
    let sent = sender.sent.lock().unwrap().clone();
    assert!(sent[0].contains("interval=\"5\""));
}

#[tokio::test(start_paused = true)]
async fn test_quick_run_with_default_timing_sends_rendered_request() {
    let form = catalog_form(&["House/Temperature", "House/Humidity"]);
    let sender = Arc::new(CapturingSender {
        form: form.clone(),
        sent: Mutex::new(Vec::new()),
    });

    let navigator = StepNavigator::new(
        Collaborators {
            form: form.clone(),
            progress: Arc::new(TuiProgress::new()),
            builder: Arc::new(OmiRequestBuilder::new(form.clone()).unwrap()),
            sender: sender.clone(),
            prompt: ScriptedPrompt::new(true),
        },
        TransitionTiming::default(),
    );

    form.toggle_object(0);
    navigator.advance().await.unwrap();
    // Straight on, well inside the regeneration debounce
    navigator.advance().await.unwrap();

    let sent = sender.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("<InfoItem name=\"Temperature\"/>"));
    assert!(!sent[0].contains("Humidity"));
}

#[tokio::test(start_paused = true)]
async fn test_last_edit_before_send_reaches_the_request() {
    let form = catalog_form(&["House/Temperature"]);
    let builder = Arc::new(OmiRequestBuilder::new(form.clone()).unwrap());
    let sender = Arc::new(CapturingSender {
        form: form.clone(),
        sent: Mutex::new(Vec::new()),
    });
    let timing = TransitionTiming::default();

    let navigator = StepNavigator::new(
        Collaborators {
            form: form.clone(),
            progress: Arc::new(TuiProgress::new()),
            builder: builder.clone(),
            sender: sender.clone(),
            prompt: ScriptedPrompt::new(true),
        },
        timing,
    );

    form.toggle_object(0);
    navigator.advance().await.unwrap();

    // What the app does on a keystroke in the TTL field
    form.push_char(ParameterField::Ttl, '5');
    builder.regenerate_request(timing.regenerate_debounce);
    navigator.advance().await.unwrap();

    let sent = sender.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("ttl=\"105\""));
    assert!(sent[0].contains("<InfoItem name=\"Temperature\"/>"));
}

#[tokio::test]
async fn test_invalid_ttl_blocks_the_send_page() {
    let form = catalog_form(&["House/Temperature"]);
    let sender = Arc::new(CapturingSender {
        form: form.clone(),
        sent: Mutex::new(Vec::new()),
    });
    let prompt = ScriptedPrompt::new(true);

    let navigator = StepNavigator::new(
        Collaborators {
            form: form.clone(),
            progress: Arc::new(TuiProgress::new()),
            builder: Arc::new(OmiRequestBuilder::new(form.clone()).unwrap()),
            sender: sender.clone(),
            prompt: prompt.clone(),
        },
        fast_timing(),
    );

    form.toggle_object(0);
    navigator.advance().await.unwrap();
    form.push_char(ParameterField::Ttl, 'x');

    assert!(navigator.advance().await.is_err());
    assert_eq!(navigator.current_step(), Step::Parameters);
    assert_eq!(
        prompt.asked(),
        vec!["Please specify TTL (Time to live) as numeric value".to_string()]
    );
    assert!(sender.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_http_sender_records_node_response() {
    let (endpoint, node) = one_shot_node("<omiEnvelope><response/></omiEnvelope>").await;

    let form = catalog_form(&["House/Temperature"]);
    let sender = Arc::new(HttpRequestSender::new(
        form.clone(),
        endpoint,
        reqwest::Client::new(),
    ));

    let navigator = StepNavigator::new(
        Collaborators {
            form: form.clone(),
            progress: Arc::new(TuiProgress::new()),
            builder: Arc::new(OmiRequestBuilder::new(form.clone()).unwrap()),
            sender,
            prompt: ScriptedPrompt::new(true),
        },
        fast_timing(),
    );

    form.toggle_object(0);
    navigator.advance().await.unwrap();
    navigator.advance().await.unwrap();

    let received = tokio::time::timeout(Duration::from_secs(5), node)
        .await
        .unwrap()
        .unwrap();
    assert!(received.starts_with("POST / HTTP/1.1"));
    assert!(received.contains("text/xml"));
    assert!(received.contains("<InfoItem name=\"Temperature\"/>"));

    let mut response = form.response();
    for _ in 0..100 {
        if !matches!(response, ResponseState::Pending) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        response = form.response();
    }
    assert_eq!(
        response,
        ResponseState::Received {
            status: 200,
            body: "<omiEnvelope><response/></omiEnvelope>".to_string(),
        }
    );
}

#[tokio::test]
async fn test_progress_follows_retreat() {
    let form = catalog_form(&["House/Temperature"]);
    let progress = Arc::new(TuiProgress::new());
    let navigator = StepNavigator::new(
        Collaborators {
            form: form.clone(),
            progress: progress.clone(),
            builder: Arc::new(OmiRequestBuilder::new(form.clone()).unwrap()),
            sender: Arc::new(CapturingSender {
                form: form.clone(),
                sent: Mutex::new(Vec::new()),
            }),
            prompt: ScriptedPrompt::new(true),
        },
        fast_timing(),
    );

    form.toggle_object(0);
    navigator.advance().await.unwrap();
    navigator.retreat().await;

    assert_eq!(navigator.current_step(), Step::Objects);
    assert_eq!(progress.active_step(), Step::Objects);
    assert!(form.is_step_valid(Step::Objects));
}
