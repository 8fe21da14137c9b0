//! Recording collaborators for navigator tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::collaborators::*;
use super::Step;

/// A call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    Alert(String),
    Confirm(String),
    Regenerate(Duration),
    Flush,
    Send,
    ClearResponse,
    Cancel,
    ActiveStep(Step),
    ExitAnimation(Step),
}

/// Implements every collaborator trait and logs each call in order
#[derive(Clone)]
pub struct MockWizard {
    pub invalid_steps: Arc<Mutex<HashSet<Step>>>,
    pub selection_count: Arc<Mutex<usize>>,
    pub auto_regenerate: Arc<Mutex<bool>>,
    pub confirm_answer: Arc<Mutex<bool>>,
    pub events: Arc<Mutex<Vec<MockEvent>>>,
}

impl MockWizard {
    pub fn new() -> Self {
        Self {
            invalid_steps: Arc::new(Mutex::new(HashSet::new())),
            selection_count: Arc::new(Mutex::new(1)),
            auto_regenerate: Arc::new(Mutex::new(true)),
            confirm_answer: Arc::new(Mutex::new(true)),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        let shared = Arc::new(self.clone());
        Collaborators {
            form: shared.clone(),
            progress: shared.clone(),
            builder: shared.clone(),
            sender: shared.clone(),
            prompt: shared,
        }
    }

    pub fn set_invalid(&self, step: Step) {
        self.invalid_steps.lock().unwrap().insert(step);
    }

    pub fn set_valid(&self, step: Step) {
        self.invalid_steps.lock().unwrap().remove(&step);
    }

    pub fn set_selection_count(&self, count: usize) {
        *self.selection_count.lock().unwrap() = count;
    }

    pub fn set_auto_regenerate_flag(&self, enabled: bool) {
        *self.auto_regenerate.lock().unwrap() = enabled;
    }

    pub fn answer_confirms(&self, answer: bool) {
        *self.confirm_answer.lock().unwrap() = answer;
    }

    pub fn events(&self) -> Vec<MockEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear_events(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&MockEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }

    fn record(&self, event: MockEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl FormInspector for MockWizard {
    fn is_step_valid(&self, step: Step) -> bool {
        !self.invalid_steps.lock().unwrap().contains(&step)
    }

    fn selection_count(&self) -> usize {
        *self.selection_count.lock().unwrap()
    }

    fn auto_regenerate(&self) -> bool {
        *self.auto_regenerate.lock().unwrap()
    }

    fn set_auto_regenerate(&self, enabled: bool) {
        *self.auto_regenerate.lock().unwrap() = enabled;
    }
}

impl ProgressIndicator for MockWizard {
    fn set_active_step(&self, step: Step) {
        self.record(MockEvent::ActiveStep(step));
    }

    fn start_exit_animation(&self, from: Step, _duration: Duration) {
        self.record(MockEvent::ExitAnimation(from));
    }
}

impl RequestBuilder for MockWizard {
    fn regenerate_request(&self, debounce: Duration) {
        self.record(MockEvent::Regenerate(debounce));
    }

    fn flush(&self) {
        self.record(MockEvent::Flush);
    }
}

impl RequestSender for MockWizard {
    fn send(&self) {
        self.record(MockEvent::Send);
    }

    fn clear_response(&self) {
        self.record(MockEvent::ClearResponse);
    }

    fn cancel(&self) {
        self.record(MockEvent::Cancel);
    }
}

#[async_trait]
impl UserPrompt for MockWizard {
    async fn alert(&self, message: &str) {
        self.record(MockEvent::Alert(message.to_string()));
        // Give overlapping callers a chance to run while the alert is open
        tokio::task::yield_now().await;
    }

    async fn confirm(&self, message: &str) -> bool {
        self.record(MockEvent::Confirm(message.to_string()));
        *self.confirm_answer.lock().unwrap()
    }
}
