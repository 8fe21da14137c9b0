//! Terminal wizard: wires the collaborators together and runs the event loop.
//!
//! Key presses become navigator commands on spawned tasks, so the loop keeps
//! drawing (and answering prompts) while a transition is in flight.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::config::Config;
use crate::request::{http_client, FormSession, HttpRequestSender, OdfPath, OmiRequestBuilder};
use crate::ui::{
    PromptDialog, PromptRequest, TerminalGuard, TuiProgress, TuiPrompt, WizardAction,
    WizardScreen,
};
use crate::wizard::{Collaborators, FormInspector, RequestBuilder, Step, StepNavigator};

pub struct App {
    config: Config,
    form: Arc<FormSession>,
    navigator: Arc<StepNavigator>,
    progress: Arc<TuiProgress>,
    builder: Arc<OmiRequestBuilder>,
    screen: WizardScreen,
    prompts: mpsc::UnboundedReceiver<PromptRequest>,
    /// Open dialog and where its answer goes
    dialog: Option<(PromptDialog, oneshot::Sender<bool>)>,
    shown_step: Step,
    should_quit: bool,
}

impl App {
    /// Build the wizard over `objects`. Must be called inside a tokio runtime.
    pub fn new(config: Config, objects: Vec<OdfPath>) -> Result<Self> {
        let form = Arc::new(FormSession::new(
            objects,
            &config.request.default_ttl,
            config.request.auto_regenerate,
        ));
        let builder = Arc::new(OmiRequestBuilder::new(form.clone())?);
        let sender = Arc::new(HttpRequestSender::new(
            form.clone(),
            config.request.endpoint.clone(),
            http_client(&config.request)?,
        ));
        let progress = Arc::new(TuiProgress::new());
        let (prompt, prompts) = TuiPrompt::channel();

        let collaborators = Collaborators {
            form: form.clone(),
            progress: progress.clone(),
            builder: builder.clone(),
            sender,
            prompt: Arc::new(prompt),
        };
        let navigator = Arc::new(StepNavigator::from_config(collaborators, &config.wizard));

        Ok(Self {
            config,
            form,
            navigator,
            progress,
            builder,
            screen: WizardScreen::new(),
            prompts,
            dialog: None,
            shown_step: Step::FIRST,
            should_quit: false,
        })
    }

    pub fn current_step(&self) -> Step {
        self.navigator.current_step()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Message of the open dialog, if any
    pub fn dialog(&self) -> Option<&PromptDialog> {
        self.dialog.as_ref().map(|(dialog, _)| dialog)
    }

    pub fn form(&self) -> &Arc<FormSession> {
        &self.form
    }

    pub async fn run(&mut self) -> Result<()> {
        let guard = TerminalGuard::new()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        info!(
            endpoint = %self.config.request.endpoint,
            objects = self.form.object_count(),
            "Wizard started"
        );

        while !self.should_quit {
            self.sync();
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }

        info!(step = %self.current_step(), "Wizard closed");
        drop(guard);
        Ok(())
    }

    /// Pick up page changes and queued prompts
    pub fn sync(&mut self) {
        let step = self.navigator.current_step();
        if step != self.shown_step {
            self.screen.on_page_entered(step);
            self.shown_step = step;
        }

        if self.dialog.is_none() {
            if let Ok(request) = self.prompts.try_recv() {
                debug!(kind = ?request.kind, "Showing prompt");
                self.dialog = Some(request.into_dialog());
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let snapshot = self.form.snapshot();
        self.screen.render(
            frame,
            self.shown_step,
            &snapshot,
            &self.progress,
            self.navigator.is_busy(),
        );
        if let Some((dialog, _)) = &self.dialog {
            dialog.render(frame);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some((dialog, _)) = self.dialog.as_mut() {
            if let Some(answer) = dialog.handle_key(key.code) {
                if let Some((_, reply)) = self.dialog.take() {
                    // The navigator may have been dropped mid-transition
                    let _ = reply.send(answer);
                }
            }
            return;
        }

        match self
            .screen
            .handle_key(self.shown_step, key, &self.form)
        {
            WizardAction::Advance => self.spawn_advance(),
            WizardAction::Retreat => self.spawn_retreat(),
            WizardAction::Quit => self.should_quit = true,
            WizardAction::Edited => self.on_form_edited(),
            WizardAction::None => {}
        }
    }

    fn spawn_advance(&self) {
        if self.navigator.is_busy() {
            debug!("Ignoring advance key, transition in flight");
            return;
        }
        let navigator = self.navigator.clone();
        tokio::spawn(async move {
            match navigator.advance().await {
                Ok(transition) => debug!(?transition, "Advance finished"),
                Err(e) => debug!(error = %e, "Advance rejected"),
            }
        });
    }

    fn spawn_retreat(&self) {
        if self.navigator.is_busy() {
            debug!("Ignoring retreat key, transition in flight");
            return;
        }
        let navigator = self.navigator.clone();
        tokio::spawn(async move {
            let transition = navigator.retreat().await;
            debug!(?transition, "Retreat finished");
        });
    }

    fn on_form_edited(&self) {
        if self.form.auto_regenerate() {
            self.builder.regenerate_request(Duration::from_millis(
                self.config.wizard.regenerate_debounce_ms,
            ));
        }
    }
}
