//! The three wizard pages: key handling and rendering.
//!
//! Navigation keys are reported back as [`WizardAction`]s; moving between
//! pages is the navigator's job.

mod steps;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{ListState, Paragraph},
    Frame,
};

use super::keybindings::footer_hints;
use super::progress::{render_progress_bar, TuiProgress};
use crate::request::{FormData, FormSession, ParameterField};
use crate::wizard::{FormInspector, Step};

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Advance,
    Retreat,
    Quit,
    /// The form changed; the request may need regenerating
    Edited,
    None,
}

/// Characters accepted in the TTL and interval fields
fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-')
}

/// Per-page view state
pub struct WizardScreen {
    pub(crate) object_state: ListState,
    pub(crate) field: ParameterField,
    pub(crate) response_scroll: u16,
}

impl Default for WizardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardScreen {
    pub fn new() -> Self {
        let mut object_state = ListState::default();
        object_state.select(Some(0));
        Self {
            object_state,
            field: ParameterField::Ttl,
            response_scroll: 0,
        }
    }

    /// Focused parameter field
    pub fn field(&self) -> ParameterField {
        self.field
    }

    /// Highlighted row of the object checklist
    pub fn selected_object(&self) -> Option<usize> {
        self.object_state.selected()
    }

    pub fn handle_key(&mut self, step: Step, key: KeyEvent, form: &FormSession) -> WizardAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return WizardAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') => return WizardAction::Quit,
            KeyCode::Enter | KeyCode::Right => return WizardAction::Advance,
            KeyCode::Esc | KeyCode::Left => return WizardAction::Retreat,
            _ => {}
        }

        match step {
            Step::Objects => self.handle_objects_key(key.code, form),
            Step::Parameters => self.handle_parameters_key(key.code, form),
            Step::Send => self.handle_send_key(key.code),
        }
    }

    fn handle_objects_key(&mut self, code: KeyCode, form: &FormSession) -> WizardAction {
        let count = form.object_count();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(i) = self.object_state.selected() {
                    self.object_state.select(Some(i.saturating_sub(1)));
                }
                WizardAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let next = self
                    .object_state
                    .selected()
                    .map_or(0, |i| (i + 1).min(count.saturating_sub(1)));
                self.object_state.select(Some(next));
                WizardAction::None
            }
            KeyCode::Char(' ') => match self.object_state.selected() {
                Some(i) if i < count => {
                    form.toggle_object(i);
                    WizardAction::Edited
                }
                _ => WizardAction::None,
            },
            KeyCode::Char('a') if count > 0 => {
                form.toggle_all();
                WizardAction::Edited
            }
            _ => WizardAction::None,
        }
    }

    fn handle_parameters_key(&mut self, code: KeyCode, form: &FormSession) -> WizardAction {
        match code {
            KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                self.field = self.field.toggle();
                WizardAction::None
            }
            KeyCode::Backspace => {
                form.pop_char(self.field);
                WizardAction::Edited
            }
            KeyCode::Char('r') => {
                let enabled = !form.auto_regenerate();
                form.set_auto_regenerate(enabled);
                tracing::debug!(enabled, "Toggled automatic regeneration");
                WizardAction::Edited
            }
            KeyCode::Char(c) if is_number_char(c) => {
                form.push_char(self.field, c);
                WizardAction::Edited
            }
            _ => WizardAction::None,
        }
    }

    fn handle_send_key(&mut self, code: KeyCode) -> WizardAction {
        match code {
            KeyCode::Up => self.response_scroll = self.response_scroll.saturating_sub(1),
            KeyCode::Down => self.response_scroll = self.response_scroll.saturating_add(1),
            _ => {}
        }
        WizardAction::None
    }

    /// Reset per-page view state when a page is entered
    pub fn on_page_entered(&mut self, step: Step) {
        if step == Step::Send {
            self.response_scroll = 0;
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        step: Step,
        form: &FormData,
        progress: &TuiProgress,
        busy: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress bar
                Constraint::Min(5),    // Page
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        render_progress_bar(frame, chunks[0], progress);

        match step {
            Step::Objects => self.render_objects_step(frame, chunks[1], form),
            Step::Parameters => self.render_parameters_step(frame, chunks[1], form),
            Step::Send => self.render_send_step(frame, chunks[1], form),
        }

        render_footer(frame, chunks[2], step, busy);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, step: Step, busy: bool) {
    let mut spans = vec![Span::styled(
        footer_hints(step),
        Style::default().fg(Color::DarkGray),
    )];
    if busy {
        spans.push(Span::styled("  …", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
