use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;

/// Alert only acknowledges; confirm answers yes or no
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Alert,
    Confirm,
}

/// Highlighted button of a confirm dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Yes,
    No,
}

impl PromptChoice {
    fn toggle(self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }
}

/// Modal alert/confirm shown over the wizard
#[derive(Debug, Clone)]
pub struct PromptDialog {
    pub kind: PromptKind,
    pub message: String,
    pub selection: PromptChoice,
}

impl PromptDialog {
    pub fn new(kind: PromptKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            selection: PromptChoice::Yes,
        }
    }

    /// Feed a key press. Returns the answer once the dialog is closed.
    ///
    /// Alerts close on any key and answer `true`.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<bool> {
        if self.kind == PromptKind::Alert {
            return Some(true);
        }

        match key {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selection = self.selection.toggle();
                None
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            KeyCode::Enter => Some(self.selection == PromptChoice::Yes),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = centered_rect(60, 40, frame.area());
        frame.render_widget(Clear, area);

        let (title, color) = match self.kind {
            PromptKind::Alert => (" Notice ", Color::Yellow),
            PromptKind::Confirm => (" Confirm ", Color::Cyan),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .margin(1)
            .split(inner);

        let message = Paragraph::new(self.message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White));
        frame.render_widget(message, chunks[0]);

        let buttons = match self.kind {
            PromptKind::Alert => Line::from(Span::styled(
                " [OK] ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            PromptKind::Confirm => Line::from(vec![
                Span::styled(" [Y]es ", self.button_style(PromptChoice::Yes, Color::Green)),
                Span::raw("   "),
                Span::styled(" [N]o ", self.button_style(PromptChoice::No, Color::Red)),
            ]),
        };
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            chunks[1],
        );
    }

    fn button_style(&self, choice: PromptChoice, color: Color) -> Style {
        if self.selection == choice {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    }
}
