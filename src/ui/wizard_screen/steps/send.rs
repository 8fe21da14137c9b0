//! Send page: the request and the node's response

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::request::{FormData, ResponseState};
use crate::ui::wizard_screen::WizardScreen;

impl WizardScreen {
    pub(crate) fn render_send_step(&self, frame: &mut Frame, area: Rect, form: &FormData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let request = Paragraph::new(form.request.as_str())
            .style(Style::default().fg(Color::Gray))
            .block(
                Block::default()
                    .title(" Request ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(request, chunks[0]);

        let (title, color, lines) = match &form.response {
            ResponseState::Empty => (
                " Response ".to_string(),
                Color::DarkGray,
                vec![Line::from(Span::styled(
                    "Nothing sent yet",
                    Style::default().fg(Color::DarkGray),
                ))],
            ),
            ResponseState::Pending => (
                " Response ".to_string(),
                Color::Yellow,
                vec![Line::from(Span::styled(
                    "Waiting for the node…",
                    Style::default().fg(Color::Yellow),
                ))],
            ),
            ResponseState::Received { status, body } => {
                let color = if (200..300).contains(status) {
                    Color::Green
                } else {
                    Color::Red
                };
                (
                    format!(" Response (HTTP {status}) "),
                    color,
                    body.lines().map(|l| Line::from(l.to_string())).collect(),
                )
            }
            ResponseState::Failed(error) => (
                " Response ".to_string(),
                Color::Red,
                vec![Line::from(vec![
                    Span::styled(
                        "Failed: ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(error.clone()),
                ])],
            ),
        };

        let response = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.response_scroll, 0))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(response, chunks[1]);
    }
}
