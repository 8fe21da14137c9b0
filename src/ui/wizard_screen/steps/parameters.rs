//! TTL / interval page with a live request preview

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::request::{form::is_numeric, FormData, ParameterField};
use crate::ui::wizard_screen::WizardScreen;

impl WizardScreen {
    pub(crate) fn render_parameters_step(&self, frame: &mut Frame, area: Rect, form: &FormData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // TTL
                Constraint::Length(3), // Interval
                Constraint::Length(1), // Auto-regeneration
                Constraint::Min(3),    // Preview
            ])
            .split(area);

        self.render_field(frame, chunks[0], ParameterField::Ttl, &form.ttl, false);
        self.render_field(
            frame,
            chunks[1],
            ParameterField::Interval,
            &form.interval,
            true,
        );

        let (state, color) = if form.auto_regenerate {
            ("on", Color::Green)
        } else {
            ("off", Color::Yellow)
        };
        let auto = Paragraph::new(Line::from(vec![
            Span::styled(" Automatic request generation: ", Style::default().fg(Color::Gray)),
            Span::styled(state, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]));
        frame.render_widget(auto, chunks[2]);

        let preview = Paragraph::new(form.request.as_str())
            .style(Style::default().fg(Color::Gray))
            .block(
                Block::default()
                    .title(" Request preview ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(preview, chunks[3]);
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: ParameterField,
        value: &str,
        optional: bool,
    ) {
        let focused = self.field == field;
        let valid = (optional && value.trim().is_empty()) || is_numeric(value);

        let border = match (focused, valid) {
            (_, false) => Color::Red,
            (true, true) => Color::Cyan,
            (false, true) => Color::DarkGray,
        };
        let cursor = if focused { "_" } else { "" };

        let input = Paragraph::new(Line::from(vec![
            Span::styled(value.to_string(), Style::default().fg(Color::White)),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .title(format!(" {} ", field.label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(input, area);
    }
}
