//! Object checklist page

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::request::FormData;
use crate::ui::wizard_screen::WizardScreen;

impl WizardScreen {
    pub(crate) fn render_objects_step(&mut self, frame: &mut Frame, area: Rect, form: &FormData) {
        let block = Block::default()
            .title(format!(
                " Objects ({} of {} checked) ",
                form.checked.len(),
                form.objects.len()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if form.objects.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from("The object catalog is empty."),
                Line::from(""),
                Line::from(Span::styled(
                    "Add paths under [catalog] in .omi-wizard/config.toml",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = form
            .objects
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let checked = form.checked.contains(&i);
                let checkbox = if checked { "[x]" } else { "[ ]" };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        checkbox,
                        Style::default().fg(if checked {
                            Color::Green
                        } else {
                            Color::DarkGray
                        }),
                    ),
                    Span::raw(" "),
                    Span::styled(
                        path.to_string(),
                        Style::default().fg(if checked { Color::White } else { Color::Gray }),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.object_state);
    }
}
