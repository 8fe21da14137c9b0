//! Step progress bar across the top of the wizard

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::time::Instant;

use crate::wizard::{ProgressIndicator, Step};

/// How a page segment is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Done,
    Active,
    /// Active page whose exit animation is running
    Leaving,
    Upcoming,
}

/// Progress bar state written by the navigator and read when drawing
pub struct TuiProgress {
    active: AtomicU8,
    exiting: Mutex<Option<(Step, Instant, Duration)>>,
}

impl Default for TuiProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiProgress {
    pub fn new() -> Self {
        Self {
            active: AtomicU8::new(Step::FIRST.number()),
            exiting: Mutex::new(None),
        }
    }

    pub fn active_step(&self) -> Step {
        Step::from_number(self.active.load(Ordering::Acquire)).unwrap_or(Step::FIRST)
    }

    /// Whether `step` is still in its exit animation
    pub fn is_leaving(&self, step: Step) -> bool {
        let exiting = self.exiting.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(
            *exiting,
            Some((from, started, duration)) if from == step && started.elapsed() < duration
        )
    }

    pub fn segment_state(&self, step: Step) -> SegmentState {
        let active = self.active_step();
        if step < active {
            SegmentState::Done
        } else if step > active {
            SegmentState::Upcoming
        } else if self.is_leaving(step) {
            SegmentState::Leaving
        } else {
            SegmentState::Active
        }
    }
}

impl ProgressIndicator for TuiProgress {
    fn set_active_step(&self, step: Step) {
        self.active.store(step.number(), Ordering::Release);
    }

    fn start_exit_animation(&self, from: Step, duration: Duration) {
        *self.exiting.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((from, Instant::now(), duration));
    }
}

fn segment_style(state: SegmentState) -> Style {
    match state {
        SegmentState::Done => Style::default().fg(Color::Green),
        SegmentState::Active => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        SegmentState::Leaving => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::DIM),
        SegmentState::Upcoming => Style::default().fg(Color::DarkGray),
    }
}

/// Draw one segment per page
pub fn render_progress_bar(frame: &mut Frame, area: Rect, progress: &TuiProgress) {
    let steps = Step::all();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, steps.len() as u32);
            steps.len()
        ])
        .split(area);

    for (step, chunk) in steps.iter().zip(chunks.iter()) {
        let state = progress.segment_state(*step);
        let marker = if state == SegmentState::Done { "✓" } else { " " };
        let label = Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!(" {}. {} ", step.number(), step.title()),
                segment_style(state),
            ),
        ]);
        let border = if matches!(state, SegmentState::Active | SegmentState::Leaving) {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let segment = Paragraph::new(label).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(segment, *chunk);
    }
}
