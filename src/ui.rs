use chrono::{Local, TimeDelta};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tomato::{controller::Status, display::PhaseColor};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;

fn phase_color(color: PhaseColor) -> Color {
    match color {
        PhaseColor::Work | PhaseColor::Idle => Color::Green,
        PhaseColor::ShortBreak => Color::Magenta,
        PhaseColor::LongBreak => Color::Red,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = self.display();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // label
                Constraint::Length(3), // time
                Constraint::Length(1), // ends at / paused
                Constraint::Length(1), // marks
                Constraint::Length(1), // padding
                Constraint::Length(1), // controls
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            display.label.as_str(),
            bold_style.fg(phase_color(display.color)),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        Paragraph::new(Span::styled(display.time_text.as_str(), bold_style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .render(chunks[2], buf);

        let status_text = match self.status() {
            Status::Idle => String::new(),
            Status::Paused(_) => "Paused".to_string(),
            Status::Running(_) => {
                let remaining = self.controller.state().remaining_seconds;
                let ends_at = Local::now() + TimeDelta::seconds(i64::from(remaining));
                format!("ends {}", ends_at.format("%H:%M"))
            }
        };
        Paragraph::new(Span::styled(status_text, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            display.marks(&self.config.mark_glyph),
            Style::default().fg(Color::Green),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        let control = |enabled: bool, text: &'static str| {
            Span::styled(text, if enabled { bold_style } else { dim_style })
        };
        let controls = Line::from(vec![
            control(display.start_enabled, "(s)tart"),
            Span::raw("  "),
            control(display.stop_enabled, "(p)ause"),
            Span::raw("  "),
            control(true, "(r)eset"),
            Span::raw("  "),
            Span::styled("(q)uit", italic_style),
        ]);
        Paragraph::new(controls)
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
    }
}
