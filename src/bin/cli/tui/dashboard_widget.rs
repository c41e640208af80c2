use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use iotprep_lib::countdown::EXAM_FORMAT_REMINDER;
use iotprep_lib::router::View;

use super::app_state::DashboardState;

pub fn draw(f: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Min(4),
        ])
        .split(area);

    // Title + countdown
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(rows[0]);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "EE4216 Exam Prep",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Hardware for IoT \u{2022} Final Exam Preparation",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    f.render_widget(title, top[0]);

    let timer_style = if state.countdown.has_started() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let timer = Paragraph::new(Line::from(Span::styled(state.remaining.clone(), timer_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Time Remaining ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(timer, top[1]);

    // Exam format reminder
    let reminder: Vec<Line> = EXAM_FORMAT_REMINDER
        .iter()
        .map(|line| Line::from(format!("\u{2022} {}", line)))
        .collect();
    let reminder = Paragraph::new(reminder)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Exam Format Reminder ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(reminder, rows[1]);

    // Menu cards
    let destinations = View::destinations();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(destinations.iter().map(|_| Constraint::Ratio(1, destinations.len() as u32)))
        .split(rows[2]);

    for (i, view) in destinations.iter().enumerate() {
        let selected = i == state.selected;
        let border = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                view.title(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(view.description(), Style::default().fg(Color::Gray))),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", i + 2))
                .borders(Borders::ALL)
                .border_style(border),
        );
        f.render_widget(card, cards[i]);
    }
}
