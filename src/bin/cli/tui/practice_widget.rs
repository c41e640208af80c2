use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::PracticeState;

const BANNER: &str =
    "These questions are AI-generated based on the EE4216 exam pattern: Spot Errors, Fill Blanks, and Concepts.";

pub fn draw(f: &mut Frame, area: Rect, state: &PracticeState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Blue))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::LEFT).border_style(Style::default().fg(Color::Blue)));
    f.render_widget(banner, rows[0]);

    let block = Block::default()
        .title(" Exam Simulator ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let session = state.runner.session();

    if session.is_loading() {
        let waiting = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Consulting the digital TA...",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(waiting, rows[1]);
        return;
    }

    let questions = session.questions();
    if questions.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No questions loaded yet.", Style::default().fg(Color::DarkGray))),
            Line::from(""),
            Line::from(Span::styled(
                "Press g to Generate Practice Set",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, rows[1]);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_start = 0;

    for (index, q) in questions.iter().enumerate() {
        let selected = index == state.selected;
        if selected {
            selected_start = lines.len();
        }
        let marker = if selected { "> " } else { "  " };
        let header_style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(
            format!("{}QUESTION {} \u{2022} {}", marker, index + 1, q.kind.label().to_uppercase()),
            header_style,
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", q.question),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        if let Some(code) = q.code_context.as_deref().filter(|c| !c.is_empty()) {
            lines.push(Line::from(""));
            for code_line in code.lines() {
                lines.push(Line::from(vec![
                    Span::styled("  \u{2502} ", Style::default().fg(Color::DarkGray)),
                    Span::styled(code_line.to_string(), Style::default().fg(Color::Green)),
                ]));
            }
        }

        lines.push(Line::from(""));
        if session.is_revealed(q.id) {
            lines.push(Line::from(vec![
                Span::styled("  Answer: ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(q.answer.clone(), Style::default().fg(Color::Green)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Explanation: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(q.explanation.clone()),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                "  [Enter] Reveal Answer",
                Style::default().fg(Color::Blue),
            )));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  [g] Generate New Set",
        Style::default().fg(Color::DarkGray),
    )));

    let scroll = (selected_start as u16).saturating_add(state.scroll);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, rows[1]);
}
