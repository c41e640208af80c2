use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};

use iotprep_lib::concepts::{emphasize, Concept, ConceptCategory};

use super::app_state::ConceptsState;

fn category_color(category: ConceptCategory) -> Color {
    match category {
        ConceptCategory::Protocols => Color::Magenta,
        ConceptCategory::Rtos => Color::Green,
        ConceptCategory::Hardware => Color::Blue,
        ConceptCategory::Power => Color::Yellow,
    }
}

pub fn draw(f: &mut Frame, area: Rect, state: &ConceptsState, searching: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    draw_filter_bar(f, rows[0], state, searching);

    let visible = state.visible();
    if visible.is_empty() {
        let message = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No concepts found matching \"{}\"", state.query),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
        f.render_widget(message, rows[1]);
        return;
    }

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(rows[1]);

    let items: Vec<ListItem> = visible
        .iter()
        .map(|concept| {
            let arrow = if state.expanded.contains(concept.id) { "\u{25be} " } else { "\u{25b8} " };
            ListItem::new(Line::from(vec![
                Span::raw(arrow),
                Span::styled(concept.title, Style::default().fg(category_color(concept.category))),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Key Concepts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected.min(visible.len() - 1)));
    f.render_stateful_widget(list, panels[0], &mut list_state);

    if let Some(concept) = visible.get(state.selected) {
        let expanded = state.expanded.contains(concept.id);
        draw_detail(f, panels[1], concept, expanded, state.scroll);
    }
}

fn draw_filter_bar(f: &mut Frame, area: Rect, state: &ConceptsState, searching: bool) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(30)])
        .split(area);

    let mut titles = vec!["All".to_string()];
    titles.extend(ConceptCategory::ALL.iter().map(|c| c.label().to_string()));
    let selected = state
        .category
        .and_then(|cat| ConceptCategory::ALL.iter().position(|c| *c == cat))
        .map_or(0, |i| i + 1);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::White).bg(Color::Blue))
        .divider(" ");
    f.render_widget(tabs, cols[0]);

    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = if state.query.is_empty() && !searching {
        "/ Search concepts...".to_string()
    } else {
        format!("/{}", state.query)
    };
    f.render_widget(Paragraph::new(search).style(search_style), cols[1]);
}

fn draw_detail(f: &mut Frame, area: Rect, concept: &Concept, expanded: bool, scroll: u16) {
    let heading = Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            concept.category.label().to_uppercase(),
            Style::default().fg(category_color(concept.category)),
        )),
        Line::from(Span::styled(concept.title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(concept.definition),
    ];

    if !expanded {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Show details",
            Style::default().fg(Color::Blue),
        )));
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("KEY CHARACTERISTICS", heading)));
        for point in concept.key_points {
            let mut spans = vec![Span::styled("\u{2022} ", Style::default().fg(Color::Blue))];
            spans.extend(emphasize(point).into_iter().map(|segment| {
                if segment.emphasis {
                    Span::styled(segment.text, Style::default().add_modifier(Modifier::BOLD))
                } else {
                    Span::raw(segment.text)
                }
            }));
            lines.push(Line::from(spans));
        }

        if !concept.pitfalls.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "COMMON PITFALLS & ERRORS",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            for pitfall in concept.pitfalls {
                lines.push(Line::from(vec![
                    Span::styled("! ", Style::default().fg(Color::Yellow)),
                    Span::raw(*pitfall),
                ]));
            }
        }

        if let Some(code) = concept.code_snippet {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "EXAMPLE CODE",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )));
            for code_line in code.lines() {
                lines.push(Line::from(vec![
                    Span::styled("\u{2502} ", Style::default().fg(Color::DarkGray)),
                    Span::styled(code_line, Style::default().fg(Color::Cyan)),
                ]));
            }
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}
