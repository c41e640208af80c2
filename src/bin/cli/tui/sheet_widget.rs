use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use iotprep_lib::cheatsheet::{page, page_count, Block as SheetBlock, PlacedSection};

use super::app_state::{SheetCursor, SheetState, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState, sheet: &SheetState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let sections = state.app.sheet.sections();
    let page_index = state.sheet_page();
    let current = page(sections, page_index);

    // Page indicator
    let mut header = vec![Span::styled(
        format!(" Cheat Sheet - Page {} of {} ", current.number(), page_count(sections.len())),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if sheet.editing {
        header.push(Span::styled(
            " EDITING ",
            Style::default().bg(Color::Magenta).fg(Color::White),
        ));
        header.push(Span::styled(
            "  Sections flow automatically, 4 per page",
            Style::default().fg(Color::DarkGray),
        ));
    }
    if state.app.sheet.is_dirty() {
        header.push(Span::styled("  [unsaved]", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Line::from(header)), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    for (blocks, column_area) in current.columns().iter().zip(columns.iter()) {
        if blocks.is_empty() {
            continue;
        }
        let cells = Layout::default()
            .direction(Direction::Vertical)
            .constraints(blocks.iter().map(|_| Constraint::Ratio(1, blocks.len() as u32)))
            .split(*column_area);

        for (block, cell) in blocks.iter().zip(cells.iter()) {
            match block {
                SheetBlock::Section(placed) => draw_section(f, *cell, placed, sheet.cursor, sheet.editing),
                SheetBlock::NotesArea => draw_notes(f, *cell),
            }
        }
    }
}

fn draw_section(f: &mut Frame, area: Rect, placed: &PlacedSection<'_>, cursor: SheetCursor, editing: bool) {
    let here = cursor.section == placed.index;
    let header_selected = here && cursor.item.is_none();

    let border = if header_selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if here {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut title = format!(" {} ", placed.section.category);
    if editing && here {
        title = format!(" #{}{}", placed.index + 1, title);
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_start = 0;

    for (i, item) in placed.section.items.iter().enumerate() {
        let selected = here && cursor.item == Some(i);
        if selected {
            selected_start = lines.len();
        }
        let title_style = if selected {
            Style::default().bg(Color::DarkGray).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
        };
        let marker = if selected { "> " } else { "" };
        lines.push(Line::from(Span::styled(format!("{}{}", marker, item.title), title_style)));
        for code_line in item.code.lines() {
            lines.push(Line::from(Span::styled(code_line.to_string(), Style::default().fg(Color::Green))));
        }
        if !item.explanation.is_empty() {
            lines.push(Line::from(Span::styled(
                item.explanation.clone(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    // Keep the selected item in view
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = selected_start.saturating_sub(inner_height / 2) as u16;

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

fn draw_notes(f: &mut Frame, area: Rect) {
    let notes = Paragraph::new(Span::styled(
        "Space for handwritten notes",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Notes ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(notes, area);
}
