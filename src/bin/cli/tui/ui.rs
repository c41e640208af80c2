use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};

use iotprep_lib::router::View;

use super::app_state::{Mode, Screen, TuiState};
use super::{concepts_widget, dashboard_widget, edit_popup, practice_widget, sheet_widget, status_bar};

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Main layout: tab bar + view + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    let header_area = outer[0];
    let main_area = outer[1];
    let status_area = outer[2];

    // Save area for mouse hit-testing
    state.header_area = Some(header_area);

    draw_tabs(f, header_area, state);

    match &state.screen {
        Screen::Dashboard(dashboard) => dashboard_widget::draw(f, main_area, dashboard),
        Screen::CheatSheet(sheet) => sheet_widget::draw(f, main_area, state, sheet),
        Screen::Practice(practice) => practice_widget::draw(f, main_area, practice),
        Screen::Concepts(concepts) => {
            concepts_widget::draw(f, main_area, concepts, state.mode == Mode::Search)
        }
    }

    if let Mode::Edit(target) = state.mode {
        edit_popup::draw(f, main_area, target, &state.input_text);
    }

    if state.show_help {
        draw_help(f, main_area, state.router.current());
    }

    status_bar::draw(f, status_area, state);
}

fn draw_tabs(f: &mut Frame, area: Rect, state: &TuiState) {
    let titles: Vec<String> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| format!(" {} {} ", i + 1, view.title()))
        .collect();
    let selected = View::ALL
        .iter()
        .position(|v| *v == state.router.current())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");
    f.render_widget(tabs, area);
}

/// Centered rectangle taking the given share of `area`
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_help(f: &mut Frame, area: Rect, view: View) {
    let mut lines: Vec<(&str, &str)> = vec![
        ("1-4", "switch view"),
        ("Esc / b", "back to dashboard"),
        ("q", "quit"),
        ("?", "this help"),
    ];
    let specific: &[(&str, &str)] = match view {
        View::Dashboard => &[("j/k", "select card"), ("Enter", "open")],
        View::CheatSheet => &[
            ("j/k", "select header or item"),
            ("h/l", "previous / next page"),
            ("gg/G", "first / last"),
            ("E", "toggle layout editing"),
            ("p", "write printable HTML"),
            ("Enter/e c x", "edit title, code, explanation"),
            ("a / A", "add item / section"),
            ("d", "delete item or section"),
            ("K / J", "move section up / down"),
            ("s", "save and leave editing"),
            ("R", "reset to defaults"),
        ],
        View::Practice => &[
            ("g", "generate a new set"),
            ("j/k", "select question"),
            ("Enter", "show / hide answer"),
            ("d/u", "scroll"),
        ],
        View::Concepts => &[
            ("Tab / h l", "change category"),
            ("a", "all categories"),
            ("/", "search"),
            ("x", "clear search"),
            ("Enter", "expand / collapse"),
            ("d/u", "scroll details"),
        ],
    };
    lines.extend_from_slice(specific);

    let text: Vec<Line> = lines
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {:<14}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*what),
            ])
        })
        .collect();

    let popup = centered(area, 60, 80);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .title(format!(" {} keys ", view.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
