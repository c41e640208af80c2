use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::Rect;

use iotprep_lib::cheatsheet::{ItemField, MoveDirection};
use iotprep_lib::router::View;

use super::app_state::{ConfirmAction, Mode, Screen, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.request_quit();
        return;
    }

    match state.mode {
        Mode::Normal => handle_normal_key(state, key),
        Mode::Edit(_) => handle_edit_key(state, key),
        Mode::Search => handle_search_key(state, key),
        Mode::Confirm(_) => handle_confirm_key(state, key),
    }
}

fn handle_normal_key(state: &mut TuiState, key: KeyEvent) {
    if state.show_help {
        // Any key closes the help overlay
        state.show_help = false;
        return;
    }

    // Keys shared by every view
    match key.code {
        KeyCode::Char('q') => {
            state.request_quit();
            return;
        }
        KeyCode::Char('?') => {
            state.show_help = true;
            return;
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            state.navigate(View::ALL[index]);
            return;
        }
        KeyCode::Esc | KeyCode::Char('b') if state.router.current() != View::Dashboard => {
            state.navigate(View::Dashboard);
            return;
        }
        _ => {}
    }

    match state.router.current() {
        View::Dashboard => handle_dashboard_key(state, key),
        View::CheatSheet => handle_sheet_key(state, key),
        View::Practice => handle_practice_key(state, key),
        View::Concepts => handle_concepts_key(state, key),
    }
}

fn handle_dashboard_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Right => state.dashboard_move(true),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::Left => state.dashboard_move(false),
        KeyCode::Enter | KeyCode::Char('l') => state.dashboard_open(),
        _ => {}
    }
}

fn handle_sheet_key(state: &mut TuiState, key: KeyEvent) {
    // Handle pending 'g' key
    if state.pending_key == Some('g') {
        state.pending_key = None;
        if key.code == KeyCode::Char('g') {
            state.sheet_go_top();
            return;
        }
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.sheet_move(true),
        KeyCode::Char('k') | KeyCode::Up => state.sheet_move(false),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => state.sheet_turn_page(true),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => state.sheet_turn_page(false),
        KeyCode::Char('g') => state.pending_key = Some('g'),
        KeyCode::Char('G') => state.sheet_go_bottom(),
        KeyCode::Char('E') => state.toggle_sheet_editing(),
        KeyCode::Char('p') if !state.sheet_editing() => state.sheet_export(),
        _ if state.sheet_editing() => handle_sheet_edit_key(state, key),
        KeyCode::Char('e' | 'c' | 'x' | 'a' | 'A' | 'd' | 'J' | 'K' | 's' | 'R') | KeyCode::Enter => {
            state.flash_message = Some("Press E to edit the layout".to_string());
        }
        _ => {}
    }
}

/// Keys available while layout editing is on
fn handle_sheet_edit_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('e') => state.sheet_begin_edit(ItemField::Title),
        KeyCode::Char('c') => state.sheet_begin_edit(ItemField::Code),
        KeyCode::Char('x') => state.sheet_begin_edit(ItemField::Explanation),
        KeyCode::Char('a') => state.sheet_add_item(),
        KeyCode::Char('A') => state.sheet_add_section(),
        KeyCode::Char('d') | KeyCode::Delete => state.sheet_delete(),
        KeyCode::Char('K') => state.sheet_move_section(MoveDirection::Up),
        KeyCode::Char('J') => state.sheet_move_section(MoveDirection::Down),
        KeyCode::Char('s') => state.sheet_save(),
        KeyCode::Char('R') => {
            state.mode = Mode::Confirm(ConfirmAction::Reset);
        }
        _ => {}
    }
}

fn handle_practice_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('g') | KeyCode::Char('n') => state.practice_generate(),
        KeyCode::Char('j') | KeyCode::Down => state.practice_move(true),
        KeyCode::Char('k') | KeyCode::Up => state.practice_move(false),
        KeyCode::Enter | KeyCode::Char(' ') => state.practice_toggle_reveal(),
        KeyCode::Char('d') => state.scroll(true, 10),
        KeyCode::Char('u') => state.scroll(false, 10),
        _ => {}
    }
}

fn handle_concepts_key(state: &mut TuiState, key: KeyEvent) {
    if state.pending_key == Some('g') {
        state.pending_key = None;
        if key.code == KeyCode::Char('g') {
            state.concepts_select_edge(false);
            return;
        }
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.concepts_move(true),
        KeyCode::Char('k') | KeyCode::Up => state.concepts_move(false),
        KeyCode::Char('g') => state.pending_key = Some('g'),
        KeyCode::Char('G') => state.concepts_select_edge(true),
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => state.concepts_cycle_category(true),
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => state.concepts_cycle_category(false),
        KeyCode::Char('a') => state.concepts_set_category(None),
        KeyCode::Enter | KeyCode::Char(' ') => state.concepts_toggle_expand(),
        KeyCode::Char('/') => state.mode = Mode::Search,
        KeyCode::Char('x') => state.concepts_clear_search(),
        KeyCode::Char('d') => state.scroll(true, 10),
        KeyCode::Char('u') => state.scroll(false, 10),
        _ => {}
    }
}

fn handle_edit_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.cancel_edit(),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            state.input_text.push('\n');
        }
        KeyCode::Enter => state.commit_edit(),
        KeyCode::Backspace => {
            state.input_text.pop();
        }
        KeyCode::Tab => state.input_text.push_str("    "),
        KeyCode::Char(c) => {
            state.input_text.push(c);
        }
        _ => {}
    }
}

/// Typing filters the concept list as you go
fn handle_search_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.concepts_clear_search();
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => state.mode = Mode::Normal,
        KeyCode::Backspace => state.concepts_search_pop(),
        KeyCode::Down => state.concepts_move(true),
        KeyCode::Up => state.concepts_move(false),
        KeyCode::Char(c) => state.concepts_search_push(c),
        _ => {}
    }
}

fn handle_confirm_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm(),
        _ => state.decline(),
    }
}

fn contains(area: &Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    if state.mode != Mode::Normal {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let col = mouse.column;
            let row = mouse.row;

            // Header tabs split the width evenly
            if let Some(area) = state.header_area {
                if contains(&area, col, row) && area.width > 0 {
                    let slot = (col - area.x) as usize * View::ALL.len() / area.width as usize;
                    if let Some(view) = View::ALL.get(slot) {
                        state.navigate(*view);
                    }
                }
            }
        }
        MouseEventKind::ScrollDown => match state.screen {
            Screen::Dashboard(_) => state.dashboard_move(true),
            Screen::CheatSheet(_) => state.sheet_move(true),
            Screen::Practice(_) | Screen::Concepts(_) => state.scroll(true, 3),
        },
        MouseEventKind::ScrollUp => match state.screen {
            Screen::Dashboard(_) => state.dashboard_move(false),
            Screen::CheatSheet(_) => state.sheet_move(false),
            Screen::Practice(_) | Screen::Concepts(_) => state.scroll(false, 3),
        },
        _ => {}
    }
}
