use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use iotprep_lib::router::View;

use super::app_state::{Mode, Screen, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    match state.mode {
        Mode::Confirm(action) => {
            let text = format!(" {} (y/N) ", action.prompt());
            let prompt = Paragraph::new(text)
                .style(Style::default().bg(Color::Red).fg(Color::White));
            f.render_widget(prompt, area);
        }
        Mode::Search => {
            let query = match &state.screen {
                Screen::Concepts(concepts) => concepts.query.as_str(),
                _ => "",
            };
            let text = format!(" Search concepts: {}█", query);
            let prompt = Paragraph::new(text)
                .style(Style::default().bg(Color::Blue).fg(Color::White));
            f.render_widget(prompt, area);
        }
        Mode::Edit(_) => {
            let hints = " Enter: apply  Alt+Enter: newline  Esc: cancel ";
            let status = Paragraph::new(hints)
                .style(Style::default().bg(Color::Magenta).fg(Color::White));
            f.render_widget(status, area);
        }
        Mode::Normal => {
            let hints = match state.router.current() {
                View::Dashboard => " j/k: select  Enter: open  1-4: views  ?: help  q: quit ",
                View::CheatSheet if state.sheet_editing() => {
                    " e/c/x: edit  a/A: add item/section  d: delete  K/J: move  s: save  R: reset  E: done "
                }
                View::CheatSheet => {
                    " j/k: select  h/l: page  E: edit layout  p: print  Esc: back  ?: help "
                }
                View::Practice => {
                    " g: generate  j/k: select  Enter: show answer  d/u: scroll  Esc: back "
                }
                View::Concepts => {
                    " Tab: category  /: search  Enter: expand  j/k: select  Esc: back "
                }
            };

            let status = Paragraph::new(hints)
                .style(Style::default().bg(Color::DarkGray).fg(Color::White));
            f.render_widget(status, area);
        }
    }
}
