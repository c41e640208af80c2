use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::app_state::EditTarget;
use super::ui::centered;

pub fn draw(f: &mut Frame, area: Rect, target: EditTarget, input: &str) {
    let title = match target {
        EditTarget::Category { section } => format!(" Section {} name ", section + 1),
        EditTarget::Field { section, item, field } => {
            format!(" Section {} item {} {} ", section + 1, item + 1, field)
        }
    };

    let popup = centered(area, 70, 50);

    // Clear the area behind the popup
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let mut lines: Vec<Line> = input.split('\n').map(|l| Line::from(l.to_string())).collect();
    if let Some(last) = lines.last_mut() {
        last.push_span(Span::styled("█", Style::default().fg(Color::Magenta)));
    }

    // Keep the cursor line in view
    let inner_height = popup.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(inner_height.max(1));

    let paragraph = Paragraph::new(lines.split_off(skip))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup);
}
