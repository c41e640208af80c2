//! Plain-text rendering of cheat sheet pages for the terminal

use crate::cheatsheet::{paginate, Block, Page, Section};

/// Render a single page as lines, column by column.
///
/// Section headers carry the 1-based section number used on the command line.
pub fn render_page_lines(page: &Page<'_>) -> Vec<String> {
    let mut lines = vec![format!("=== Cheat Sheet - Page {} ===", page.number())];

    for (col, column) in page.columns().iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("--- Column {} ---", col + 1));
        if column.is_empty() {
            lines.push("  (empty)".to_string());
        }
        for block in column {
            match block {
                Block::Section(placed) => {
                    lines.push(format!("[{}] {}", placed.index + 1, placed.section.category));
                    for (i, item) in placed.section.items.iter().enumerate() {
                        lines.push(format!("  {}. {}", i + 1, item.title));
                        for code_line in item.code.lines() {
                            lines.push(format!("     | {}", code_line));
                        }
                        if !item.explanation.is_empty() {
                            lines.push(format!("     {}", item.explanation));
                        }
                    }
                }
                Block::NotesArea => {
                    lines.push("  [ Handwritten Notes Area ]".to_string());
                }
            }
        }
    }

    lines
}

/// Render every page, separated by a blank line
pub fn render_pages_plain(sections: &[Section]) -> String {
    paginate(sections)
        .iter()
        .map(|page| render_page_lines(page).join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cheatsheet::{default_sections, page};

    #[test]
    fn test_first_page_lists_slots_in_column_order() {
        let sections = default_sections();
        let lines = render_page_lines(&page(&sections, 0));
        let headers: Vec<&String> = lines.iter().filter(|l| l.starts_with('[')).collect();
        assert_eq!(headers.len(), 4);
        assert!(headers[0].starts_with("[1] "));
        assert!(headers[3].starts_with("[4] "));
        assert!(lines.iter().any(|l| l.contains("Handwritten Notes Area")));
    }

    #[test]
    fn test_all_pages() {
        let text = render_pages_plain(&default_sections());
        assert!(text.contains("Page 1"));
        assert!(text.contains("Page 2"));
        assert_eq!(text.matches("Handwritten Notes Area").count(), 1);
    }
}
