use iotprep_lib::concepts::Segment;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in an ANSI style when color is on
pub fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render key-point segments, bolding the highlighted runs
pub fn render_segments(segments: &[Segment<'_>], use_color: bool) -> String {
    segments
        .iter()
        .map(|s| {
            if s.emphasis {
                paint(s.text, Color::BOLD, use_color)
            } else {
                s.text.to_string()
            }
        })
        .collect()
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
        } else {
            let mut current_line = String::new();
            for word in line.split_whitespace() {
                if current_line.is_empty() {
                    current_line = word.to_string();
                } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                    current_line.push(' ');
                    current_line.push_str(word);
                } else {
                    lines.push(format!("{}{}", prefix, current_line));
                    current_line = word.to_string();
                }
            }
            if !current_line.is_empty() {
                lines.push(format!("{}{}", prefix, current_line));
            }
        }
    }

    if lines.is_empty() && !text.is_empty() {
        lines.push(format!("{}{}", prefix, text));
    }

    lines
}

/// Code block with a gutter, dimmed when color is on
pub fn render_code(code: &str, prefix: &str, use_color: bool) -> Vec<String> {
    code.lines()
        .map(|line| {
            let gutter = format!("{}\u{2502} ", prefix);
            if use_color {
                format!("{}{}{}{}", Color::CYAN, gutter, line, Color::RESET)
            } else {
                format!("{}{}", gutter, line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use iotprep_lib::concepts::emphasize;

    #[test]
    fn test_wrap_long_line() {
        let lines = wrap_lines("alpha beta gamma delta", "  ", 14);
        assert_eq!(lines, vec!["  alpha beta", "  gamma delta"]);
    }

    #[test]
    fn test_render_segments_plain() {
        let text = render_segments(&emphasize("Power: ~10uA current."), false);
        assert_eq!(text, "Power: ~10uA current.");
    }

    #[test]
    fn test_render_segments_bold() {
        let text = render_segments(&emphasize("Power: ~10uA current."), true);
        assert_eq!(text, format!("Power:{} ~10uA current.{}", Color::BOLD, Color::RESET));
    }

    #[test]
    fn test_paint_and_code_respect_color_flag() {
        assert_eq!(paint("SPI", Color::GREEN, false), "SPI");
        assert_eq!(paint("SPI", Color::GREEN, true), "\x1b[32mSPI\x1b[0m");

        let plain = render_code("delay(10);", "  ", false);
        assert_eq!(plain, vec!["  \u{2502} delay(10);"]);
        let colored = render_code("delay(10);", "  ", true);
        assert_eq!(colored, vec![format!("{}  \u{2502} delay(10);{}", Color::CYAN, Color::RESET)]);
    }
}
