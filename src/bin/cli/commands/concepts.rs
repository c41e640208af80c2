use anyhow::Result;

use iotprep_lib::concepts::{self, emphasize, Concept, ConceptCategory};

use crate::render::terminal::{paint, render_code, render_segments, wrap_lines, Color};
use crate::OutputFormat;

fn category_color(category: ConceptCategory) -> &'static str {
    match category {
        ConceptCategory::Protocols => Color::MAGENTA,
        ConceptCategory::Rtos => Color::GREEN,
        ConceptCategory::Hardware => Color::BLUE,
        ConceptCategory::Power => Color::YELLOW,
    }
}

pub fn run(
    category: Option<ConceptCategory>,
    query: &str,
    expand: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let found = concepts::filter(concepts::concepts(), category, query);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        OutputFormat::Plain => {
            if found.is_empty() {
                println!("No concepts found matching \"{}\"", query);
                return Ok(());
            }
            for (i, concept) in found.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_concept(concept, expand, use_color);
            }
        }
    }

    Ok(())
}

fn print_concept(concept: &Concept, expand: bool, use_color: bool) {
    let tag = format!("[{}]", concept.category);
    println!(
        "{} {}",
        paint(&tag, category_color(concept.category), use_color),
        paint(concept.title, Color::BOLD, use_color)
    );
    for line in wrap_lines(concept.definition, "  ", 80) {
        println!("{}", line);
    }

    if !expand {
        return;
    }

    println!();
    println!("  {}", paint("KEY CHARACTERISTICS", Color::GRAY, use_color));
    for point in concept.key_points {
        println!("  \u{2022} {}", render_segments(&emphasize(point), use_color));
    }

    if !concept.pitfalls.is_empty() {
        println!("  {}", paint("COMMON PITFALLS & ERRORS", Color::YELLOW, use_color));
        for pitfall in concept.pitfalls {
            println!("  \u{2022} {}", pitfall);
        }
    }

    if let Some(code) = concept.code_snippet {
        println!("  {}", paint("EXAMPLE CODE", Color::BLUE, use_color));
        for line in render_code(code, "  ", use_color) {
            println!("{}", line);
        }
    }
}
