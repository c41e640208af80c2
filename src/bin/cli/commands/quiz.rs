use anyhow::{Context, Result};

use iotprep_lib::quiz::{Question, QuizSession};

use crate::app::App;
use crate::render::terminal::{paint, render_code, wrap_lines, Color};
use crate::OutputFormat;

pub fn run(app: &App, reveal: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let generator = app.generator()?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    let mut session = QuizSession::new();
    runtime.block_on(session.generate(generator.as_ref()));

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = session
                .questions()
                .iter()
                .map(|q| {
                    let mut value = serde_json::to_value(q).unwrap_or_default();
                    if !reveal {
                        if let Some(obj) = value.as_object_mut() {
                            obj.remove("answer");
                            obj.remove("explanation");
                        }
                    }
                    value
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (i, question) in session.questions().iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_question(i + 1, question, reveal, use_color);
            }
            if !reveal {
                println!();
                println!("{}", paint("Run with --reveal to see answers.", Color::DIM, use_color));
            }
        }
    }

    Ok(())
}

fn print_question(number: usize, question: &Question, reveal: bool, use_color: bool) {
    let header = format!("Q{} [{}]", number, question.kind.label().to_uppercase());
    println!("{}", paint(&header, Color::BOLD, use_color));
    for line in wrap_lines(&question.question, "  ", 80) {
        println!("{}", line);
    }

    if let Some(code) = question.code_context.as_deref().filter(|c| !c.is_empty()) {
        for line in render_code(code, "  ", use_color) {
            println!("{}", line);
        }
    }

    if reveal {
        println!("  {} {}", paint("Answer:", Color::GREEN, use_color), question.answer);
        for line in wrap_lines(&question.explanation, "  ", 80) {
            println!("{}", paint(&line, Color::DIM, use_color));
        }
    }
}
