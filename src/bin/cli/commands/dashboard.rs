use anyhow::Result;
use chrono::Utc;

use iotprep_lib::countdown::{Countdown, EXAM_FORMAT_REMINDER};
use iotprep_lib::router::View;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let mut countdown = Countdown::for_exam(&app.config.exam, now);
    let remaining = countdown.display(now);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "timeRemaining": remaining,
                "examStartsAt": countdown.target().to_rfc3339(),
                "reminder": EXAM_FORMAT_REMINDER,
                "sections": app.sheet.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint("EE4216 Exam Prep", Color::BOLD, use_color));
            println!("Hardware for IoT \u{2022} Final Exam Preparation");
            println!();
            println!(
                "Time remaining: {}",
                paint(&remaining, Color::YELLOW, use_color)
            );
            println!();
            println!("{}", paint("Exam Format Reminder", Color::BOLD, use_color));
            for line in EXAM_FORMAT_REMINDER {
                println!("  \u{2022} {}", line);
            }
            println!();
            for view in View::destinations() {
                println!("  {}", paint(view.title(), Color::CYAN, use_color));
                println!("    {}", paint(view.description(), Color::DIM, use_color));
            }
        }
    }

    Ok(())
}
