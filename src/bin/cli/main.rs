mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use iotprep_lib::cheatsheet::{ItemField, MoveDirection};
use iotprep_lib::concepts::ConceptCategory;

#[derive(Parser)]
#[command(name = "iotprep", about = "EE4216 exam prep: cheat sheet, concepts and practice questions", version)]
struct Cli {
    /// Config file (default: <config dir>/iotprep/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep the cheat sheet in memory only; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show the exam countdown and format reminder
    Dashboard,

    /// View, edit and print the cheat sheet
    #[command(subcommand)]
    Sheet(SheetCommand),

    /// Generate one batch of practice questions
    Quiz {
        /// Print answers and explanations
        #[arg(long)]
        reveal: bool,
    },

    /// Browse the key concepts guide
    Concepts {
        /// Only show one category (protocols, rtos, hardware, power)
        #[arg(long)]
        category: Option<ConceptCategory>,
        /// Filter by title or definition
        #[arg(long)]
        search: Option<String>,
        /// Include key points, pitfalls and example code
        #[arg(long)]
        expand: bool,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

/// Section and item numbers are 1-based, as printed by `sheet show`
#[derive(Subcommand)]
enum SheetCommand {
    /// Print pages as text
    Show {
        /// Only this page
        #[arg(long)]
        page: Option<usize>,
    },

    /// Export a printable A4 landscape HTML file
    Print {
        /// Output file (default: <data dir>/cheatsheet.html)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Append a placeholder section
    AddSection,

    /// Rename a section
    Rename {
        section: usize,
        name: String,
    },

    /// Set one field of an item
    Edit {
        section: usize,
        item: usize,
        /// title, code or explanation
        field: ItemField,
        /// New value (use "-" to read from stdin)
        value: String,
    },

    /// Append a placeholder item to a section
    AddItem {
        section: usize,
    },

    /// Remove an item from a section
    DeleteItem {
        section: usize,
        item: usize,
    },

    /// Remove a whole section
    DeleteSection {
        section: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Swap a section with its neighbor
    Move {
        section: usize,
        /// up or down
        direction: MoveDirection,
    },

    /// Discard all edits and restore the built-in sheet
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the config file location
    Path,
    /// Print the effective configuration (API key masked)
    Show,
}

/// Resolve "-" as stdin
fn resolve_value(value: String) -> anyhow::Result<String> {
    read_value(value, std::io::stdin())
}

fn read_value(value: String, mut input: impl Read) -> anyhow::Result<String> {
    if value != "-" {
        return Ok(value);
    }
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .context("Failed to read value from stdin")?;
    Ok(buf.trim_end_matches('\n').to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let config = cli.config.as_deref();
    let ephemeral = cli.ephemeral;

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(config, ephemeral)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::Dashboard) => {
            let app = app::App::new(config, ephemeral)?;
            commands::dashboard::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Sheet(subcmd)) => {
            let mut app = app::App::new(config, ephemeral)?;
            match subcmd {
                SheetCommand::Show { page } => {
                    commands::sheet::run_show(&app, page, &cli.format, use_color)?;
                }
                SheetCommand::Print { output } => {
                    commands::sheet::run_print(&app, output.as_deref(), &cli.format)?;
                }
                SheetCommand::AddSection => {
                    commands::sheet::run_add_section(&mut app, &cli.format)?;
                }
                SheetCommand::Rename { section, name } => {
                    commands::sheet::run_rename(&mut app, section, &name, &cli.format)?;
                }
                SheetCommand::Edit { section, item, field, value } => {
                    let value = resolve_value(value)?;
                    commands::sheet::run_edit(&mut app, section, item, field, value, &cli.format)?;
                }
                SheetCommand::AddItem { section } => {
                    commands::sheet::run_add_item(&mut app, section, &cli.format)?;
                }
                SheetCommand::DeleteItem { section, item } => {
                    commands::sheet::run_delete_item(&mut app, section, item, &cli.format)?;
                }
                SheetCommand::DeleteSection { section, yes } => {
                    commands::sheet::run_delete_section(&mut app, section, yes, &cli.format)?;
                }
                SheetCommand::Move { section, direction } => {
                    commands::sheet::run_move(&mut app, section, direction, &cli.format)?;
                }
                SheetCommand::Reset { yes } => {
                    commands::sheet::run_reset(&mut app, yes, &cli.format)?;
                }
            }
        }
        Some(Command::Quiz { reveal }) => {
            let app = app::App::new(config, ephemeral)?;
            commands::quiz::run(&app, reveal, &cli.format, use_color)?;
        }
        Some(Command::Concepts { category, search, expand }) => {
            commands::concepts::run(
                category,
                search.as_deref().unwrap_or(""),
                expand,
                &cli.format,
                use_color,
            )?;
        }
        Some(Command::Config(subcmd)) => {
            let app = app::App::new(config, ephemeral)?;
            match subcmd {
                ConfigCommand::Path => commands::config::run_path(&app, &cli.format)?,
                ConfigCommand::Show => commands::config::run_show(&app, &cli.format)?,
            }
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(config, ephemeral)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_read_value_passes_literal_through() {
        let value = read_value("delay(10);".to_string(), BrokenPipe).unwrap();
        assert_eq!(value, "delay(10);");
    }

    #[test]
    fn test_read_value_from_input() {
        let value = read_value("-".to_string(), "line one\nline two\n".as_bytes()).unwrap();
        assert_eq!(value, "line one\nline two");
    }

    #[test]
    fn test_read_value_reports_read_failure() {
        let err = read_value("-".to_string(), BrokenPipe).unwrap_err();
        assert!(err.to_string().contains("Failed to read value from stdin"));
    }
}
