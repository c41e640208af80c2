use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};

use iotprep_lib::cheatsheet::{page, page_count, ItemField, MoveDirection};
use iotprep_lib::publish::{render_page_lines, render_pages_plain};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

/// Ask a yes/no question on stdin; anything but "y"/"yes" declines
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_result(format: &OutputFormat, message: String, json: serde_json::Value) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json)?),
        OutputFormat::Plain => println!("{}", message),
    }
    Ok(())
}

pub fn run_show(app: &App, page_number: Option<usize>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let sections = app.sheet.sections();
    let pages = page_count(sections.len());

    if let OutputFormat::Json = format {
        let output = serde_json::json!({
            "pageCount": pages,
            "sections": sections,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let text = match page_number {
        Some(n) if n == 0 || n > pages => {
            bail!("No page {} (the sheet has {} pages)", n, pages);
        }
        Some(n) => render_page_lines(&page(sections, n - 1)).join("\n"),
        None => render_pages_plain(sections),
    };

    for line in text.lines() {
        if line.starts_with("===") {
            println!("{}", paint(line, Color::BOLD, use_color));
        } else if line.starts_with('[') {
            println!("{}", paint(line, Color::MAGENTA, use_color));
        } else if line.trim_start().starts_with('|') {
            println!("{}", paint(line, Color::CYAN, use_color));
        } else if line.starts_with("---") {
            println!("{}", paint(line, Color::DIM, use_color));
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}

pub fn run_print(app: &App, output: Option<&Path>, format: &OutputFormat) -> Result<()> {
    let path = app.export_print(output)?;
    print_result(
        format,
        format!("Wrote printable cheat sheet to {}", path.display()),
        serde_json::json!({
            "path": path.to_string_lossy(),
            "pageCount": page_count(app.sheet.len()),
        }),
    )
}

pub fn run_add_section(app: &mut App, format: &OutputFormat) -> Result<()> {
    let index = app.sheet.add_section();
    app.save_sheet()?;
    print_result(
        format,
        format!("Added section {} \"{}\"", index + 1, app.sheet.sections()[index].category),
        serde_json::json!({ "section": index + 1, "sectionCount": app.sheet.len() }),
    )
}

pub fn run_rename(app: &mut App, section: usize, name: &str, format: &OutputFormat) -> Result<()> {
    let index = app.section_index(section)?;
    app.sheet.rename_section(index, name)?;
    app.save_sheet()?;
    print_result(
        format,
        format!("Renamed section {} to \"{}\"", section, name),
        serde_json::json!({ "section": section, "category": name }),
    )
}

pub fn run_edit(
    app: &mut App,
    section: usize,
    item: usize,
    field: ItemField,
    value: String,
    format: &OutputFormat,
) -> Result<()> {
    let section_index = app.section_index(section)?;
    let item_index = app.item_index(section_index, item)?;
    app.sheet
        .update_item_field(section_index, item_index, field, value.clone())?;
    app.save_sheet()?;
    print_result(
        format,
        format!("Updated {} of item {}.{}", field, section, item),
        serde_json::json!({
            "section": section,
            "item": item,
            "field": field.label(),
            "value": value,
        }),
    )
}

pub fn run_add_item(app: &mut App, section: usize, format: &OutputFormat) -> Result<()> {
    let section_index = app.section_index(section)?;
    let item_index = app.sheet.add_item(section_index)?;
    app.save_sheet()?;
    print_result(
        format,
        format!("Added item {}.{}", section, item_index + 1),
        serde_json::json!({ "section": section, "item": item_index + 1 }),
    )
}

pub fn run_delete_item(app: &mut App, section: usize, item: usize, format: &OutputFormat) -> Result<()> {
    let section_index = app.section_index(section)?;
    let item_index = app.item_index(section_index, item)?;
    let removed = app.sheet.delete_item(section_index, item_index)?;
    app.save_sheet()?;
    print_result(
        format,
        format!("Deleted item {}.{} \"{}\"", section, item, removed.title),
        serde_json::json!({ "section": section, "item": item, "title": removed.title }),
    )
}

pub fn run_delete_section(app: &mut App, section: usize, yes: bool, format: &OutputFormat) -> Result<()> {
    let index = app.section_index(section)?;
    let category = app.sheet.sections()[index].category.clone();

    if !yes && !confirm(&format!("Delete section {} \"{}\"?", section, category))? {
        println!("Cancelled");
        return Ok(());
    }

    app.sheet.delete_section(index)?;
    app.save_sheet()?;
    print_result(
        format,
        format!("Deleted section {} \"{}\"", section, category),
        serde_json::json!({ "section": section, "category": category, "sectionCount": app.sheet.len() }),
    )
}

pub fn run_move(app: &mut App, section: usize, direction: MoveDirection, format: &OutputFormat) -> Result<()> {
    let index = app.section_index(section)?;
    let moved = app.sheet.move_section(index, direction)?;
    let new_position = if moved {
        app.save_sheet()?;
        match direction {
            MoveDirection::Up => section - 1,
            MoveDirection::Down => section + 1,
        }
    } else {
        section
    };

    let message = if moved {
        format!("Moved section {} to position {}", section, new_position)
    } else {
        format!("Section {} is already at the {}", section, match direction {
            MoveDirection::Up => "top",
            MoveDirection::Down => "bottom",
        })
    };
    print_result(
        format,
        message,
        serde_json::json!({ "moved": moved, "section": new_position }),
    )
}

pub fn run_reset(app: &mut App, yes: bool, format: &OutputFormat) -> Result<()> {
    if !yes && !confirm("Reset the cheat sheet to defaults? All edits will be lost.")? {
        println!("Cancelled");
        return Ok(());
    }

    app.sheet.reset()?;
    print_result(
        format,
        "Cheat sheet reset to defaults".to_string(),
        serde_json::json!({ "reset": true, "sectionCount": app.sheet.len() }),
    )
}
