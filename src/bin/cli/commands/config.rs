use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run_path(app: &App, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "configPath": app.config_path.to_string_lossy(),
                "exists": app.config_path.exists(),
                "dataDir": app.data_dir.to_string_lossy(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", app.config_path.display());
        }
    }
    Ok(())
}

pub fn run_show(app: &App, format: &OutputFormat) -> Result<()> {
    let mut shown = app.config.redacted();
    shown.data_dir = Some(app.data_dir.clone());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        OutputFormat::Plain => {
            let text = shown.to_toml().context("Failed to render config")?;
            println!("# {}", app.config_path.display());
            print!("{}", text);
        }
    }
    Ok(())
}
