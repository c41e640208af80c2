use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use iotprep_lib::cheatsheet::SectionStore;
use iotprep_lib::config::AppConfig;
use iotprep_lib::publish::{render_print_html, PrintOptions};
use iotprep_lib::quiz::{GeminiGenerator, QuestionGenerator};
use iotprep_lib::storage::{FileKvStore, KeyValueStore, MemoryKvStore};

/// Shared application state for CLI commands and the TUI
pub struct App {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
    pub sheet: SectionStore,
}

impl App {
    /// Load config (from `config_path` or the default location) and open the
    /// cheat sheet from the configured data directory. An ephemeral app keeps
    /// the sheet in memory and starts from the defaults.
    pub fn new(config_path: Option<&Path>, ephemeral: bool) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => AppConfig::default_path().context("Failed to get config directory")?,
        };

        let config = AppConfig::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let data_dir = config.data_dir().context("Failed to get data directory")?;
        let kv: Arc<dyn KeyValueStore> = if ephemeral {
            log::debug!("Using in-memory storage");
            Arc::new(MemoryKvStore::new())
        } else {
            Arc::new(FileKvStore::new(data_dir.clone()))
        };
        let sheet = SectionStore::open(kv);

        Ok(Self {
            config,
            config_path,
            data_dir,
            sheet,
        })
    }

    /// Build the question generator from the `[gemini]` settings
    pub fn generator(&self) -> Result<Arc<dyn QuestionGenerator>> {
        let generator = GeminiGenerator::new(self.config.gemini.clone())
            .context("Failed to create HTTP client")?;
        Ok(Arc::new(generator))
    }

    /// Convert a 1-based section number from the command line
    pub fn section_index(&self, section: usize) -> Result<usize> {
        if section == 0 || section > self.sheet.len() {
            bail!(
                "No section {} (the sheet has {} sections)",
                section,
                self.sheet.len()
            );
        }
        Ok(section - 1)
    }

    /// Convert a 1-based item number within a 0-based section
    pub fn item_index(&self, section_index: usize, item: usize) -> Result<usize> {
        let section = self.sheet.section(section_index)?;
        if item == 0 || item > section.items.len() {
            bail!(
                "No item {} in section {} (it has {} items)",
                item,
                section_index + 1,
                section.items.len()
            );
        }
        Ok(item - 1)
    }

    /// Persist the cheat sheet
    pub fn save_sheet(&mut self) -> Result<()> {
        self.sheet.save().context("Failed to save cheat sheet")
    }

    pub fn default_print_path(&self) -> PathBuf {
        self.data_dir.join("cheatsheet.html")
    }

    /// Write the printable HTML document and return where it went
    pub fn export_print(&self, output: Option<&Path>) -> Result<PathBuf> {
        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_print_path());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let html = render_print_html(self.sheet.sections(), &PrintOptions::default());
        std::fs::write(&path, html)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Exported cheat sheet to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_app() -> (App, TempDir) {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        let config = AppConfig {
            data_dir: Some(temp.path().join("data")),
            ..AppConfig::default()
        };
        config.save_to(&config_path).unwrap();
        let app = App::new(Some(&config_path), false).unwrap();
        (app, temp)
    }

    #[test]
    fn test_one_based_indices() {
        let (app, _temp) = create_test_app();
        assert_eq!(app.section_index(1).unwrap(), 0);
        assert_eq!(app.section_index(8).unwrap(), 7);
        assert!(app.section_index(0).is_err());
        assert!(app.section_index(9).is_err());

        assert_eq!(app.item_index(7, 2).unwrap(), 1);
        assert!(app.item_index(7, 3).is_err());
    }

    #[test]
    fn test_edits_survive_reopen() {
        let (mut app, temp) = create_test_app();
        app.sheet.rename_section(0, "Bit Tricks").unwrap();
        app.save_sheet().unwrap();

        let reopened = App::new(Some(&temp.path().join("config.toml")), false).unwrap();
        assert_eq!(reopened.sheet.sections()[0].category, "Bit Tricks");
    }

    #[test]
    fn test_ephemeral_edits_are_not_persisted() {
        let (_app, temp) = create_test_app();
        let config_path = temp.path().join("config.toml");

        let mut ephemeral = App::new(Some(&config_path), true).unwrap();
        ephemeral.sheet.rename_section(0, "Scratch").unwrap();
        ephemeral.save_sheet().unwrap();

        let reopened = App::new(Some(&config_path), false).unwrap();
        assert_eq!(reopened.sheet.sections()[0].category, "1. C/C++ & Bitwise Logic");
        assert!(!temp.path().join("data").join("kv").exists());
    }

    #[test]
    fn test_export_print_default_path() {
        let (app, temp) = create_test_app();
        let path = app.export_print(None).unwrap();
        assert_eq!(path, temp.path().join("data").join("cheatsheet.html"));
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("Cheat Sheet - Page 2"));
    }
}
