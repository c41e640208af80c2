use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use ratatui::prelude::Rect;

use iotprep_lib::cheatsheet::pagination::page_of;
use iotprep_lib::cheatsheet::{page_count, ItemField, MoveDirection, Section, SECTIONS_PER_PAGE};
use iotprep_lib::concepts::{self, Concept, ConceptCategory};
use iotprep_lib::config::ExamConfig;
use iotprep_lib::countdown::Countdown;
use iotprep_lib::quiz::{QuestionGenerator, QuizRunner};
use iotprep_lib::router::{Router, View};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Normal,
    Edit(EditTarget),
    Search,
    Confirm(ConfirmAction),
}

/// What the inline input is editing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditTarget {
    Category { section: usize },
    Field { section: usize, item: usize, field: ItemField },
}

/// Actions that only run after the user answers `y`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfirmAction {
    DeleteSection(usize),
    Reset,
    /// Leave the cheat sheet with unsaved edits
    Leave(View),
    Quit,
}

impl ConfirmAction {
    pub fn prompt(&self) -> String {
        match self {
            ConfirmAction::DeleteSection(i) => format!("Delete section {} entirely?", i + 1),
            ConfirmAction::Reset => {
                "Reset all changes? This cannot be undone.".to_string()
            }
            ConfirmAction::Leave(_) => "Discard unsaved cheat sheet edits?".to_string(),
            ConfirmAction::Quit => "Quit without saving cheat sheet edits?".to_string(),
        }
    }
}

pub struct DashboardState {
    pub countdown: Countdown,
    pub remaining: String,
    pub selected: usize,
    last_refresh: Option<Instant>,
}

impl DashboardState {
    fn new(exam: &ExamConfig) -> Self {
        let mut countdown = Countdown::for_exam(exam, Utc::now());
        let remaining = countdown.display(Utc::now());
        Self {
            countdown,
            remaining,
            selected: 0,
            last_refresh: Some(Instant::now()),
        }
    }

    fn tick(&mut self) {
        let due = self
            .last_refresh
            .map_or(true, |at| at.elapsed() >= Duration::from_secs(1));
        if due {
            self.remaining = self.countdown.display(Utc::now());
            self.last_refresh = Some(Instant::now());
        }
    }
}

/// Selection in the cheat sheet: a section header, or one of its items
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SheetCursor {
    pub section: usize,
    pub item: Option<usize>,
}

impl SheetCursor {
    /// Next header or item in reading order
    pub fn next(self, sections: &[Section]) -> Self {
        let Some(section) = sections.get(self.section) else {
            return self;
        };
        let next_item = self.item.map_or(0, |i| i + 1);
        if next_item < section.items.len() {
            return Self { section: self.section, item: Some(next_item) };
        }
        if self.section + 1 < sections.len() {
            return Self { section: self.section + 1, item: None };
        }
        self
    }

    /// Previous header or item in reading order
    pub fn prev(self, sections: &[Section]) -> Self {
        match self.item {
            Some(0) => Self { section: self.section, item: None },
            Some(i) => Self { section: self.section, item: Some(i - 1) },
            None if self.section == 0 => self,
            None => {
                let section = self.section - 1;
                let item = sections
                    .get(section)
                    .and_then(|s| s.items.len().checked_sub(1));
                Self { section, item }
            }
        }
    }

    /// Pull the cursor back inside the list after a removal
    pub fn clamp(self, sections: &[Section]) -> Self {
        if sections.is_empty() {
            return Self::default();
        }
        let section = self.section.min(sections.len() - 1);
        let len = sections[section].items.len();
        let item = match self.item {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
        Self { section, item }
    }
}

#[derive(Default)]
pub struct SheetState {
    pub cursor: SheetCursor,
    /// Layout editing is on; off means read-only browsing
    pub editing: bool,
}

pub struct PracticeState {
    pub runner: QuizRunner,
    pub selected: usize,
    pub scroll: u16,
}

#[derive(Default)]
pub struct ConceptsState {
    pub category: Option<ConceptCategory>,
    pub query: String,
    pub expanded: HashSet<&'static str>,
    pub selected: usize,
    pub scroll: u16,
}

impl ConceptsState {
    pub fn visible(&self) -> Vec<&'static Concept> {
        concepts::filter(concepts::concepts(), self.category, &self.query)
    }
}

/// Per-view state. Replaced wholesale on navigation, so nothing a view
/// started (countdown, question request) outlives it.
pub enum Screen {
    Dashboard(DashboardState),
    CheatSheet(SheetState),
    Practice(PracticeState),
    Concepts(ConceptsState),
}

pub struct TuiState {
    pub app: App,
    pub runtime: tokio::runtime::Runtime,
    pub generator: Arc<dyn QuestionGenerator>,
    pub router: Router,
    pub screen: Screen,
    pub mode: Mode,

    // Inline input (edit mode)
    pub input_text: String,
    pub flash_message: Option<String>,

    // Key state for multi-char sequences
    pub pending_key: Option<char>,

    // Tab bar area for mouse hit-testing (updated each draw)
    pub header_area: Option<Rect>,

    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        let generator = app.generator()?;
        let router = Router::new();
        let screen = Screen::Dashboard(DashboardState::new(&app.config.exam));

        Ok(Self {
            app,
            runtime,
            generator,
            router,
            screen,
            mode: Mode::Normal,
            input_text: String::new(),
            flash_message: None,
            pending_key: None,
            header_area: None,
            show_help: false,
            quit: false,
        })
    }

    /// Called once per event-loop iteration
    pub fn tick(&mut self) {
        match &mut self.screen {
            Screen::Dashboard(dashboard) => dashboard.tick(),
            Screen::Practice(practice) => {
                if practice.runner.poll() {
                    practice.selected = 0;
                    practice.scroll = 0;
                }
            }
            _ => {}
        }
    }

    // ===== Navigation =====

    pub fn navigate(&mut self, view: View) {
        if view == self.router.current() {
            return;
        }
        if self.router.current() == View::CheatSheet && self.app.sheet.is_dirty() {
            self.mode = Mode::Confirm(ConfirmAction::Leave(view));
            return;
        }
        self.enter(view);
    }

    fn enter(&mut self, view: View) {
        if self.router.current() == View::CheatSheet {
            // Unsaved edits do not survive leaving the sheet
            self.app.sheet.load();
        }
        self.router.navigate(view);
        self.screen = match view {
            View::Dashboard => Screen::Dashboard(DashboardState::new(&self.app.config.exam)),
            View::CheatSheet => {
                self.app.sheet.load();
                Screen::CheatSheet(SheetState::default())
            }
            View::Practice => Screen::Practice(PracticeState {
                runner: QuizRunner::new(Arc::clone(&self.generator), self.runtime.handle().clone()),
                selected: 0,
                scroll: 0,
            }),
            View::Concepts => Screen::Concepts(ConceptsState::default()),
        };
        self.mode = Mode::Normal;
        self.input_text.clear();
        self.pending_key = None;
    }

    pub fn request_quit(&mut self) {
        if self.app.sheet.is_dirty() {
            self.mode = Mode::Confirm(ConfirmAction::Quit);
        } else {
            self.quit = true;
        }
    }

    // ===== Confirmation =====

    pub fn confirm(&mut self) {
        let Mode::Confirm(action) = self.mode else {
            return;
        };
        self.mode = Mode::Normal;

        match action {
            ConfirmAction::DeleteSection(index) => match self.app.sheet.delete_section(index) {
                Ok(removed) => {
                    self.flash_message = Some(format!("Deleted \"{}\"", removed.category));
                    self.clamp_sheet_cursor();
                }
                Err(e) => self.flash_message = Some(format!("Error: {}", e)),
            },
            ConfirmAction::Reset => match self.app.sheet.reset() {
                Ok(()) => {
                    if let Screen::CheatSheet(sheet) = &mut self.screen {
                        sheet.editing = false;
                        sheet.cursor = SheetCursor::default();
                    }
                    self.flash_message = Some("Cheat sheet reset to defaults".to_string());
                }
                Err(e) => self.flash_message = Some(format!("Error: {}", e)),
            },
            ConfirmAction::Leave(view) => self.enter(view),
            ConfirmAction::Quit => self.quit = true,
        }
    }

    pub fn decline(&mut self) {
        self.mode = Mode::Normal;
        self.flash_message = Some("Cancelled".to_string());
    }

    // ===== Dashboard =====

    pub fn dashboard_move(&mut self, down: bool) {
        if let Screen::Dashboard(dashboard) = &mut self.screen {
            let last = View::destinations().len() - 1;
            dashboard.selected = if down {
                (dashboard.selected + 1).min(last)
            } else {
                dashboard.selected.saturating_sub(1)
            };
        }
    }

    pub fn dashboard_open(&mut self) {
        if let Screen::Dashboard(dashboard) = &self.screen {
            let view = View::destinations()[dashboard.selected];
            self.navigate(view);
        }
    }

    // ===== Cheat sheet =====

    fn sheet_state(&mut self) -> Option<&mut SheetState> {
        match &mut self.screen {
            Screen::CheatSheet(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn sheet_cursor(&self) -> SheetCursor {
        match &self.screen {
            Screen::CheatSheet(sheet) => sheet.cursor,
            _ => SheetCursor::default(),
        }
    }

    pub fn sheet_editing(&self) -> bool {
        matches!(&self.screen, Screen::CheatSheet(sheet) if sheet.editing)
    }

    /// Page holding the selected section
    pub fn sheet_page(&self) -> usize {
        page_of(self.sheet_cursor().section).min(page_count(self.app.sheet.len()) - 1)
    }

    fn clamp_sheet_cursor(&mut self) {
        let clamped = self.sheet_cursor().clamp(self.app.sheet.sections());
        if let Some(sheet) = self.sheet_state() {
            sheet.cursor = clamped;
        }
    }

    fn set_sheet_cursor(&mut self, cursor: SheetCursor) {
        if let Some(sheet) = self.sheet_state() {
            sheet.cursor = cursor;
        }
    }

    pub fn sheet_move(&mut self, down: bool) {
        let cursor = self.sheet_cursor();
        let sections = self.app.sheet.sections();
        let next = if down { cursor.next(sections) } else { cursor.prev(sections) };
        self.set_sheet_cursor(next);
    }

    pub fn sheet_go_top(&mut self) {
        self.set_sheet_cursor(SheetCursor::default());
    }

    pub fn sheet_go_bottom(&mut self) {
        let sections = self.app.sheet.sections();
        let cursor = match sections.len().checked_sub(1) {
            Some(last) => SheetCursor {
                section: last,
                item: sections[last].items.len().checked_sub(1),
            },
            None => SheetCursor::default(),
        };
        self.set_sheet_cursor(cursor);
    }

    /// Jump to the first section of the previous or next page
    pub fn sheet_turn_page(&mut self, forward: bool) {
        let current = self.sheet_page();
        let last = page_count(self.app.sheet.len()) - 1;
        let target = if forward { (current + 1).min(last) } else { current.saturating_sub(1) };
        if target != current {
            let section = (target * SECTIONS_PER_PAGE)
                .min(self.app.sheet.len().saturating_sub(1));
            self.set_sheet_cursor(SheetCursor { section, item: None });
        }
    }

    pub fn toggle_sheet_editing(&mut self) {
        if let Some(sheet) = self.sheet_state() {
            sheet.editing = !sheet.editing;
            let message = if sheet.editing {
                "Edit mode: sections flow automatically, 4 per page"
            } else {
                "Edit mode off"
            };
            self.flash_message = Some(message.to_string());
        }
    }

    pub fn sheet_add_section(&mut self) {
        let index = self.app.sheet.add_section();
        self.set_sheet_cursor(SheetCursor { section: index, item: None });
        self.flash_message = Some(format!("Added section {}", index + 1));
    }

    pub fn sheet_add_item(&mut self) {
        let cursor = self.sheet_cursor();
        match self.app.sheet.add_item(cursor.section) {
            Ok(item) => self.set_sheet_cursor(SheetCursor { section: cursor.section, item: Some(item) }),
            Err(e) => self.flash_message = Some(format!("Error: {}", e)),
        }
    }

    /// Items go immediately; whole sections ask first
    pub fn sheet_delete(&mut self) {
        let cursor = self.sheet_cursor();
        if self.app.sheet.is_empty() {
            return;
        }
        match cursor.item {
            Some(item) => match self.app.sheet.delete_item(cursor.section, item) {
                Ok(removed) => {
                    self.flash_message = Some(format!("Deleted item \"{}\"", removed.title));
                    self.clamp_sheet_cursor();
                }
                Err(e) => self.flash_message = Some(format!("Error: {}", e)),
            },
            None => self.mode = Mode::Confirm(ConfirmAction::DeleteSection(cursor.section)),
        }
    }

    pub fn sheet_move_section(&mut self, direction: MoveDirection) {
        let cursor = self.sheet_cursor();
        if !self.app.sheet.can_move(cursor.section, direction) {
            return;
        }
        if let Ok(true) = self.app.sheet.move_section(cursor.section, direction) {
            if let Some(target) = direction.neighbor(cursor.section, self.app.sheet.len()) {
                self.set_sheet_cursor(SheetCursor { section: target, item: cursor.item });
            }
        }
    }

    /// Open the inline editor on the selected header, or on one field of the
    /// selected item
    pub fn sheet_begin_edit(&mut self, field: ItemField) {
        let cursor = self.sheet_cursor();
        let Ok(section) = self.app.sheet.section(cursor.section) else {
            return;
        };
        let (target, current) = match cursor.item {
            None => (
                EditTarget::Category { section: cursor.section },
                section.category.clone(),
            ),
            Some(item) => match section.items.get(item) {
                Some(it) => (
                    EditTarget::Field { section: cursor.section, item, field },
                    it.field(field).to_string(),
                ),
                None => return,
            },
        };
        self.input_text = current;
        self.mode = Mode::Edit(target);
    }

    pub fn commit_edit(&mut self) {
        let Mode::Edit(target) = self.mode else {
            return;
        };
        let value = std::mem::take(&mut self.input_text);
        let result = match target {
            EditTarget::Category { section } => self.app.sheet.rename_section(section, value),
            EditTarget::Field { section, item, field } => {
                self.app.sheet.update_item_field(section, item, field, value)
            }
        };
        if let Err(e) = result {
            self.flash_message = Some(format!("Error: {}", e));
        }
        self.mode = Mode::Normal;
    }

    pub fn cancel_edit(&mut self) {
        self.input_text.clear();
        self.mode = Mode::Normal;
    }

    pub fn sheet_save(&mut self) {
        match self.app.save_sheet() {
            Ok(()) => {
                if let Some(sheet) = self.sheet_state() {
                    sheet.editing = false;
                }
                self.flash_message = Some("Cheat sheet saved successfully!".to_string());
            }
            Err(e) => self.flash_message = Some(format!("Error: {:#}", e)),
        }
    }

    pub fn sheet_export(&mut self) {
        self.flash_message = Some(match self.app.export_print(None) {
            Ok(path) => format!("Printable sheet written to {}", path.display()),
            Err(e) => format!("Error: {:#}", e),
        });
    }

    // ===== Practice =====

    pub fn practice_generate(&mut self) {
        if let Screen::Practice(practice) = &mut self.screen {
            if !practice.runner.request() {
                self.flash_message = Some("Still consulting the digital TA...".to_string());
            }
        }
    }

    pub fn practice_move(&mut self, down: bool) {
        if let Screen::Practice(practice) = &mut self.screen {
            let count = practice.runner.session().questions().len();
            if count == 0 {
                return;
            }
            practice.selected = if down {
                (practice.selected + 1).min(count - 1)
            } else {
                practice.selected.saturating_sub(1)
            };
            practice.scroll = 0;
        }
    }

    pub fn practice_toggle_reveal(&mut self) {
        if let Screen::Practice(practice) = &mut self.screen {
            let id = practice
                .runner
                .session()
                .questions()
                .get(practice.selected)
                .map(|q| q.id);
            if let Some(id) = id {
                practice.runner.session_mut().toggle_reveal(id);
            }
        }
    }

    // ===== Concepts =====

    fn concepts_state(&mut self) -> Option<&mut ConceptsState> {
        match &mut self.screen {
            Screen::Concepts(concepts) => Some(concepts),
            _ => None,
        }
    }

    /// Cycle All → Protocols → RTOS → Hardware → Power → All
    pub fn concepts_cycle_category(&mut self, forward: bool) {
        if let Some(state) = self.concepts_state() {
            let mut tabs: Vec<Option<ConceptCategory>> = vec![None];
            tabs.extend(ConceptCategory::ALL.into_iter().map(Some));
            let current = tabs.iter().position(|t| *t == state.category).unwrap_or(0);
            let next = if forward {
                (current + 1) % tabs.len()
            } else {
                (current + tabs.len() - 1) % tabs.len()
            };
            state.category = tabs[next];
            state.selected = 0;
            state.scroll = 0;
        }
    }

    pub fn concepts_set_category(&mut self, category: Option<ConceptCategory>) {
        if let Some(state) = self.concepts_state() {
            state.category = category;
            state.selected = 0;
            state.scroll = 0;
        }
    }

    pub fn concepts_move(&mut self, down: bool) {
        if let Some(state) = self.concepts_state() {
            let count = state.visible().len();
            if count == 0 {
                return;
            }
            state.selected = if down {
                (state.selected + 1).min(count - 1)
            } else {
                state.selected.saturating_sub(1)
            };
            state.scroll = 0;
        }
    }

    pub fn concepts_select_edge(&mut self, last: bool) {
        if let Some(state) = self.concepts_state() {
            state.selected = if last {
                state.visible().len().saturating_sub(1)
            } else {
                0
            };
        }
    }

    pub fn concepts_toggle_expand(&mut self) {
        if let Some(state) = self.concepts_state() {
            if let Some(concept) = state.visible().get(state.selected) {
                if !state.expanded.remove(concept.id) {
                    state.expanded.insert(concept.id);
                }
            }
        }
    }

    pub fn concepts_search_push(&mut self, c: char) {
        if let Some(state) = self.concepts_state() {
            state.query.push(c);
            state.selected = 0;
            state.scroll = 0;
        }
    }

    pub fn concepts_search_pop(&mut self) {
        if let Some(state) = self.concepts_state() {
            state.query.pop();
            state.selected = 0;
        }
    }

    pub fn concepts_clear_search(&mut self) {
        if let Some(state) = self.concepts_state() {
            state.query.clear();
            state.selected = 0;
        }
    }

    pub fn scroll(&mut self, down: bool, amount: u16) {
        let scroll = match &mut self.screen {
            Screen::Practice(practice) => &mut practice.scroll,
            Screen::Concepts(concepts) => &mut concepts.scroll,
            _ => return,
        };
        *scroll = if down {
            scroll.saturating_add(amount)
        } else {
            scroll.saturating_sub(amount)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iotprep_lib::cheatsheet::{default_sections, Item};

    #[test]
    fn test_cursor_walks_headers_and_items() {
        let sections = vec![
            Section::new("A", vec![Item::placeholder(), Item::placeholder()]),
            Section::new("B", vec![]),
            Section::new("C", vec![Item::placeholder()]),
        ];
        let mut cursor = SheetCursor::default();
        let mut visited = vec![cursor];
        for _ in 0..6 {
            cursor = cursor.next(&sections);
            visited.push(cursor);
        }
        let expected = [
            (0, None),
            (0, Some(0)),
            (0, Some(1)),
            (1, None),
            (2, None),
            (2, Some(0)),
            (2, Some(0)),
        ];
        let got: Vec<(usize, Option<usize>)> = visited.iter().map(|c| (c.section, c.item)).collect();
        assert_eq!(got, expected);

        // And back again
        let back = SheetCursor { section: 2, item: None }.prev(&sections);
        assert_eq!(back, SheetCursor { section: 1, item: None });
        let back = SheetCursor { section: 1, item: None }.prev(&sections);
        assert_eq!(back, SheetCursor { section: 0, item: Some(1) });
        assert_eq!(SheetCursor::default().prev(&sections), SheetCursor::default());
    }

    #[test]
    fn test_cursor_clamp_after_removal() {
        let sections = default_sections();
        let cursor = SheetCursor { section: 20, item: Some(9) }.clamp(&sections);
        assert_eq!(cursor, SheetCursor { section: 7, item: Some(1) });
        assert_eq!(SheetCursor { section: 3, item: Some(0) }.clamp(&[]), SheetCursor::default());
    }

    #[test]
    fn test_confirm_prompts_are_one_based() {
        assert_eq!(ConfirmAction::DeleteSection(0).prompt(), "Delete section 1 entirely?");
    }
}
