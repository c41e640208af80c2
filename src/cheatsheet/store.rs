//! In-memory section list with explicit persistence
//!
//! Mutations only touch the in-memory list. Nothing reaches the key-value
//! store until `save()` is called, and `reset()` is the only operation that
//! deletes the persisted snapshot.

use std::sync::Arc;

use thiserror::Error;

use super::defaults::default_sections;
use super::models::{Item, ItemField, MoveDirection, Section};
use crate::storage::{KeyValueStore, StorageError};

/// Key under which the serialized section list is stored
pub const SNAPSHOT_KEY: &str = "ee4216_cheatsheet_v1";

#[derive(Error, Debug)]
pub enum CheatSheetError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Section {index} out of range (have {len})")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("Item {item} out of range in section {section} (have {len})")]
    ItemOutOfRange { section: usize, item: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CheatSheetError>;

pub struct SectionStore {
    kv: Arc<dyn KeyValueStore>,
    sections: Vec<Section>,
    dirty: bool,
}

impl SectionStore {
    /// Create a store holding the built-in defaults. Call `load()` to pick up
    /// a persisted snapshot.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            sections: default_sections(),
            dirty: false,
        }
    }

    /// Create a store and immediately load the persisted snapshot
    pub fn open(kv: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self::new(kv);
        store.load();
        store
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, index: usize) -> Result<&Section> {
        self.sections
            .get(index)
            .ok_or(CheatSheetError::SectionOutOfRange {
                index,
                len: self.sections.len(),
            })
    }

    /// True when the in-memory list has edits that were not saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ===== Persistence =====

    /// Read the persisted snapshot, falling back to the defaults when it is
    /// absent, unreadable, or not a JSON array of sections.
    pub fn load(&mut self) {
        self.sections = self.read_snapshot().unwrap_or_else(default_sections);
        self.dirty = false;
    }

    fn read_snapshot(&self) -> Option<Vec<Section>> {
        let raw = match self.kv.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read saved cheat sheet, using defaults: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<Section>>(&raw) {
            Ok(sections) => Some(sections),
            Err(e) => {
                log::warn!("Failed to load saved cheat sheet, using defaults: {}", e);
                None
            }
        }
    }

    /// Serialize the whole list and overwrite the persisted snapshot
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.sections)?;
        self.kv.set(SNAPSHOT_KEY, &json)?;
        self.dirty = false;
        log::info!("Saved cheat sheet ({} sections)", self.sections.len());
        Ok(())
    }

    /// Restore the defaults and delete the persisted snapshot
    pub fn reset(&mut self) -> Result<()> {
        // Snapshot first: a failed remove must leave the sheet as it was
        self.kv.remove(SNAPSHOT_KEY)?;
        self.sections = default_sections();
        self.dirty = false;
        log::info!("Cheat sheet reset to defaults");
        Ok(())
    }

    // ===== Mutations =====

    fn section_mut(&mut self, index: usize) -> Result<&mut Section> {
        let len = self.sections.len();
        self.sections
            .get_mut(index)
            .ok_or(CheatSheetError::SectionOutOfRange { index, len })
    }

    pub fn rename_section(&mut self, index: usize, category: impl Into<String>) -> Result<()> {
        self.section_mut(index)?.category = category.into();
        self.dirty = true;
        Ok(())
    }

    pub fn update_item_field(
        &mut self,
        section_index: usize,
        item_index: usize,
        field: ItemField,
        value: impl Into<String>,
    ) -> Result<()> {
        let section = self.section_mut(section_index)?;
        let len = section.items.len();
        let item = section
            .items
            .get_mut(item_index)
            .ok_or(CheatSheetError::ItemOutOfRange {
                section: section_index,
                item: item_index,
                len,
            })?;
        item.set_field(field, value.into());
        self.dirty = true;
        Ok(())
    }

    /// Append a placeholder section; returns its index
    pub fn add_section(&mut self) -> usize {
        self.sections.push(Section::placeholder());
        self.dirty = true;
        self.sections.len() - 1
    }

    /// Remove a section. Callers are expected to have confirmed with the user.
    pub fn delete_section(&mut self, index: usize) -> Result<Section> {
        if index >= self.sections.len() {
            return Err(CheatSheetError::SectionOutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        self.dirty = true;
        Ok(self.sections.remove(index))
    }

    /// Append a placeholder item; returns its index within the section
    pub fn add_item(&mut self, section_index: usize) -> Result<usize> {
        let section = self.section_mut(section_index)?;
        section.items.push(Item::placeholder());
        let index = section.items.len() - 1;
        self.dirty = true;
        Ok(index)
    }

    pub fn delete_item(&mut self, section_index: usize, item_index: usize) -> Result<Item> {
        let section = self.section_mut(section_index)?;
        if item_index >= section.items.len() {
            return Err(CheatSheetError::ItemOutOfRange {
                section: section_index,
                item: item_index,
                len: section.items.len(),
            });
        }
        let removed = section.items.remove(item_index);
        self.dirty = true;
        Ok(removed)
    }

    /// Whether `move_section(index, direction)` would change anything
    pub fn can_move(&self, index: usize, direction: MoveDirection) -> bool {
        index < self.sections.len() && direction.neighbor(index, self.sections.len()).is_some()
    }

    /// Swap a section with its neighbor. Returns `Ok(false)` without changing
    /// anything when there is no neighbor in that direction.
    pub fn move_section(&mut self, index: usize, direction: MoveDirection) -> Result<bool> {
        let len = self.sections.len();
        if index >= len {
            return Err(CheatSheetError::SectionOutOfRange { index, len });
        }
        match direction.neighbor(index, len) {
            Some(target) => {
                self.sections.swap(index, target);
                self.dirty = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cheatsheet::pagination::page_count;
    use crate::storage::{FileKvStore, MemoryKvStore};
    use tempfile::TempDir;

    fn create_test_store() -> (SectionStore, Arc<MemoryKvStore>) {
        let kv = Arc::new(MemoryKvStore::new());
        let store = SectionStore::new(kv.clone());
        (store, kv)
    }

    fn sample_sections() -> Vec<Section> {
        vec![
            Section::new("A", vec![Item::new("a1", "x = 1;", "one")]),
            Section::new("B", vec![]),
            Section::new(
                "C",
                vec![
                    Item::new("c1", "", ""),
                    Item::new("c2", "line\nbreak", "quote \" and unicode \u{00b5}s"),
                ],
            ),
        ]
    }

    #[test]
    fn test_load_without_snapshot_uses_defaults() {
        let (mut store, _kv) = create_test_store();
        store.load();
        assert_eq!(store.sections(), default_sections().as_slice());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKvStore::new(temp_dir.path().to_path_buf()));

        let mut store = SectionStore::new(kv.clone());
        store.sections = sample_sections();
        store.save().unwrap();

        let reopened = SectionStore::open(kv);
        assert_eq!(reopened.sections(), sample_sections().as_slice());
    }

    #[test]
    fn test_empty_list_round_trip() {
        let (mut store, kv) = create_test_store();
        store.sections.clear();
        store.save().unwrap();

        let reopened = SectionStore::open(kv);
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_corrupted_snapshot_falls_back_to_defaults() {
        for bad in ["not json", "{\"category\":\"x\"}", "42", "[{\"items\":3}]"] {
            let (mut store, kv) = create_test_store();
            kv.set(SNAPSHOT_KEY, bad).unwrap();
            store.sections.clear();
            store.load();
            assert_eq!(store.sections(), default_sections().as_slice(), "input: {}", bad);
        }
    }

    #[test]
    fn test_move_section_boundaries_are_noops() {
        let (mut store, _kv) = create_test_store();
        let before = store.sections().to_vec();
        let last = store.len() - 1;

        assert!(!store.move_section(0, MoveDirection::Up).unwrap());
        assert!(!store.move_section(last, MoveDirection::Down).unwrap());
        assert_eq!(store.sections(), before.as_slice());
        assert!(!store.is_dirty());
        assert!(!store.can_move(0, MoveDirection::Up));
        assert!(!store.can_move(last, MoveDirection::Down));
    }

    #[test]
    fn test_move_section_swaps_neighbors_only() {
        let (mut store, _kv) = create_test_store();
        let before = store.sections().to_vec();

        assert!(store.move_section(2, MoveDirection::Down).unwrap());
        let after = store.sections();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[2], before[3]);
        assert_eq!(after[3], before[2]);
        for i in (0..before.len()).filter(|i| *i != 2 && *i != 3) {
            assert_eq!(after[i], before[i]);
        }

        assert!(store.move_section(3, MoveDirection::Up).unwrap());
        assert_eq!(store.sections(), before.as_slice());
    }

    #[test]
    fn test_move_section_out_of_range_index() {
        let (mut store, _kv) = create_test_store();
        assert!(matches!(
            store.move_section(99, MoveDirection::Up),
            Err(CheatSheetError::SectionOutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn test_delete_item_then_add_item_gives_placeholder() {
        let (mut store, _kv) = create_test_store();
        let count = store.section(1).unwrap().items.len();
        let removed = store.delete_item(1, 0).unwrap();

        let index = store.add_item(1).unwrap();
        let section = store.section(1).unwrap();
        assert_eq!(section.items.len(), count);
        assert_eq!(section.items[index], Item::placeholder());
        assert_ne!(section.items[index], removed);
    }

    #[test]
    fn test_add_sections_grows_pages() {
        let (mut store, _kv) = create_test_store();
        assert_eq!(store.len(), 8);
        for _ in 0..5 {
            store.add_section();
        }
        assert_eq!(store.len(), 13);
        assert_eq!(page_count(store.len()), 4);
        assert_eq!(store.section(12).unwrap(), &Section::placeholder());
    }

    #[test]
    fn test_rename_then_reset_restores_defaults() {
        let (mut store, kv) = create_test_store();
        let original = store.section(0).unwrap().category.clone();

        store.rename_section(0, "Foo").unwrap();
        store.save().unwrap();
        assert_eq!(store.section(0).unwrap().category, "Foo");

        store.reset().unwrap();
        assert_eq!(store.section(0).unwrap().category, original);
        assert_eq!(kv.get(SNAPSHOT_KEY).unwrap(), None);

        let reopened = SectionStore::open(kv);
        assert_eq!(reopened.sections(), default_sections().as_slice());
    }

    /// Store whose deletes always fail
    struct ReadOnlyKvStore(MemoryKvStore);

    impl KeyValueStore for ReadOnlyKvStore {
        fn get(&self, key: &str) -> crate::storage::Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> crate::storage::Result<()> {
            self.0.set(key, value)
        }

        fn remove(&self, _key: &str) -> crate::storage::Result<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_failed_reset_leaves_state_unchanged() {
        let kv = Arc::new(ReadOnlyKvStore(MemoryKvStore::new()));
        let mut store = SectionStore::new(kv.clone());
        store.rename_section(0, "Foo").unwrap();
        store.save().unwrap();
        store.rename_section(1, "Bar").unwrap();
        let before = store.sections().to_vec();

        assert!(matches!(store.reset(), Err(CheatSheetError::Storage(_))));

        assert_eq!(store.sections(), before.as_slice());
        assert!(store.is_dirty());
        let persisted = kv.get(SNAPSHOT_KEY).unwrap().unwrap();
        assert!(persisted.contains("Foo"));
    }

    #[test]
    fn test_delete_section_shifts_indices() {
        let (mut store, _kv) = create_test_store();
        let third = store.section(2).unwrap().clone();
        store.delete_section(1).unwrap();
        assert_eq!(store.len(), 7);
        assert_eq!(store.section(1).unwrap(), &third);
    }

    #[test]
    fn test_update_item_field() {
        let (mut store, _kv) = create_test_store();
        store
            .update_item_field(0, 1, ItemField::Code, "val |= BIT(3);")
            .unwrap();
        let item = &store.section(0).unwrap().items[1];
        assert_eq!(item.code, "val |= BIT(3);");
        assert_eq!(item.title, "Bitwise Manipulation");
        assert!(store.is_dirty());
    }

    #[test]
    fn test_out_of_range_edits_leave_state_unchanged() {
        let (mut store, _kv) = create_test_store();
        let before = store.sections().to_vec();

        assert!(store.rename_section(8, "x").is_err());
        assert!(store.delete_section(8).is_err());
        assert!(store.add_item(8).is_err());
        assert!(matches!(
            store.delete_item(0, 3),
            Err(CheatSheetError::ItemOutOfRange { section: 0, item: 3, len: 3 })
        ));
        assert!(store.update_item_field(0, 9, ItemField::Title, "x").is_err());

        assert_eq!(store.sections(), before.as_slice());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_mutations_do_not_persist_until_save() {
        let (mut store, kv) = create_test_store();
        store.add_section();
        assert_eq!(kv.get(SNAPSHOT_KEY).unwrap(), None);
        assert!(store.is_dirty());

        store.save().unwrap();
        assert!(kv.get(SNAPSHOT_KEY).unwrap().is_some());
        assert!(!store.is_dirty());
    }
}
