//! Editable, printable cheat sheet
//!
//! This module provides:
//! - Section and item models (positional identity, no ids)
//! - The built-in default sheet
//! - `SectionStore` for edits and explicit save/reset against a key-value store
//! - Pagination into four-slot landscape pages

pub mod defaults;
pub mod models;
pub mod pagination;
pub mod store;

pub use defaults::default_sections;
pub use models::*;
pub use pagination::{page, page_count, paginate, Block, Page, PlacedSection, SECTIONS_PER_PAGE};
pub use store::{CheatSheetError, SectionStore, SNAPSHOT_KEY};
