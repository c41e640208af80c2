//! Data models for the cheat sheet

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One titled code + explanation entry within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: String,
    pub code: String,
    pub explanation: String,
}

impl Item {
    pub fn new(title: impl Into<String>, code: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            explanation: explanation.into(),
        }
    }

    /// Item appended by "add item"
    pub fn placeholder() -> Self {
        Self::new("New Item", "", "Description")
    }

    pub fn field(&self, field: ItemField) -> &str {
        match field {
            ItemField::Title => &self.title,
            ItemField::Code => &self.code,
            ItemField::Explanation => &self.explanation,
        }
    }

    pub fn set_field(&mut self, field: ItemField, value: String) {
        match field {
            ItemField::Title => self.title = value,
            ItemField::Code => self.code = value,
            ItemField::Explanation => self.explanation = value,
        }
    }
}

/// A named group of items shown as one block on the sheet.
///
/// Sections have no stable id; they are addressed by their position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub category: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Section {
    pub fn new(category: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            category: category.into(),
            items,
        }
    }

    /// Section appended by "add section"
    pub fn placeholder() -> Self {
        Self::new(
            "New Section",
            vec![Item::new("Topic", "// code here", "Explanation here")],
        )
    }
}

/// Editable text field of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Title,
    Code,
    Explanation,
}

impl ItemField {
    pub const ALL: [ItemField; 3] = [ItemField::Title, ItemField::Code, ItemField::Explanation];

    pub fn label(self) -> &'static str {
        match self {
            ItemField::Title => "title",
            ItemField::Code => "code",
            ItemField::Explanation => "explanation",
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ItemField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(ItemField::Title),
            "code" => Ok(ItemField::Code),
            "explanation" => Ok(ItemField::Explanation),
            other => Err(format!(
                "unknown field '{}' (expected title, code or explanation)",
                other
            )),
        }
    }
}

/// Direction for reordering a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    /// Index of the neighbor to swap with, if it is inside `[0, len)`
    pub fn neighbor(self, index: usize, len: usize) -> Option<usize> {
        let target = match self {
            MoveDirection::Up => index.checked_sub(1)?,
            MoveDirection::Down => index.checked_add(1)?,
        };
        (target < len).then_some(target)
    }
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            other => Err(format!("unknown direction '{}' (expected up or down)", other)),
        }
    }
}
