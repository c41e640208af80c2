use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConceptCategory {
    Protocols,
    #[serde(rename = "RTOS")]
    Rtos,
    Hardware,
    Power,
}

impl ConceptCategory {
    pub const ALL: [ConceptCategory; 4] = [
        ConceptCategory::Protocols,
        ConceptCategory::Rtos,
        ConceptCategory::Hardware,
        ConceptCategory::Power,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConceptCategory::Protocols => "Protocols",
            ConceptCategory::Rtos => "RTOS",
            ConceptCategory::Hardware => "Hardware",
            ConceptCategory::Power => "Power",
        }
    }
}

impl fmt::Display for ConceptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConceptCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConceptCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown category '{}' (expected protocols, rtos, hardware or power)",
                    s
                )
            })
    }
}

/// A static study-guide entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: &'static str,
    pub title: &'static str,
    pub category: ConceptCategory,
    pub definition: &'static str,
    pub key_points: &'static [&'static str],
    pub pitfalls: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<&'static str>,
}

/// A run of key-point text, optionally highlighted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub emphasis: bool,
}
