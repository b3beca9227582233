//! Resume parser payloads.

use serde::{Deserialize, Serialize};

/// Fields returned by the resume parser.
///
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub education: Vec<NamedEntry>,
    pub experience: Vec<NamedEntry>,
}

/// An education or experience entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedEntry {
    pub name: String,
}

impl ParsedResume {
    /// Names of the education entries, blanks dropped.
    #[must_use]
    pub fn education_names(&self) -> Vec<String> {
        names(&self.education)
    }

    /// Names of the experience entries, blanks dropped.
    #[must_use]
    pub fn experience_names(&self) -> Vec<String> {
        names(&self.experience)
    }
}

fn names(entries: &[NamedEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.name.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}
