//! People who share expenses, and the identifiers used to reference them.

use crate::Result;
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// The display colors assigned to people, cycled in order as people are added.
pub const PALETTE: [&str; 10] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#84CC16", "#F97316",
    "#EC4899", "#6366F1",
];

/// An opaque, unique identifier for a person. Expenses reference people by this id only, so
/// renaming a person never rewrites expense history.
#[derive(
    Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Creates an id from an existing string, e.g. one read back from a ledger file.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A member of the ledger. The name and color are display-only; nothing in the balance or
/// settlement computation reads them.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Person {
    id: PersonId,
    name: String,
    color: String,
}

impl Person {
    /// Creates a person with a freshly generated id.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::with_id(PersonId::generate(), name, color)
    }

    /// Creates a person with a caller-supplied id, e.g. when rebuilding from external data.
    pub fn with_id(id: PersonId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn id(&self) -> &PersonId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// The palette color for the nth person added to a ledger.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Validates a display color of the form `#RRGGBB`.
pub fn validate_color(color: &str) -> Result<()> {
    let hex = match color.strip_prefix('#') {
        Some(hex) => hex,
        None => bail!("Invalid color '{color}': expected the form #RRGGBB"),
    };
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid color '{color}': expected the form #RRGGBB");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = PersonId::generate();
        let b = PersonId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_person_id_serde_is_transparent() {
        let id = PersonId::new("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");
        let parsed: PersonId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_person_serde_round_trip() {
        let person = Person::new("Alice", "#3B82F6");
        let json = serde_json::to_string(&person).unwrap();
        let parsed: Person = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, person);
        assert_eq!(parsed.name(), "Alice");
        assert_eq!(parsed.color(), "#3B82F6");
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), "#3B82F6");
        assert_eq!(palette_color(9), "#6366F1");
        assert_eq!(palette_color(10), "#3B82F6");
    }

    #[test]
    fn test_validate_color() {
        assert!(validate_color("#3B82F6").is_ok());
        assert!(validate_color("#abcdef").is_ok());
        assert!(validate_color("3B82F6").is_err());
        assert!(validate_color("#3B82F").is_err());
        assert!(validate_color("#GGGGGG").is_err());
    }
}
