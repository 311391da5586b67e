use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// How hard a service is to guess. Also determines the score multiplier.
///
/// Serialized as `Easy`, `Medium` or `Hard`. Deserialization goes through
/// [`Difficulty::parse`], so hand-edited documents may use any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Difficulty {
    /// Household names like EC2 or S3.
    Easy,
    /// Services most practitioners have touched.
    Medium,
    /// Niche or recently launched services.
    Hard,
}

impl Difficulty {
    /// Score multiplier applied to a win at this difficulty.
    pub fn multiplier(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// Parse a difficulty from a user-supplied string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" | "1" => Some(Self::Easy),
            "medium" | "m" | "2" => Some(Self::Medium),
            "hard" | "h" | "3" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl FromStr for Difficulty {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CatalogError::InvalidDifficulty(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| de::Error::unknown_variant(&raw, &["Easy", "Medium", "Hard"]))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

/// Metadata for one guessable service. The name is the catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Shown to the player as the hint.
    pub description: String,
    /// Free-text grouping label used for filtering.
    pub category: String,
    /// Difficulty level.
    pub difficulty: Difficulty,
    /// Certification study notes, shown after the round.
    #[serde(rename = "certification_notes")]
    pub study_notes: String,
}

impl ServiceEntry {
    /// Create an entry.
    pub fn new(
        description: impl Into<String>,
        category: impl Into<String>,
        difficulty: Difficulty,
        study_notes: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            category: category.into(),
            difficulty,
            study_notes: study_notes.into(),
        }
    }

    /// Append a paragraph to the study notes unless it is already present.
    /// Returns true if the notes changed.
    pub fn append_note(&mut self, note: &str) -> bool {
        if self.study_notes.contains(note) {
            return false;
        }
        if self.study_notes.is_empty() {
            self.study_notes = note.to_string();
        } else {
            self.study_notes.push_str("\n\n");
            self.study_notes.push_str(note);
        }
        true
    }

    /// Merge the non-empty fields of a patch into this entry.
    pub fn apply(&mut self, patch: &EntryPatch) {
        if let Some(description) = non_empty(&patch.description) {
            self.description = description.to_string();
        }
        if let Some(category) = non_empty(&patch.category) {
            self.category = category.to_string();
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(notes) = non_empty(&patch.study_notes) {
            self.study_notes = notes.to_string();
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A partial update. `None` and blank strings leave the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New difficulty.
    pub difficulty: Option<Difficulty>,
    /// New study notes (replaces, does not append).
    pub study_notes: Option<String>,
}

impl EntryPatch {
    /// Whether applying this patch could change anything.
    pub fn is_empty(&self) -> bool {
        non_empty(&self.description).is_none()
            && non_empty(&self.category).is_none()
            && self.difficulty.is_none()
            && non_empty(&self.study_notes).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lambda() -> ServiceEntry {
        ServiceEntry::new(
            "Serverless compute",
            "Compute",
            Difficulty::Medium,
            "Know triggers",
        )
    }

    #[test]
    fn multipliers() {
        assert_eq!(Difficulty::Easy.multiplier(), 1);
        assert_eq!(Difficulty::Medium.multiplier(), 2);
        assert_eq!(Difficulty::Hard.multiplier(), 3);
    }

    #[test]
    fn parse_difficulty() {
        assert_eq!(Difficulty::parse("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse(" medium "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("3"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("extreme"), None);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_serializes_as_word() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"Hard\"");
    }

    #[test]
    fn difficulty_deserializes_any_case() {
        let d: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(d, Difficulty::Easy);
        let d: Difficulty = serde_json::from_str("\"HARD\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
        assert!(serde_json::from_str::<Difficulty>("\"extreme\"").is_err());
    }

    #[test]
    fn study_notes_use_certification_key() {
        let json = serde_json::to_value(lambda()).unwrap();
        assert_eq!(json["certification_notes"], "Know triggers");
        assert_eq!(json["difficulty"], "Medium");
        assert!(json.get("study_notes").is_none());
    }

    #[test]
    fn patch_skips_blank_fields() {
        let mut entry = lambda();
        entry.apply(&EntryPatch {
            description: Some("   ".to_string()),
            category: Some("Serverless".to_string()),
            difficulty: None,
            study_notes: Some(String::new()),
        });
        assert_eq!(entry.description, "Serverless compute");
        assert_eq!(entry.category, "Serverless");
        assert_eq!(entry.difficulty, Difficulty::Medium);
        assert_eq!(entry.study_notes, "Know triggers");
    }

    #[test]
    fn empty_patch() {
        assert!(EntryPatch::default().is_empty());
        let patch = EntryPatch {
            difficulty: Some(Difficulty::Hard),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn append_note_skips_duplicates() {
        let mut entry = lambda();
        assert!(entry.append_note("Cold starts matter"));
        assert_eq!(entry.study_notes, "Know triggers\n\nCold starts matter");
        assert!(!entry.append_note("Cold starts matter"));
    }

    #[test]
    fn append_note_to_empty() {
        let mut entry = ServiceEntry::new("d", "c", Difficulty::Easy, "");
        assert!(entry.append_note("first"));
        assert_eq!(entry.study_notes, "first");
    }
}
