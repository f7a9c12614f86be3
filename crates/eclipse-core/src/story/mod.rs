//! Narrative progression.
//!
//! Chapters unlock by level. Some chapters end with a choice whose options
//! each carry an [`Alignment`]; the latest choice is the user's alignment.

mod chapters;

pub use chapters::CHAPTERS;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ValidationError};

/// Stance recorded from story choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Focused,
    Balanced,
    Driven,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Focused => "focused",
            Alignment::Balanced => "balanced",
            Alignment::Driven => "driven",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "focused" => Some(Alignment::Focused),
            "balanced" => Some(Alignment::Balanced),
            "driven" => Some(Alignment::Driven),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const NEUTRAL_ALIGNMENT: &str = "neutral";

/// Normalize a stored alignment string. Anything unknown is `neutral`.
pub fn resolve_alignment(alignment: &str) -> &'static str {
    Alignment::parse(alignment)
        .map(|a| a.as_str())
        .unwrap_or(NEUTRAL_ALIGNMENT)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub label: &'static str,
    pub alignment: Alignment,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Choice {
    pub prompt: &'static str,
    pub options: [ChoiceOption; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chapter {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub unlock_level: u32,
    pub narrative: &'static str,
    pub choice: Option<Choice>,
}

impl Chapter {
    pub fn is_unlocked_at(&self, level: u32) -> bool {
        level >= self.unlock_level
    }

    pub fn offers(&self, alignment: Alignment) -> bool {
        self.choice
            .map(|c| c.options.iter().any(|o| o.alignment == alignment))
            .unwrap_or(false)
    }
}

pub fn chapter(id: u32) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|c| c.id == id)
}

pub fn unlocked_chapters(level: u32) -> Vec<&'static Chapter> {
    CHAPTERS.iter().filter(|c| c.is_unlocked_at(level)).collect()
}

pub fn next_locked_chapter(level: u32) -> Option<&'static Chapter> {
    CHAPTERS.iter().find(|c| !c.is_unlocked_at(level))
}

pub fn is_chapter_unlocked(id: u32, level: u32) -> bool {
    chapter(id).map(|c| c.is_unlocked_at(level)).unwrap_or(false)
}

/// Check that a user at `level` may move to chapter `id`, optionally
/// recording `alignment`.
pub fn validate_advance(
    id: u32,
    level: u32,
    alignment: Option<Alignment>,
) -> Result<&'static Chapter> {
    let target = chapter(id).ok_or(ValidationError::UnknownChapter(id))?;
    if !target.is_unlocked_at(level) {
        return Err(ValidationError::ChapterLocked {
            chapter: id,
            required: target.unlock_level,
            level,
        }
        .into());
    }
    if let Some(a) = alignment {
        if !target.offers(a) {
            return Err(ValidationError::AlignmentNotOffered {
                chapter: id,
                alignment: a.to_string(),
            }
            .into());
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn unlocks_follow_levels() {
        let ids: Vec<u32> = unlocked_chapters(5).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(next_locked_chapter(5).map(|c| c.id), Some(4));
        assert!(next_locked_chapter(25).is_none());
        assert!(unlocked_chapters(0).is_empty());
    }

    #[test]
    fn unlock_check_handles_unknown_ids() {
        assert!(is_chapter_unlocked(1, 1));
        assert!(!is_chapter_unlocked(7, 24));
        assert!(is_chapter_unlocked(7, 25));
        assert!(!is_chapter_unlocked(42, 100));
    }

    #[test]
    fn alignment_resolution() {
        assert_eq!(resolve_alignment("driven"), "driven");
        assert_eq!(resolve_alignment("neutral"), "neutral");
        assert_eq!(resolve_alignment("chaotic"), "neutral");
        assert_eq!(resolve_alignment(""), "neutral");
    }

    #[test]
    fn advance_validation() {
        assert!(validate_advance(3, 5, Some(Alignment::Balanced)).is_ok());
        assert!(matches!(
            validate_advance(9, 50, None),
            Err(CoreError::Validation(ValidationError::UnknownChapter(9)))
        ));
        assert!(matches!(
            validate_advance(4, 3, None),
            Err(CoreError::Validation(ValidationError::ChapterLocked { required: 8, .. }))
        ));
        // Chapter 2 has no choice
        assert!(matches!(
            validate_advance(2, 3, Some(Alignment::Focused)),
            Err(CoreError::Validation(ValidationError::AlignmentNotOffered { .. }))
        ));
    }

    #[test]
    fn chapters_with_choices_offer_every_alignment() {
        for c in CHAPTERS.iter().filter(|c| c.choice.is_some()) {
            assert!(c.offers(Alignment::Focused));
            assert!(c.offers(Alignment::Balanced));
            assert!(c.offers(Alignment::Driven));
        }
    }
}
