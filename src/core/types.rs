//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::WizardError;

/// Stable identifier of a feat document in the host (usually a UUID path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatId(pub String);

impl FeatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FeatId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FeatId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Character level
pub type Level = u32;

/// Which feat slot a selection session fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatCategory {
    Class,
    DualClass,
    #[serde(rename = "archetype")]
    FreeArchetype,
    Skill,
    General,
    Ancestry,
    AncestryParagon,
}

impl FeatCategory {
    pub const ALL: [FeatCategory; 7] = [
        FeatCategory::Class,
        FeatCategory::DualClass,
        FeatCategory::FreeArchetype,
        FeatCategory::Skill,
        FeatCategory::General,
        FeatCategory::Ancestry,
        FeatCategory::AncestryParagon,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FeatCategory::Class => "class",
            FeatCategory::DualClass => "dual-class",
            FeatCategory::FreeArchetype => "archetype",
            FeatCategory::Skill => "skill",
            FeatCategory::General => "general",
            FeatCategory::Ancestry => "ancestry",
            FeatCategory::AncestryParagon => "ancestry-paragon",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FeatCategory::Class | FeatCategory::DualClass => "Class Feats",
            FeatCategory::FreeArchetype => "Free Archetype Feats",
            FeatCategory::Skill => "Skill Feats",
            FeatCategory::General => "General Feats",
            FeatCategory::Ancestry => "Ancestry Feats",
            FeatCategory::AncestryParagon => "Ancestry Paragon Feats",
        }
    }

    /// Categories whose candidates are archetype feats by nature
    pub fn is_archetype_only(&self) -> bool {
        matches!(self, FeatCategory::FreeArchetype)
    }

    /// Item group used for the slot location when the feat is granted
    pub fn group(&self) -> &'static str {
        match self {
            FeatCategory::Class | FeatCategory::DualClass => "class",
            FeatCategory::FreeArchetype => "archetype",
            FeatCategory::Skill => "skill",
            FeatCategory::General => "general",
            FeatCategory::Ancestry | FeatCategory::AncestryParagon => "ancestry",
        }
    }
}

impl fmt::Display for FeatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FeatCategory {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FeatCategory::ALL
            .into_iter()
            .find(|category| category.key() == wanted)
            .ok_or_else(|| WizardError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_round_trip() {
        for category in FeatCategory::ALL {
            assert_eq!(category.key().parse::<FeatCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category() {
        assert!(matches!(
            "mythic".parse::<FeatCategory>(),
            Err(WizardError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_only_free_archetype_is_archetype_only() {
        let archetype_only: Vec<_> = FeatCategory::ALL
            .into_iter()
            .filter(FeatCategory::is_archetype_only)
            .collect();
        assert_eq!(archetype_only, vec![FeatCategory::FreeArchetype]);
    }

    #[test]
    fn test_dual_class_shares_class_title() {
        assert_eq!(
            FeatCategory::DualClass.display_name(),
            FeatCategory::Class.display_name()
        );
        assert_eq!(FeatCategory::DualClass.group(), "class");
    }

    #[test]
    fn test_feat_id_serializes_as_plain_string() {
        let id = FeatId::new("Compendium.pf2e.feats-srd.Item.abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Compendium.pf2e.feats-srd.Item.abc\"");
    }
}
