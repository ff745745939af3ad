//! Feat records as delivered by the host

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::{FeatId, Level};

/// Trait tag marking a feat as part of an archetype line
pub const ARCHETYPE_TRAIT: &str = "archetype";

/// A candidate feat
///
/// The engine only reads these fields; records are never mutated after the
/// host hands them over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatRecord {
    pub id: FeatId,
    pub name: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub traits: BTreeSet<String>,
    /// Free-text requirements in the order the host lists them
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl FeatRecord {
    pub fn new(id: impl Into<FeatId>, name: impl Into<String>, level: Level) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            traits: BTreeSet::new(),
            prerequisites: Vec::new(),
        }
    }

    pub fn with_trait(mut self, tag: impl Into<String>) -> Self {
        self.traits.insert(tag.into());
        self
    }

    pub fn with_prerequisite(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisites.push(prerequisite.into());
        self
    }

    pub fn has_trait(&self, tag: &str) -> bool {
        self.traits.contains(tag)
    }

    pub fn is_archetype(&self) -> bool {
        self.has_trait(ARCHETYPE_TRAIT)
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Name shown in the picker, starred when prerequisites should be flagged
    pub fn display_name(&self, show_prerequisites: bool) -> String {
        if show_prerequisites && self.has_prerequisites() {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }
}
