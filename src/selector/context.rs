//! Render context handed to the host for one selector frame

use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::types::{FeatCategory, FeatId, Level};
use crate::feats::criteria::FilterCriteria;
use crate::feats::record::FeatRecord;
use crate::feats::skills::Skill;

/// A feat as shown in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatEntry {
    pub id: FeatId,
    pub name: String,
    pub display_name: String,
    pub level: Level,
    pub traits: BTreeSet<String>,
    pub prerequisites: Vec<String>,
}

impl FeatEntry {
    pub fn from_record(record: &FeatRecord, show_prerequisites: bool) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            display_name: record.display_name(show_prerequisites),
            level: record.level,
            traits: record.traits.clone(),
            prerequisites: record.prerequisites.clone(),
        }
    }
}

/// One checkbox of the skill filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillOption {
    pub key: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectorContext {
    pub title: String,
    pub category: FeatCategory,
    pub feats: Vec<FeatEntry>,
    pub filters: FilterCriteria,
    pub skills: Vec<SkillOption>,
    /// Dedication search box is shown for archetype slots or once archetypes are included
    pub show_dedication_search: bool,
    /// `<method>-<order>`, e.g. `level-desc`
    pub sort_icon: String,
}

pub(crate) fn skill_options(criteria: &FilterCriteria) -> Vec<SkillOption> {
    Skill::ALL
        .into_iter()
        .map(|skill| SkillOption {
            key: skill.key(),
            label: skill.label(),
            checked: criteria.skills.contains(&skill),
        })
        .collect()
}
