//! Filter and sort engine
//!
//! Given the fixed candidate list of a session and the current criteria,
//! derives the ordered view shown to the player. Every call recomputes from
//! the full candidate list; nothing is cached between criteria changes.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::core::types::FeatCategory;
use crate::feats::criteria::{FilterCriteria, SortDirection, SortKey};
use crate::feats::record::FeatRecord;
use crate::feats::skills::associated_skills;

/// Literal a prerequisite must contain to count as a dedication
pub const DEDICATION_MARKER: &str = "dedication";

/// Whether archetype feats pass the archetype gate for this session
pub fn includes_archetype_feats(criteria: &FilterCriteria, category: FeatCategory) -> bool {
    category.is_archetype_only() || criteria.include_archetype_feats
}

/// Check one record against every filter predicate
pub fn matches(record: &FeatRecord, criteria: &FilterCriteria, include_archetypes: bool) -> bool {
    criteria.level_in_range(record.level)
        && matches_search(record, &criteria.search)
        && matches_skills(record, criteria)
        && (include_archetypes || !record.is_archetype())
        && matches_dedication(record, &criteria.dedication_search)
}

fn matches_search(record: &FeatRecord, search: &str) -> bool {
    search.is_empty() || record.name.to_lowercase().contains(&search.to_lowercase())
}

fn matches_skills(record: &FeatRecord, criteria: &FilterCriteria) -> bool {
    if criteria.skills.is_empty() {
        return true;
    }
    associated_skills(&record.prerequisites)
        .iter()
        .any(|skill| criteria.skills.contains(skill))
}

fn matches_dedication(record: &FeatRecord, dedication_search: &str) -> bool {
    if dedication_search.is_empty() {
        return true;
    }
    let wanted = dedication_search.to_lowercase();
    record.prerequisites.iter().any(|prerequisite| {
        let prerequisite = prerequisite.to_lowercase();
        prerequisite.contains(&wanted) && prerequisite.contains(DEDICATION_MARKER)
    })
}

/// Decomposed and case-folded; with `strip_marks` accents are dropped too
fn collation_form(name: &str, strip_marks: bool) -> String {
    name.nfd()
        .filter(|c| !(strip_marks && is_combining_mark(*c)))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Name ordering after a root-locale collation: base letters decide first,
/// then accents (plain before accented), then case (lowercase first)
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_form(a, true)
        .cmp(&collation_form(b, true))
        .then_with(|| collation_form(a, false).cmp(&collation_form(b, false)))
        .then_with(|| b.cmp(a))
}

/// Compare two records under a sort key and direction
pub fn compare_records(
    a: &FeatRecord,
    b: &FeatRecord,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    let ordering = match key {
        SortKey::ByName => compare_names(&a.name, &b.name),
        SortKey::ByLevel => a.level.cmp(&b.level),
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Sort a view in place; equal keys keep their current relative order
pub fn sort_view(view: &mut [&FeatRecord], key: SortKey, direction: SortDirection) {
    view.sort_by(|a, b| compare_records(a, b, key, direction));
}

/// Positions in `candidates` of the records that make up the view, in order
pub fn view_indices(
    candidates: &[FeatRecord],
    criteria: &FilterCriteria,
    category: FeatCategory,
) -> Vec<usize> {
    let include_archetypes = includes_archetype_feats(criteria, category);
    let mut indices: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, criteria, include_archetypes))
        .map(|(index, _)| index)
        .collect();
    indices.sort_by(|&a, &b| {
        compare_records(
            &candidates[a],
            &candidates[b],
            criteria.sort_key,
            criteria.sort_direction,
        )
    });
    indices
}

/// Filter then sort the candidates into the ordered view
pub fn compute_view<'a>(
    candidates: &'a [FeatRecord],
    criteria: &FilterCriteria,
    category: FeatCategory,
) -> Vec<&'a FeatRecord> {
    view_indices(candidates, criteria, category)
        .into_iter()
        .map(|index| &candidates[index])
        .collect()
}
