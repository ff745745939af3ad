//! Integration tests for the feat filter/sort engine

use levelup_wizard::core::types::FeatCategory;
use levelup_wizard::feats::{
    compute_view, FeatRecord, FilterCriteria, Skill, SortDirection, SortKey, SortMethod,
};

fn sample_catalog() -> Vec<FeatRecord> {
    vec![
        FeatRecord::new("f1", "Sudden Charge", 1).with_prerequisite("trained in Athletics"),
        FeatRecord::new("f2", "Power Attack", 1),
        FeatRecord::new("f3", "Fighter Dedication", 2)
            .with_trait("archetype")
            .with_trait("dedication")
            .with_prerequisite("Str 14"),
        FeatRecord::new("f4", "Basic Maneuver", 4)
            .with_trait("archetype")
            .with_prerequisite("Fighter Dedication"),
        FeatRecord::new("f5", "Assurance", 1).with_prerequisite("trained in Athletics"),
        FeatRecord::new("f6", "Intimidating Strike", 2),
    ]
}

fn unconstrained(method: SortMethod) -> FilterCriteria {
    let mut criteria = FilterCriteria::with_sort(method);
    criteria.set_include_archetype_feats(true);
    criteria
}

/// Property 1: no filters means nothing is dropped
#[test]
fn test_unconstrained_view_keeps_everything() {
    let feats = sample_catalog();
    for method in ["ALPHA_ASC", "ALPHA_DESC", "LEVEL_ASC", "LEVEL_DESC"] {
        let criteria = unconstrained(method.parse().unwrap());
        let view = compute_view(&feats, &criteria, FeatCategory::Class);
        assert_eq!(view.len(), feats.len(), "{} dropped records", method);
    }
}

/// Property 2: same input, same output
#[test]
fn test_compute_view_is_idempotent() {
    let feats = sample_catalog();
    let mut criteria = unconstrained(SortMethod::default());
    criteria.set_search("a");
    let first: Vec<_> = compute_view(&feats, &criteria, FeatCategory::Class)
        .iter()
        .map(|f| f.id.clone())
        .collect();
    let second: Vec<_> = compute_view(&feats, &criteria, FeatCategory::Class)
        .iter()
        .map(|f| f.id.clone())
        .collect();
    assert_eq!(first, second);
}

/// Property 3: equal levels keep input order
#[test]
fn test_level_sort_keeps_input_order_for_ties() {
    let feats = sample_catalog();
    let criteria = unconstrained(SortMethod::new(SortKey::ByLevel, SortDirection::Ascending));
    let ids: Vec<_> = compute_view(&feats, &criteria, FeatCategory::Class)
        .iter()
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(ids, vec!["f1", "f2", "f5", "f3", "f6", "f4"]);
}

/// Property 5: dedication search scenario
#[test]
fn test_dedication_search_scenario() {
    let feats = vec![
        FeatRecord::new("d1", "Fighter Dedication Strike", 2).with_prerequisite("Fighter Dedication"),
        FeatRecord::new("d2", "Generic Feat", 1).with_prerequisite("Str 14"),
    ];
    let mut criteria = unconstrained(SortMethod::default());
    criteria.set_dedication_search("fighter");
    let view = compute_view(&feats, &criteria, FeatCategory::Class);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].name, "Fighter Dedication Strike");
}

/// Property 6: archetype gate scenario
#[test]
fn test_archetype_gate_scenario() {
    let feats = vec![FeatRecord::new("a1", "Basic Maneuver", 4).with_trait("archetype")];
    let mut criteria = FilterCriteria::default();
    assert!(compute_view(&feats, &criteria, FeatCategory::Class).is_empty());

    criteria.set_include_archetype_feats(true);
    assert_eq!(compute_view(&feats, &criteria, FeatCategory::Class).len(), 1);

    // Archetype slots never hide archetype feats
    criteria.set_include_archetype_feats(false);
    assert_eq!(compute_view(&feats, &criteria, FeatCategory::FreeArchetype).len(), 1);
}

#[test]
fn test_all_filters_combined() {
    let feats = sample_catalog();
    let mut criteria = FilterCriteria::with_sort("ALPHA_ASC".parse().unwrap());
    criteria.set_min_level(Some(1));
    criteria.set_max_level(Some(1));
    criteria.set_skill(Skill::Athletics, true);
    let names: Vec<_> = compute_view(&feats, &criteria, FeatCategory::Skill)
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["Assurance", "Sudden Charge"]);

    criteria.set_search("charge");
    let names: Vec<_> = compute_view(&feats, &criteria, FeatCategory::Skill)
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["Sudden Charge"]);
}

#[test]
fn test_skill_filter_ignores_unknown_tokens() {
    let feats = vec![
        FeatRecord::new("l1", "Additional Lore", 1).with_prerequisite("trained in Lore"),
        FeatRecord::new("l2", "Quick Repair", 1).with_prerequisite("trained in Crafting"),
    ];
    let mut criteria = FilterCriteria::default();
    criteria.set_skill(Skill::Crafting, true);
    let view = compute_view(&feats, &criteria, FeatCategory::Skill);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id.as_str(), "l2");
}

#[test]
fn test_engine_does_not_mutate_records() {
    let feats = sample_catalog();
    let before = feats.clone();
    let mut criteria = unconstrained(SortMethod::new(SortKey::ByName, SortDirection::Descending));
    criteria.set_search("strike");
    let _ = compute_view(&feats, &criteria, FeatCategory::Class);
    assert_eq!(feats, before);
}
