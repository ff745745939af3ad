//! Feat catalog filtering and sorting
//!
//! The engine is pure: records and criteria go in, an ordered view comes out.
//! It knows nothing about sessions, hosts or rendering.

pub mod catalog;
pub mod criteria;
pub mod filter;
pub mod record;
pub mod skills;

pub use catalog::{CatalogEntry, FeatCatalog};
pub use criteria::{
    normalize_level_input, CriteriaChange, FilterCriteria, LevelBound, SortDirection, SortKey,
    SortMethod,
};
pub use filter::{compute_view, includes_archetype_feats, matches, sort_view, view_indices};
pub use record::{FeatRecord, ARCHETYPE_TRAIT};
pub use skills::{associated_skills, skill_in_prerequisite, Skill};
