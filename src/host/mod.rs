//! Boundary with the virtual tabletop host
//!
//! The host owns characters, documents, settings and rendering. Everything the
//! wizard needs from it goes through `HostBridge`; `MemoryHost` is an
//! in-process implementation backed by a JSON feat catalog.

pub mod memory;

pub use memory::{CharacterSheet, MemoryHost};

use crate::core::error::Result;
use crate::core::types::{FeatCategory, FeatId, Level};
use crate::feats::record::FeatRecord;
use crate::feats::skills::Skill;
use crate::selector::SelectorContext;
use crate::wizard::{FeatGrant, ProficiencyRank};

/// Calls the wizard makes into the host application. All of them may fail.
pub trait HostBridge {
    /// Every feat of `category` a character may take at `target_level`
    fn fetch_candidates(
        &self,
        character: &str,
        category: FeatCategory,
        target_level: Level,
    ) -> Result<Vec<FeatRecord>>;

    /// Full record for an id, independent of any filtered view
    fn resolve_full_record(&self, id: &FeatId) -> Result<Option<FeatRecord>>;

    /// Persisted preference value, if the user has one stored
    fn get_preference(&self, key: &str) -> Result<Option<String>>;

    /// Project a selector context to markup
    fn render_view(&self, context: &SelectorContext) -> Result<String>;

    /// Share a feat with the table
    fn post_feat_to_chat(&mut self, feat: &FeatRecord) -> Result<()>;

    fn set_character_level(&mut self, character: &str, level: Level) -> Result<()>;

    /// Add granted feats to the character as embedded items
    fn create_embedded_items(&mut self, character: &str, items: &[FeatGrant]) -> Result<()>;

    /// Current proficiency rank of a character in a skill
    fn skill_rank(&self, character: &str, skill: Skill) -> Result<ProficiencyRank>;

    fn set_skill_rank(&mut self, character: &str, skill: Skill, rank: ProficiencyRank)
        -> Result<()>;
}
