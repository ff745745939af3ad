//! In-memory host used by the CLI and tests

use ahash::AHashMap;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::core::error::{Result, WizardError};
use crate::core::types::{FeatCategory, FeatId, Level};
use crate::feats::catalog::FeatCatalog;
use crate::feats::record::FeatRecord;
use crate::feats::skills::Skill;
use crate::host::HostBridge;
use crate::selector::SelectorContext;
use crate::wizard::{FeatGrant, ProficiencyRank};

/// What the host stores about one character
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSheet {
    pub level: Level,
    pub skills: BTreeMap<Skill, ProficiencyRank>,
    pub items: Vec<FeatGrant>,
}

impl CharacterSheet {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    pub fn with_skill(mut self, skill: Skill, rank: ProficiencyRank) -> Self {
        self.skills.insert(skill, rank);
        self
    }

    pub fn skill_rank(&self, skill: Skill) -> ProficiencyRank {
        self.skills.get(&skill).copied().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    catalog: FeatCatalog,
    preferences: AHashMap<String, String>,
    characters: AHashMap<String, CharacterSheet>,
    /// Feats posted to chat, oldest first
    pub chat_log: Vec<FeatId>,
}

impl MemoryHost {
    pub fn new(catalog: FeatCatalog) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    pub fn with_preference(mut self, key: &str, value: &str) -> Self {
        self.preferences.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_character(mut self, name: &str, sheet: CharacterSheet) -> Self {
        self.characters.insert(name.to_string(), sheet);
        self
    }

    pub fn set_preference(&mut self, key: &str, value: &str) {
        self.preferences.insert(key.to_string(), value.to_string());
    }

    pub fn catalog(&self) -> &FeatCatalog {
        &self.catalog
    }

    pub fn character(&self, name: &str) -> Option<&CharacterSheet> {
        self.characters.get(name)
    }

    fn character_mut(&mut self, name: &str) -> Result<&mut CharacterSheet> {
        self.characters
            .get_mut(name)
            .ok_or_else(|| WizardError::HostError(format!("Unknown character: {}", name)))
    }
}

impl HostBridge for MemoryHost {
    fn fetch_candidates(
        &self,
        character: &str,
        category: FeatCategory,
        target_level: Level,
    ) -> Result<Vec<FeatRecord>> {
        let candidates = self.catalog.candidates(category, target_level);
        tracing::debug!(
            "Fetched {} {} candidates for {} at level {}",
            candidates.len(),
            category,
            character,
            target_level
        );
        Ok(candidates)
    }

    fn resolve_full_record(&self, id: &FeatId) -> Result<Option<FeatRecord>> {
        Ok(self.catalog.get(id).cloned())
    }

    fn get_preference(&self, key: &str) -> Result<Option<String>> {
        Ok(self.preferences.get(key).cloned())
    }

    /// Plain text rendering: a header line then one line per feat
    fn render_view(&self, context: &SelectorContext) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "{}", context.title);
        if context.feats.is_empty() {
            let _ = writeln!(out, "  (no feats match the current filters)");
        }
        for entry in &context.feats {
            let _ = writeln!(out, "  [{:>2}] {}  ({})", entry.level, entry.display_name, entry.id);
        }
        Ok(out)
    }

    fn post_feat_to_chat(&mut self, feat: &FeatRecord) -> Result<()> {
        tracing::info!("Posting {} to chat", feat.name);
        self.chat_log.push(feat.id.clone());
        Ok(())
    }

    fn set_character_level(&mut self, character: &str, level: Level) -> Result<()> {
        self.character_mut(character)?.level = level;
        Ok(())
    }

    fn create_embedded_items(&mut self, character: &str, items: &[FeatGrant]) -> Result<()> {
        self.character_mut(character)?
            .items
            .extend(items.iter().cloned());
        Ok(())
    }

    fn skill_rank(&self, character: &str, skill: Skill) -> Result<ProficiencyRank> {
        self.character(character)
            .map(|sheet| sheet.skill_rank(skill))
            .ok_or_else(|| WizardError::HostError(format!("Unknown character: {}", character)))
    }

    fn set_skill_rank(
        &mut self,
        character: &str,
        skill: Skill,
        rank: ProficiencyRank,
    ) -> Result<()> {
        self.character_mut(character)?.skills.insert(skill, rank);
        Ok(())
    }
}
