//! Level-up form state and the plan applied to the character
//!
//! The wizard offers a set of feat slots and, at some levels, a skill
//! increase. Every offered field must be filled before a plan can be built.

use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::mpsc::UnboundedSender;

use crate::core::error::{Result, WizardError};
use crate::core::types::{FeatCategory, Level};
use crate::feats::record::FeatRecord;
use crate::feats::skills::Skill;
use crate::host::HostBridge;
use crate::selector::{FeatSelected, FeatSelector};
use crate::wizard::proficiency::ProficiencyRank;

/// Field name used for the skill increase in `missing_fields`
pub const SKILL_INCREASE_FIELD: &str = "skills";

/// What the new level offers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardSlots {
    pub feat_categories: Vec<FeatCategory>,
    pub skill_increase: bool,
}

impl WizardSlots {
    pub fn new(feat_categories: Vec<FeatCategory>, skill_increase: bool) -> Self {
        Self {
            feat_categories,
            skill_increase,
        }
    }

    pub fn offers(&self, category: FeatCategory) -> bool {
        self.feat_categories.contains(&category)
    }
}

/// A feat to embed on the character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatGrant {
    pub feat: FeatRecord,
    pub category: FeatCategory,
    /// Slot the feat occupies, `<group>-<level>`
    pub location: String,
    pub taken_at: Level,
}

impl FeatGrant {
    pub fn new(feat: FeatRecord, category: FeatCategory, level: Level) -> Self {
        Self {
            location: format!("{}-{}", category.group(), level),
            feat,
            category,
            taken_at: level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillIncrease {
    pub skill: Skill,
    pub from: ProficiencyRank,
    pub to: ProficiencyRank,
}

impl SkillIncrease {
    pub fn new(skill: Skill, current: ProficiencyRank) -> Self {
        Self {
            skill,
            from: current,
            to: current.increased(),
        }
    }

    pub fn summary(&self) -> String {
        format!("{} skill rank increased to {}.", self.skill.label(), self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUpPlan {
    pub actor_name: String,
    pub new_level: Level,
    pub grants: Vec<FeatGrant>,
    /// Skill to raise one rank; the current rank is read when applying
    pub skill_increase: Option<Skill>,
}

impl LevelUpPlan {
    /// Apply the plan through the host
    ///
    /// Each granted feat is re-resolved from the host first; feats the host no
    /// longer knows are logged and skipped. The skill increase starts from the
    /// rank the host reports at this point. Returns the grants actually created.
    pub fn apply<H: HostBridge + ?Sized>(&self, host: &mut H) -> Result<Vec<FeatGrant>> {
        tracing::info!("Updating {} to level {}...", self.actor_name, self.new_level);
        host.set_character_level(&self.actor_name, self.new_level)?;

        let mut created = Vec::with_capacity(self.grants.len());
        for grant in &self.grants {
            match host.resolve_full_record(&grant.feat.id) {
                Ok(Some(feat)) => created.push(FeatGrant::new(feat, grant.category, self.new_level)),
                Ok(None) => tracing::warn!("Skipping {}: not found on host", grant.feat.id),
                Err(e) => tracing::warn!("Skipping {}: {}", grant.feat.id, e),
            }
        }
        if !created.is_empty() {
            host.create_embedded_items(&self.actor_name, &created)?;
        }

        if let Some(skill) = self.skill_increase {
            let current = host.skill_rank(&self.actor_name, skill)?;
            let increase = SkillIncrease::new(skill, current);
            host.set_skill_rank(&self.actor_name, skill, increase.to)?;
            tracing::info!("{}", increase.summary());
        }

        tracing::info!("{} Level up complete!", self.actor_name);
        Ok(created)
    }
}

#[derive(Debug, Clone)]
pub struct LevelUpWizard {
    actor_name: String,
    current_level: Level,
    slots: WizardSlots,
    selections: BTreeMap<FeatCategory, FeatRecord>,
    skill_increase: Option<Skill>,
}

impl LevelUpWizard {
    pub fn new(actor_name: impl Into<String>, current_level: Level, slots: WizardSlots) -> Self {
        Self {
            actor_name: actor_name.into(),
            current_level,
            slots,
            selections: BTreeMap::new(),
            skill_increase: None,
        }
    }

    pub fn actor_name(&self) -> &str {
        &self.actor_name
    }

    pub fn new_level(&self) -> Level {
        self.current_level + 1
    }

    pub fn slots(&self) -> &WizardSlots {
        &self.slots
    }

    /// Open a selector for one of the offered slots at the new level
    pub fn open_selector<H: HostBridge + ?Sized>(
        &self,
        host: &H,
        category: FeatCategory,
        events: UnboundedSender<FeatSelected>,
    ) -> Result<FeatSelector> {
        if !self.slots.offers(category) {
            return Err(WizardError::NotOffered(category.key().to_string()));
        }
        FeatSelector::open(host, &self.actor_name, category, self.new_level(), events)
    }

    pub fn record_selection(&mut self, event: FeatSelected) -> Result<()> {
        if !self.slots.offers(event.category) {
            return Err(WizardError::NotOffered(event.category.key().to_string()));
        }
        tracing::debug!("{} slot filled with {}", event.category, event.feat.name);
        self.selections.insert(event.category, event.feat);
        Ok(())
    }

    pub fn selection(&self, category: FeatCategory) -> Option<&FeatRecord> {
        self.selections.get(&category)
    }

    pub fn clear_selection(&mut self, category: FeatCategory) -> Option<FeatRecord> {
        self.selections.remove(&category)
    }

    pub fn set_skill_increase(&mut self, skill: Skill) -> Result<()> {
        if !self.slots.skill_increase {
            return Err(WizardError::NotOffered(SKILL_INCREASE_FIELD.to_string()));
        }
        self.skill_increase = Some(skill);
        Ok(())
    }

    pub fn skill_increase(&self) -> Option<Skill> {
        self.skill_increase
    }

    pub fn clear_skill_increase(&mut self) {
        self.skill_increase = None;
    }

    /// Offered fields still empty, in slot order
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .slots
            .feat_categories
            .iter()
            .filter(|category| !self.selections.contains_key(*category))
            .map(|category| category.key().to_string())
            .collect();
        if self.slots.skill_increase && self.skill_increase.is_none() {
            missing.push(SKILL_INCREASE_FIELD.to_string());
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn plan(&self) -> Result<LevelUpPlan> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(WizardError::IncompleteWizard(missing));
        }

        let new_level = self.new_level();
        let grants = self
            .slots
            .feat_categories
            .iter()
            .filter_map(|category| {
                self.selections
                    .get(category)
                    .map(|feat| FeatGrant::new(feat.clone(), *category, new_level))
            })
            .collect();

        Ok(LevelUpPlan {
            actor_name: self.actor_name.clone(),
            new_level,
            grants,
            skill_increase: self.skill_increase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(category: FeatCategory, id: &str, name: &str) -> FeatSelected {
        FeatSelected {
            category,
            feat: FeatRecord::new(id, name, 1),
        }
    }

    fn wizard() -> LevelUpWizard {
        LevelUpWizard::new(
            "Ezren",
            1,
            WizardSlots::new(vec![FeatCategory::Class, FeatCategory::Skill], true),
        )
    }

    #[test]
    fn test_missing_fields_in_slot_order() {
        let mut wizard = wizard();
        assert_eq!(wizard.missing_fields(), vec!["class", "skill", "skills"]);
        wizard
            .record_selection(selected(FeatCategory::Skill, "s", "Trick Magic Item"))
            .unwrap();
        assert_eq!(wizard.missing_fields(), vec!["class", "skills"]);
        assert!(!wizard.is_complete());
    }

    #[test]
    fn test_plan_requires_all_fields() {
        let wizard = wizard();
        match wizard.plan() {
            Err(WizardError::IncompleteWizard(missing)) => assert_eq!(missing.len(), 3),
            other => panic!("expected incomplete wizard, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_locations_and_skill_increase() {
        let mut wizard = wizard();
        wizard
            .record_selection(selected(FeatCategory::Class, "c", "Reach Spell"))
            .unwrap();
        wizard
            .record_selection(selected(FeatCategory::Skill, "s", "Trick Magic Item"))
            .unwrap();
        wizard.set_skill_increase(Skill::Arcana).unwrap();

        let plan = wizard.plan().unwrap();
        assert_eq!(plan.new_level, 2);
        let locations: Vec<_> = plan.grants.iter().map(|g| g.location.as_str()).collect();
        assert_eq!(locations, vec!["class-2", "skill-2"]);
        assert!(plan.grants.iter().all(|g| g.taken_at == 2));
        assert_eq!(plan.skill_increase, Some(Skill::Arcana));
    }

    #[test]
    fn test_skill_increase_summary() {
        let increase = SkillIncrease::new(Skill::Arcana, ProficiencyRank::TRAINED);
        assert_eq!(increase.to, ProficiencyRank::EXPERT);
        assert_eq!(increase.summary(), "Arcana skill rank increased to Expert.");
    }

    #[test]
    fn test_reselecting_replaces_previous_choice() {
        let mut wizard = wizard();
        wizard
            .record_selection(selected(FeatCategory::Class, "c1", "Reach Spell"))
            .unwrap();
        wizard
            .record_selection(selected(FeatCategory::Class, "c2", "Widen Spell"))
            .unwrap();
        assert_eq!(wizard.selection(FeatCategory::Class).unwrap().name, "Widen Spell");
    }

    #[test]
    fn test_slot_not_offered() {
        let mut wizard = LevelUpWizard::new("Ezren", 2, WizardSlots::new(vec![FeatCategory::General], false));
        assert!(matches!(
            wizard.record_selection(selected(FeatCategory::Ancestry, "a", "Adopted Ancestry")),
            Err(WizardError::NotOffered(_))
        ));
        assert!(matches!(
            wizard.set_skill_increase(Skill::Society),
            Err(WizardError::NotOffered(_))
        ));
    }

    #[test]
    fn test_ancestry_paragon_uses_ancestry_location() {
        let grant = FeatGrant::new(FeatRecord::new("p", "Natural Ambition", 1), FeatCategory::AncestryParagon, 3);
        assert_eq!(grant.location, "ancestry-3");
    }
}
