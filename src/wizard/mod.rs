//! Level-up wizard: collects slot choices and builds the level-up plan

pub mod plan;
pub mod proficiency;

pub use plan::{FeatGrant, LevelUpPlan, LevelUpWizard, SkillIncrease, WizardSlots};
pub use proficiency::ProficiencyRank;
