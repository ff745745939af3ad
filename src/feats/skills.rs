//! Skill identifiers and prerequisite scanning

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::WizardError;

/// The standard skills a feat prerequisite can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Acrobatics,
    Arcana,
    Athletics,
    Crafting,
    Deception,
    Diplomacy,
    Intimidation,
    Medicine,
    Nature,
    Occultism,
    Performance,
    Religion,
    Society,
    Stealth,
    Survival,
    Thievery,
}

impl Skill {
    pub const ALL: [Skill; 16] = [
        Skill::Acrobatics,
        Skill::Arcana,
        Skill::Athletics,
        Skill::Crafting,
        Skill::Deception,
        Skill::Diplomacy,
        Skill::Intimidation,
        Skill::Medicine,
        Skill::Nature,
        Skill::Occultism,
        Skill::Performance,
        Skill::Religion,
        Skill::Society,
        Skill::Stealth,
        Skill::Survival,
        Skill::Thievery,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "acrobatics",
            Skill::Arcana => "arcana",
            Skill::Athletics => "athletics",
            Skill::Crafting => "crafting",
            Skill::Deception => "deception",
            Skill::Diplomacy => "diplomacy",
            Skill::Intimidation => "intimidation",
            Skill::Medicine => "medicine",
            Skill::Nature => "nature",
            Skill::Occultism => "occultism",
            Skill::Performance => "performance",
            Skill::Religion => "religion",
            Skill::Society => "society",
            Skill::Stealth => "stealth",
            Skill::Survival => "survival",
            Skill::Thievery => "thievery",
        }
    }

    /// English label; hosts may localise by key instead
    pub fn label(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobatics",
            Skill::Arcana => "Arcana",
            Skill::Athletics => "Athletics",
            Skill::Crafting => "Crafting",
            Skill::Deception => "Deception",
            Skill::Diplomacy => "Diplomacy",
            Skill::Intimidation => "Intimidation",
            Skill::Medicine => "Medicine",
            Skill::Nature => "Nature",
            Skill::Occultism => "Occultism",
            Skill::Performance => "Performance",
            Skill::Religion => "Religion",
            Skill::Society => "Society",
            Skill::Stealth => "Stealth",
            Skill::Survival => "Survival",
            Skill::Thievery => "Thievery",
        }
    }

    /// Match a single word against the skill keys, ignoring case
    pub fn from_token(token: &str) -> Option<Skill> {
        let token = token.to_lowercase();
        Skill::ALL.into_iter().find(|skill| skill.key() == token)
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Skill {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::from_token(s.trim()).ok_or_else(|| WizardError::UnknownSkill(s.to_string()))
    }
}

/// The skill a single prerequisite names, if any
///
/// Words are split on anything that is not a letter; the first word that is a
/// skill name wins. Unknown words contribute nothing.
pub fn skill_in_prerequisite(prerequisite: &str) -> Option<Skill> {
    prerequisite
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .find_map(Skill::from_token)
}

/// Skills associated with a feat through its prerequisites, in listing order
pub fn associated_skills<S: AsRef<str>>(prerequisites: &[S]) -> Vec<Skill> {
    let mut skills = Vec::new();
    for skill in prerequisites
        .iter()
        .filter_map(|p| skill_in_prerequisite(p.as_ref()))
    {
        if !skills.contains(&skill) {
            skills.push(skill);
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_named_in_prerequisite() {
        assert_eq!(
            skill_in_prerequisite("trained in Athletics"),
            Some(Skill::Athletics)
        );
        assert_eq!(
            skill_in_prerequisite("expert in Crafting"),
            Some(Skill::Crafting)
        );
    }

    #[test]
    fn test_prerequisite_without_skill() {
        assert_eq!(skill_in_prerequisite("Fighter Dedication"), None);
        assert_eq!(skill_in_prerequisite("Str 14"), None);
        assert_eq!(skill_in_prerequisite(""), None);
    }

    #[test]
    fn test_skill_must_be_whole_word() {
        // "Supernatural" contains "nature" but is not the skill
        assert_eq!(skill_in_prerequisite("Supernatural Senses"), None);
    }

    #[test]
    fn test_punctuation_does_not_hide_skill() {
        assert_eq!(
            skill_in_prerequisite("master in Stealth; Sneak Attack"),
            Some(Skill::Stealth)
        );
    }

    #[test]
    fn test_one_skill_per_prerequisite() {
        assert_eq!(
            skill_in_prerequisite("trained in Arcana or Nature"),
            Some(Skill::Arcana)
        );
    }

    #[test]
    fn test_associated_skills_deduplicates_in_order() {
        let prereqs = [
            "trained in Medicine",
            "Wis 14",
            "expert in Diplomacy",
            "trained in Medicine",
        ];
        assert_eq!(
            associated_skills(&prereqs),
            vec![Skill::Medicine, Skill::Diplomacy]
        );
    }

    #[test]
    fn test_parse_skill() {
        assert_eq!("Thievery".parse::<Skill>().unwrap(), Skill::Thievery);
        assert!(matches!(
            "lore".parse::<Skill>(),
            Err(WizardError::UnknownSkill(_))
        ));
    }
}
