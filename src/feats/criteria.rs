//! Filter and sort criteria for one selection session

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::core::error::WizardError;
use crate::core::types::Level;
use crate::feats::skills::Skill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "alpha")]
    ByName,
    #[serde(rename = "level")]
    ByLevel,
}

impl SortKey {
    pub fn key(&self) -> &'static str {
        match self {
            SortKey::ByName => "alpha",
            SortKey::ByLevel => "level",
        }
    }
}

impl FromStr for SortKey {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alpha" | "name" => Ok(SortKey::ByName),
            "level" => Ok(SortKey::ByLevel),
            _ => Err(WizardError::InvalidSortMethod(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn key(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn reversed(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(WizardError::InvalidSortMethod(s.to_string())),
        }
    }
}

/// A composite ordering, written `<METHOD>_<ORDER>` in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortMethod {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortMethod {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Icon lookup key used by the picker's order button, e.g. `level-desc`
    pub fn icon_key(&self) -> String {
        format!("{}-{}", self.key.key(), self.direction.key())
    }
}

impl Default for SortMethod {
    fn default() -> Self {
        Self::new(SortKey::ByLevel, SortDirection::Descending)
    }
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}",
            self.key.key().to_uppercase(),
            self.direction.key().to_uppercase()
        )
    }
}

impl FromStr for SortMethod {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let (key, direction) = lowered
            .split_once(|c: char| c == '_' || c == '-')
            .ok_or_else(|| WizardError::InvalidSortMethod(s.to_string()))?;
        let key = key
            .parse()
            .map_err(|_| WizardError::InvalidSortMethod(s.to_string()))?;
        let direction = direction
            .parse()
            .map_err(|_| WizardError::InvalidSortMethod(s.to_string()))?;
        Ok(Self::new(key, direction))
    }
}

/// A level bound as typed into a level box; may be negative
pub type LevelBound = i64;

/// Normalize raw level text from an input box
///
/// Reads an optional sign and leading digits after whitespace, ignoring any
/// trailing text. Unparsable text and zero mean "unbounded". Negative numbers
/// are kept: as a minimum they admit every feat, as a maximum none.
pub fn normalize_level_input(raw: &str) -> Option<LevelBound> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }
    let magnitude = match digits.parse::<LevelBound>() {
        Ok(0) => return None,
        Ok(level) => level,
        // Too long for an i64: still a number, so clamp rather than drop
        Err(_) => LevelBound::MAX,
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// The active filter and sort parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub min_level: Option<LevelBound>,
    pub max_level: Option<LevelBound>,
    /// Stored lowercased
    pub search: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub skills: BTreeSet<Skill>,
    pub include_archetype_feats: bool,
    /// Stored lowercased
    pub dedication_search: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::with_sort(SortMethod::default())
    }
}

impl FilterCriteria {
    /// Fresh criteria for a new session, ordered by the preferred method
    pub fn with_sort(method: SortMethod) -> Self {
        Self {
            min_level: None,
            max_level: None,
            search: String::new(),
            sort_key: method.key,
            sort_direction: method.direction,
            skills: BTreeSet::new(),
            include_archetype_feats: false,
            dedication_search: String::new(),
        }
    }

    pub fn sort_method(&self) -> SortMethod {
        SortMethod::new(self.sort_key, self.sort_direction)
    }

    pub fn set_min_level(&mut self, level: Option<Level>) {
        self.min_level = level.map(LevelBound::from);
    }

    pub fn set_max_level(&mut self, level: Option<Level>) {
        self.max_level = level.map(LevelBound::from);
    }

    /// Whether a feat of this level lies within both bounds
    pub fn level_in_range(&self, level: Level) -> bool {
        let level = LevelBound::from(level);
        self.min_level.map_or(true, |min| level >= min)
            && self.max_level.map_or(true, |max| level <= max)
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_lowercase();
    }

    /// Check or uncheck a skill in the skill filter
    pub fn set_skill(&mut self, skill: Skill, checked: bool) {
        if checked {
            self.skills.insert(skill);
        } else {
            self.skills.remove(&skill);
        }
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
    }

    /// Flip between ascending and descending, as the order button does
    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.reversed();
    }

    pub fn set_include_archetype_feats(&mut self, include: bool) {
        self.include_archetype_feats = include;
    }

    pub fn set_dedication_search(&mut self, text: &str) {
        self.dedication_search = text.to_lowercase();
    }

    /// Apply a single UI change
    pub fn apply(&mut self, change: CriteriaChange) {
        match change {
            CriteriaChange::MinLevel(level) => self.set_min_level(level),
            CriteriaChange::MaxLevel(level) => self.set_max_level(level),
            CriteriaChange::MinLevelInput(raw) => self.min_level = normalize_level_input(&raw),
            CriteriaChange::MaxLevelInput(raw) => self.max_level = normalize_level_input(&raw),
            CriteriaChange::Search(text) => self.set_search(&text),
            CriteriaChange::Skill { skill, checked } => self.set_skill(skill, checked),
            CriteriaChange::SortKey(key) => self.set_sort_key(key),
            CriteriaChange::SortDirection(direction) => self.set_sort_direction(direction),
            CriteriaChange::ToggleSortDirection => self.toggle_sort_direction(),
            CriteriaChange::IncludeArchetypeFeats(include) => {
                self.set_include_archetype_feats(include)
            }
            CriteriaChange::DedicationSearch(text) => self.set_dedication_search(&text),
        }
    }
}

/// One discrete edit coming from the picker's controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum CriteriaChange {
    MinLevel(Option<Level>),
    MaxLevel(Option<Level>),
    /// Raw text from the min level box
    MinLevelInput(String),
    /// Raw text from the max level box
    MaxLevelInput(String),
    Search(String),
    Skill { skill: Skill, checked: bool },
    SortKey(SortKey),
    SortDirection(SortDirection),
    ToggleSortDirection,
    IncludeArchetypeFeats(bool),
    DedicationSearch(String),
}
