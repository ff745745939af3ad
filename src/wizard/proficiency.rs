//! Skill proficiency ranks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Proficiency rank as stored on the character (0 = untrained)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProficiencyRank(pub u8);

impl ProficiencyRank {
    pub const UNTRAINED: ProficiencyRank = ProficiencyRank(0);
    pub const TRAINED: ProficiencyRank = ProficiencyRank(1);
    pub const EXPERT: ProficiencyRank = ProficiencyRank(2);
    pub const MASTER: ProficiencyRank = ProficiencyRank(3);
    pub const LEGENDARY: ProficiencyRank = ProficiencyRank(4);

    pub fn name(&self) -> String {
        match self.0 {
            0 => "Untrained".to_string(),
            1 => "Trained".to_string(),
            2 => "Expert".to_string(),
            3 => "Master".to_string(),
            4 => "Legendary".to_string(),
            n => format!("Rank {}", n),
        }
    }

    /// Next rank up
    pub fn increased(&self) -> ProficiencyRank {
        ProficiencyRank(self.0.saturating_add(1))
    }
}

impl fmt::Display for ProficiencyRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
