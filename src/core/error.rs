use thiserror::Error;

use crate::core::types::{FeatCategory, FeatId};

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Feat not found: {0}")]
    FeatNotFound(FeatId),

    #[error("Feat selector for {0:?} is already closed")]
    SessionClosed(FeatCategory),

    #[error("Unknown feat category: {0}")]
    UnknownCategory(String),

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Invalid sort method: {0}")]
    InvalidSortMethod(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Not offered at this level: {0}")]
    NotOffered(String),

    #[error("Level-up is incomplete, missing: {}", .0.join(", "))]
    IncompleteWizard(Vec<String>),

    #[error("Host error: {0}")]
    HostError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Settings parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WizardError>;
