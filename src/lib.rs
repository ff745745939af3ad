//! Level-Up Wizard - feat selection engine for a tabletop level-up assistant

pub mod core;
pub mod feats;
pub mod host;
pub mod selector;
pub mod wizard;
