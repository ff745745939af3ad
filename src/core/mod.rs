pub mod config;
pub mod error;
pub mod types;

pub use config::WizardSettings;
pub use error::{Result, WizardError};
pub use types::{FeatCategory, FeatId, Level};
