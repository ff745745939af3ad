//! Feat selector sessions
//!
//! Wraps the pure filter engine in a per-dialog state machine and produces the
//! render context the host draws.

pub mod context;
pub mod session;

pub use context::{FeatEntry, SelectorContext, SkillOption};
pub use session::{FeatSelected, FeatSelector, SelectorState};
