//! Progression use cases.

mod error;
mod unlock_progression;

pub use error::ProgressionError;
pub use unlock_progression::{
    unmet_requirement, UnlockProgression, DEFENSE_UNLOCK_MIN_MONEY, TOOL_UNLOCK_MIN_LEVEL,
};
