//! Hack operation use cases.
//!
//! Lifecycle: `InitiateHack` creates a pending hack, the attacker starts or
//! aborts it, and `ResolveDueHacks` settles running hacks once their
//! completion time passes.

mod error;
mod initiate_hack;
mod lifecycle;
pub mod policy;
mod resolve_due_hacks;

use std::sync::Arc;

pub use error::HackError;
pub use initiate_hack::InitiateHack;
pub use lifecycle::{AbortHack, StartHack};
pub use resolve_due_hacks::{ResolutionSummary, ResolveDueHacks};

/// Container for hack use cases.
pub struct HackUseCases {
    pub initiate: Arc<InitiateHack>,
    pub start: Arc<StartHack>,
    pub abort: Arc<AbortHack>,
    pub resolve_due: Arc<ResolveDueHacks>,
}
