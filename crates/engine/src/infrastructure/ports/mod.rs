//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Persistence (in-memory today, a database later)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{
    ComputerRepo, DefenseRepo, HackOperationRepo, PlayerRepo, ProgressionUnlockRepo, UserRepo,
};
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use repos::{
    MockComputerRepo, MockDefenseRepo, MockHackOperationRepo, MockPlayerRepo,
    MockProgressionUnlockRepo, MockUserRepo,
};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};
