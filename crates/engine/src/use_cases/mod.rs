//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area. Use cases load
//! aggregates through the repository ports, apply domain operations and
//! persist the results.

pub mod computers;
pub mod hacks;
pub mod players;
pub mod progression;
pub mod users;

pub use computers::ComputerUseCases;
pub use hacks::HackUseCases;
pub use players::PlayerUseCases;
pub use users::UserUseCases;
