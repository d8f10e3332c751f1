//! NetWatch Engine library.
//!
//! Server-side application layer for the NetWatch hacking simulation.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the domain aggregates
//! - `infrastructure/` - Ports, adapters, configuration and workers
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;


pub use app::App;
