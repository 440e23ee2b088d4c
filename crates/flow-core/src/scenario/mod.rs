//! Escenarios: lista ordenada de steps con nombre, su builder y el registro
//! por alias.

mod builder;
mod registry;
mod types;

pub use builder::{definition_hash, ScenarioBuilder};
pub use registry::ScenarioRegistry;
pub use types::{Process, Scenario};
