//! flow-core: coordinador de flujos multi-paso (wizards)
//!
//! Decide qué step sigue a partir del resultado de un step, mantiene el
//! historial de la traversal y valida la posición actual cuando el usuario
//! reentra al flujo en un step arbitrario (back, enlaces guardados).
pub mod constants;
pub mod context;
pub mod coordinator;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod navigation;
pub mod scenario;
pub mod step;
pub mod storage;

#[cfg(test)]
mod testing;

pub use context::ProcessContext;
pub use coordinator::{Coordinator, FlowAction, FlowSession};
pub use errors::CoreFlowError;
pub use model::{FlowRequest, FlowSnapshot, Output, SessionKey};
pub use navigation::{PathRouter, RouteGenerator, RouteParams};
pub use scenario::{Process, Scenario, ScenarioBuilder, ScenarioRegistry};
pub use step::{ActionResult, StepDefinition, StepResult};
pub use storage::{ContextStorage, InMemoryContextStorage};
