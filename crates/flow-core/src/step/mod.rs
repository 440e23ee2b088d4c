//! Definiciones relacionadas a Steps.
//!
//! Un Step es una unidad sin estado propio: todo el estado mutable del flujo
//! vive en el `ProcessContext`. Este módulo define:
//! - `StepDefinition`: interfaz {display, forward} usada por el coordinador.
//! - `StepResult` / `ActionResult`: resultado de `forward` como sum type.

pub mod definition;
mod result;

pub use definition::StepDefinition;
pub use result::{ActionResult, StepResult};
