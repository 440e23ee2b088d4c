use serde::{Deserialize, Serialize};

use crate::model::Output;

/// Resultado de completar un step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionResult {
    /// Avance lineal: el coordinador resuelve el siguiente step por posición
    /// (o finaliza el flujo si el step actual es el último).
    Proceed,
    /// Salto explícito al step con ese nombre.
    JumpTo(String),
}

impl ActionResult {
    pub fn jump_to(step_name: impl Into<String>) -> Self {
        Self::JumpTo(step_name.into())
    }
}

/// Lo que devuelve `StepDefinition::forward`.
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// Output directo: se devuelve sin interpretar.
    Output(Output),
    /// Resultado a interpretar por el coordinador.
    Action(ActionResult),
}

impl StepResult {
    pub fn proceed() -> Self {
        Self::Action(ActionResult::Proceed)
    }

    pub fn jump_to(step_name: impl Into<String>) -> Self {
        Self::Action(ActionResult::jump_to(step_name))
    }
}

impl From<Output> for StepResult {
    fn from(value: Output) -> Self {
        Self::Output(value)
    }
}

impl From<ActionResult> for StepResult {
    fn from(value: ActionResult) -> Self {
        Self::Action(value)
    }
}
