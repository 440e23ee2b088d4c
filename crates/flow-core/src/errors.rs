//! Errores del coordinador de flujos.
//!
//! Todos son terminales para la petición en curso: el core no reintenta. La
//! única condición recuperada localmente (rewind de historial fallido) no
//! aparece aquí porque el `Coordinator` la convierte en una redirección.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreFlowError {
    #[error("process scenario with alias \"{0}\" is not registered")]
    UnregisteredScenario(String),
    #[error("process scenario with alias \"{0}\" is already registered")]
    DuplicateScenarioAlias(String),
    #[error("step \"{0}\" is declared more than once in the scenario")]
    DuplicateStepName(String),
    #[error("step \"{0}\" does not belong to the scenario")]
    UnknownStep(String),
    #[error("scenario has no steps")]
    EmptyScenario,
    #[error("step \"{0}\" has no adjacent step in that direction")]
    NoSuchAdjacentStep(String),
    #[error("current flow position is not valid")]
    FlowPositionInvalid,
    #[error("invalid step result: {0}")]
    InvalidStepResult(String),
    #[error("{0} is not a valid action parameter")]
    InvalidAction(String),
    #[error("process context is not initialized")]
    ContextNotInitialized,
    #[error("route \"{0}\" is not defined")]
    UnknownRoute(String),
    #[error("route \"{route}\" requires parameter \"{param}\"")]
    MissingRouteParameter { route: String, param: String },
    #[error("storage: {0}")]
    Storage(String),
}

impl CoreFlowError {
    /// Errores que la capa de transporte debe presentar como "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownStep(_) | Self::FlowPositionInvalid)
    }

    /// Fallos de configuración/integración (no recuperables por el usuario).
    pub fn is_configuration_fault(&self) -> bool {
        matches!(self,
                 Self::UnregisteredScenario(_)
                 | Self::DuplicateScenarioAlias(_)
                 | Self::DuplicateStepName(_)
                 | Self::EmptyScenario
                 | Self::InvalidStepResult(_)
                 | Self::UnknownRoute(_)
                 | Self::MissingRouteParameter { .. })
    }
}
