//! Errores de la aplicación (CLI) y su código de salida.

use flow_core::CoreFlowError;
use flow_persistence::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de flujo: {0}")]
    Flow(#[from] CoreFlowError),
    #[error("Error de persistencia: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Parámetro inválido: {0} (se espera clave=valor)")]
    InvalidParam(String),
    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// 4 = no encontrado, 2 = configuración, 1 = resto.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Flow(e) if e.is_not_found() => 4,
            Self::Flow(e) if e.is_configuration_fault() => 2,
            Self::Persistence(_) | Self::InvalidParam(_) => 2,
            _ => 1,
        }
    }
}
