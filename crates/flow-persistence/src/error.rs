//! Errores de persistencia.
//! Mapea errores de IO / serde a variantes semánticas y éstas a
//! `CoreFlowError::Storage` en la frontera con el core.

use flow_core::CoreFlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("json error at {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid storage key component: {0:?}")]
    InvalidKey(String),
    #[error("unknown storage backend: {0}")]
    UnknownBackend(String),
}

impl PersistenceError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(),
                   source }
    }

    pub(crate) fn json(path: &std::path::Path, source: serde_json::Error) -> Self {
        Self::Json { path: path.display().to_string(),
                     source }
    }
}

impl From<PersistenceError> for CoreFlowError {
    fn from(err: PersistenceError) -> Self {
        CoreFlowError::Storage(err.to_string())
    }
}
