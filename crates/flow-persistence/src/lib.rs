//! flow-persistence
//!
//! Colaboradores de storage para `flow-core`: snapshots de contexto en
//! archivos JSON (uno por sesión y escenario) y selección del backend desde
//! variables de entorno.
//!
//! Módulos:
//! - `file`: `JsonFileStorage` con escritura atómica (temp + rename).
//! - `config`: carga de configuración desde .env.
//! - `error`: errores de persistencia y su traducción a `CoreFlowError`.

pub mod config;
pub mod error;
pub mod file;

pub use config::{init_dotenv, StorageBackend, StorageConfig};
pub use error::PersistenceError;
pub use file::JsonFileStorage;

use flow_core::{ContextStorage, InMemoryContextStorage};
use log::debug;

/// Construye el storage indicado por `config`.
pub fn open_storage(config: &StorageConfig) -> Result<Box<dyn ContextStorage>, PersistenceError> {
    match config.backend {
        StorageBackend::Memory => {
            debug!("using in-memory context storage");
            Ok(Box::new(InMemoryContextStorage::new()))
        }
        StorageBackend::File => {
            debug!("using file context storage at {}", config.state_dir.display());
            Ok(Box::new(JsonFileStorage::open(&config.state_dir)?))
        }
    }
}
