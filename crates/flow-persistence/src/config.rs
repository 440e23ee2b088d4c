//! Carga de configuración de storage desde variables de entorno.
//! Usa `STEPFLOW_STORAGE` (`memory` | `file`), `STEPFLOW_STATE_DIR` y
//! `STEPFLOW_ROUTE_PREFIX`.

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::PersistenceError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_STATE_DIR: &str = ".stepflow";
pub const DEFAULT_ROUTE_PREFIX: &str = "/flow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
}

impl FromStr for StorageBackend {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(PersistenceError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub state_dir: PathBuf,
    pub route_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::File,
               state_dir: PathBuf::from(DEFAULT_STATE_DIR),
               route_prefix: DEFAULT_ROUTE_PREFIX.to_string() }
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, PersistenceError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente arbitraria (tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PersistenceError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let backend = match lookup("STEPFLOW_STORAGE") {
            Some(v) => v.parse()?,
            None => defaults.backend,
        };
        let state_dir = lookup("STEPFLOW_STATE_DIR").map(PathBuf::from).unwrap_or(defaults.state_dir);
        let route_prefix = lookup("STEPFLOW_ROUTE_PREFIX").unwrap_or(defaults.route_prefix);
        Ok(Self { backend,
                  state_dir,
                  route_prefix })
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
