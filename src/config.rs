//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone `AppConfig` con la sección de
//! storage y la sesión por defecto del CLI.
use flow_persistence::{init_dotenv, StorageConfig};
use std::env;

use crate::errors::AppError;

pub const DEFAULT_SESSION: &str = "default";

/// Configuración de la aplicación (extensible para más secciones).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend, directorio de estado y prefijo de rutas.
    pub storage: StorageConfig,
    /// Sesión usada cuando el CLI no recibe `--session`.
    pub session: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        init_dotenv();
        let storage = StorageConfig::from_env()?;
        let session = env::var("STEPFLOW_SESSION").ok()
                                                  .filter(|s| !s.is_empty())
                                                  .unwrap_or_else(|| DEFAULT_SESSION.to_string());
        Ok(Self { storage, session })
    }
}
