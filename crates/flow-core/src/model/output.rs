//! Output opaco de un step.
//!
//! El coordinador sólo construye `Redirect`; `View` y `Response` los produce
//! el step y se devuelven sin modificar. El `payload` es JSON genérico; el core
//! no interpreta su semántica.
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Output {
    /// Dirección navegable a la que el usuario debe ir a continuación.
    Redirect { url: String },
    /// Vista a renderizar por la capa de presentación.
    View { template: String, payload: Value },
    /// Respuesta ya construida (status + cuerpo).
    Response { status: u16, body: Value },
}

impl Output {
    pub fn redirect(url: impl Into<String>) -> Self {
        Self::Redirect { url: url.into() }
    }

    pub fn view(template: impl Into<String>, payload: Value) -> Self {
        Self::View { template: template.into(),
                     payload }
    }

    pub fn response(status: u16, body: Value) -> Self {
        Self::Response { status, body }
    }

    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect { url } => Some(url),
            _ => None,
        }
    }
}
