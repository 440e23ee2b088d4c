//! Estado persistible de un `ProcessContext` entre peticiones.
//!
//! Sólo sobreviven nombres (step actual + historial) y los datos de steps;
//! los objetos `Scenario`/`StepDefinition` se resuelven de nuevo en cada
//! petición. `definition_hash` permite descartar snapshots que referencian
//! una lista de steps distinta a la registrada actualmente.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub current_step: Option<String>,
    pub history: Vec<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
    pub definition_hash: String,
    pub updated_at: DateTime<Utc>, // metadato (no participa en validación)
}

/// Clave de almacenamiento: una traversal por (sesión, escenario).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionKey {
    pub session_id: String,
    pub scenario_alias: String,
}

impl SessionKey {
    pub fn new(session_id: impl Into<String>, scenario_alias: impl Into<String>) -> Self {
        Self { session_id: session_id.into(),
               scenario_alias: scenario_alias.into() }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.session_id, self.scenario_alias)
    }
}
