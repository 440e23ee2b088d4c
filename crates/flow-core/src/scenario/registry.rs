//! Registro de escenarios por alias.
//!
//! Se puebla una vez al arrancar la aplicación y se trata como inmutable
//! después (lecturas concurrentes sin sincronización).
use indexmap::IndexMap;
use log::debug;
use std::sync::Arc;

use crate::errors::CoreFlowError;

use super::types::{Process, Scenario};

#[derive(Debug, Default)]
pub struct ScenarioRegistry {
    scenarios: IndexMap<String, Arc<Scenario>>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra `scenario` bajo `alias`. Si el alias ya existe falla y el
    /// registro anterior sigue activo.
    pub fn register(&mut self, alias: impl Into<String>, scenario: Scenario) -> Result<(), CoreFlowError> {
        let alias = alias.into();
        if self.scenarios.contains_key(&alias) {
            return Err(CoreFlowError::DuplicateScenarioAlias(alias));
        }
        debug!("registering scenario '{}' with {} steps", alias, scenario.len());
        self.scenarios.insert(alias, Arc::new(scenario));
        Ok(())
    }

    pub fn get(&self, alias: &str) -> Result<Arc<Scenario>, CoreFlowError> {
        self.scenarios
            .get(alias)
            .cloned()
            .ok_or_else(|| CoreFlowError::UnregisteredScenario(alias.to_string()))
    }

    /// Resuelve el escenario y le adjunta su alias.
    pub fn load(&self, alias: &str) -> Result<Process, CoreFlowError> {
        self.get(alias).map(|scenario| Process::new(alias, scenario))
    }

    /// Aliases en orden de registro.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
