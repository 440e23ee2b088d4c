//! Tipos de escenario: definición inmutable (`Scenario`) y su instancia con
//! alias (`Process`).
//!
//! El orden de inserción de los steps es el orden del flujo; los nombres son
//! únicos (garantizado por `ScenarioBuilder`).
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::CoreFlowError;
use crate::step::StepDefinition;

use super::builder::ScenarioBuilder;

/// Definición inmutable de un flujo.
pub struct Scenario {
    pub(crate) steps: IndexMap<String, Box<dyn StepDefinition>>,
    pub(crate) display_route: Option<String>,
    pub(crate) redirect: Option<String>,
    pub(crate) definition_hash: String,
}

impl Scenario {
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first_step(&self) -> Result<&dyn StepDefinition, CoreFlowError> {
        self.step_at(0).ok_or(CoreFlowError::EmptyScenario)
    }

    pub fn last_step(&self) -> Result<&dyn StepDefinition, CoreFlowError> {
        self.steps
            .last()
            .map(|(_, s)| s.as_ref())
            .ok_or(CoreFlowError::EmptyScenario)
    }

    pub fn step_by_name(&self, name: &str) -> Result<&dyn StepDefinition, CoreFlowError> {
        self.steps
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(|| CoreFlowError::UnknownStep(name.to_string()))
    }

    pub fn step_index(&self, name: &str) -> Result<usize, CoreFlowError> {
        self.steps
            .get_index_of(name)
            .ok_or_else(|| CoreFlowError::UnknownStep(name.to_string()))
    }

    pub fn has_step(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    pub fn step_at(&self, index: usize) -> Option<&dyn StepDefinition> {
        self.steps.get_index(index).map(|(_, s)| s.as_ref())
    }

    /// Step siguiente a `name`; `NoSuchAdjacentStep` si `name` es el último.
    pub fn next_step(&self, name: &str) -> Result<&dyn StepDefinition, CoreFlowError> {
        let index = self.step_index(name)?;
        self.step_at(index + 1)
            .ok_or_else(|| CoreFlowError::NoSuchAdjacentStep(name.to_string()))
    }

    /// Step anterior a `name`; `NoSuchAdjacentStep` si `name` es el primero.
    pub fn previous_step(&self, name: &str) -> Result<&dyn StepDefinition, CoreFlowError> {
        let index = self.step_index(name)?;
        index.checked_sub(1)
             .and_then(|i| self.step_at(i))
             .ok_or_else(|| CoreFlowError::NoSuchAdjacentStep(name.to_string()))
    }

    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }

    /// Ruta de display propia del escenario (recibe sólo `stepName`).
    pub fn display_route(&self) -> Option<&str> {
        self.display_route.as_deref()
    }

    /// Ruta a la que se redirige al completar el último step.
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// Fingerprint de la lista ordenada de steps.
    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
         .field("steps", &self.steps.keys().collect::<Vec<_>>())
         .field("display_route", &self.display_route)
         .field("redirect", &self.redirect)
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

/// Escenario con el alias bajo el que fue cargado.
///
/// El alias no es parte de la definición: se adjunta al resolverla.
#[derive(Clone, Debug)]
pub struct Process {
    alias: String,
    scenario: Arc<Scenario>,
}

impl Process {
    pub fn new(alias: impl Into<String>, scenario: Arc<Scenario>) -> Self {
        Self { alias: alias.into(),
               scenario }
    }

    pub fn scenario_alias(&self) -> &str {
        &self.alias
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Handle compartido: permite invocar un step mientras se muta el
    /// contexto que contiene este `Process`.
    pub fn shared_scenario(&self) -> Arc<Scenario> {
        Arc::clone(&self.scenario)
    }
}
