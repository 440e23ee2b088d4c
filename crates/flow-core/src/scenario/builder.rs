//! Builder para `Scenario`.
//!
//! Acumula los steps en orden y calcula el fingerprint de la definición al
//! construir. Los nombres repetidos se rechazan en `build` y no al añadir,
//! para mantener el encadenamiento fluido.
//!
//! ```ignore
//! let scenario = Scenario::builder()
//!     .step(CartStep)
//!     .step(AddressStep)
//!     .redirect("checkout_thanks")
//!     .build()?;
//! ```

use indexmap::IndexMap;
use serde_json::json;

use crate::constants::SNAPSHOT_VERSION;
use crate::errors::CoreFlowError;
use crate::hashing::hash_value;
use crate::step::StepDefinition;

use super::types::Scenario;

#[derive(Default)]
pub struct ScenarioBuilder {
    steps: Vec<Box<dyn StepDefinition>>,
    display_route: Option<String>,
    redirect: Option<String>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade un step al final del flujo.
    #[inline]
    pub fn step<S>(mut self, step: S) -> Self
        where S: StepDefinition + 'static
    {
        self.steps.push(Box::new(step));
        self
    }

    pub fn display_route(mut self, route: impl Into<String>) -> Self {
        self.display_route = Some(route.into());
        self
    }

    pub fn redirect(mut self, route: impl Into<String>) -> Self {
        self.redirect = Some(route.into());
        self
    }

    /// Construye el `Scenario`. Un escenario sin steps es válido aquí; falla
    /// con `EmptyScenario` al pedir su primer step.
    pub fn build(self) -> Result<Scenario, CoreFlowError> {
        let mut steps: IndexMap<String, Box<dyn StepDefinition>> = IndexMap::with_capacity(self.steps.len());
        for step in self.steps {
            let name = step.name().to_string();
            if steps.contains_key(&name) {
                return Err(CoreFlowError::DuplicateStepName(name));
            }
            steps.insert(name, step);
        }
        let definition_hash = definition_hash(steps.keys().map(String::as_str));
        Ok(Scenario { steps,
                      display_route: self.display_route,
                      redirect: self.redirect,
                      definition_hash })
    }
}

/// Fingerprint de una lista ordenada de nombres de step.
pub fn definition_hash<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    hash_value(&json!({
        "snapshot_version": SNAPSHOT_VERSION,
        "steps": names,
    }))
}
