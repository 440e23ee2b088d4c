//! Contexto vivo de una traversal.
//!
//! Se crea por petición. El colaborador de storage lo hidrata antes de
//! coordinar (`hydrate`) y persiste su `snapshot` al final; sólo nombres de
//! steps y datos sobreviven entre peticiones.
use chrono::Utc;
use log::debug;
use serde_json::{Map, Value};

use crate::errors::CoreFlowError;
use crate::model::{FlowRequest, FlowSnapshot};
use crate::scenario::{Process, Scenario};
use crate::step::StepDefinition;

#[derive(Debug, Default)]
pub struct ProcessContext {
    process: Option<Process>,
    current_step: Option<String>,
    history: Vec<String>,
    next_step_override: Option<String>,
    valid: bool,
    request: FlowRequest,
    data: Map<String, Value>,
}

impl ProcessContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vincula escenario y step actual. No toca el historial; la validez
    /// queda pendiente de `rewind_history`.
    pub fn initialize(&mut self, process: Process, current_step: &str) {
        self.process = Some(process);
        self.current_step = Some(current_step.to_string());
        self.next_step_override = None;
        self.valid = false;
    }

    /// Comienzo desde cero: descarta la traversal anterior y deja el contexto
    /// inicializado y válido en `first_step`.
    pub fn restart(&mut self, process: Process, first_step: &str) {
        self.close();
        self.initialize(process, first_step);
        self.valid = true;
    }

    pub fn process(&self) -> Option<&Process> {
        self.process.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.process.is_some() && self.current_step.is_some()
    }

    fn scenario(&self) -> Result<&Scenario, CoreFlowError> {
        self.process
            .as_ref()
            .map(Process::scenario)
            .ok_or(CoreFlowError::ContextNotInitialized)
    }

    fn current_name(&self) -> Result<&str, CoreFlowError> {
        self.current_step.as_deref().ok_or(CoreFlowError::ContextNotInitialized)
    }

    pub fn current_step_name(&self) -> Option<&str> {
        self.current_step.as_deref()
    }

    pub fn current_step(&self) -> Result<&dyn StepDefinition, CoreFlowError> {
        self.scenario()?.step_by_name(self.current_name()?)
    }

    pub fn previous_step(&self) -> Result<&dyn StepDefinition, CoreFlowError> {
        self.scenario()?.previous_step(self.current_name()?)
    }

    /// Step siguiente: el override si existe, si no el posicional.
    ///
    /// El override se valida aquí (`UnknownStep`), no al fijarlo.
    pub fn next_step(&self) -> Result<&dyn StepDefinition, CoreFlowError> {
        let scenario = self.scenario()?;
        match self.next_step_override.as_deref() {
            Some(name) => scenario.step_by_name(name),
            None => scenario.next_step(self.current_name()?),
        }
    }

    pub fn is_first_step(&self) -> bool {
        self.position().is_some_and(|(index, _)| index == 0)
    }

    pub fn is_last_step(&self) -> bool {
        self.position().is_some_and(|(index, len)| index + 1 == len)
    }

    // (índice del step actual, cantidad de steps)
    fn position(&self) -> Option<(usize, usize)> {
        let scenario = self.scenario().ok()?;
        let index = scenario.step_index(self.current_step.as_deref()?).ok()?;
        Some((index, scenario.len()))
    }

    /// Progreso en porcentaje (0..=100) del step actual; 0 si no hay
    /// contexto inicializado.
    pub fn progress(&self) -> u8 {
        match self.position() {
            Some((index, len)) => ((index + 1) * 100 / len) as u8,
            None => 0,
        }
    }

    /// Sobrescribe el siguiente step por defecto.
    pub fn set_next_step_by_name(&mut self, name: impl Into<String>) {
        self.next_step_override = Some(name.into());
    }

    pub fn next_step_override(&self) -> Option<&str> {
        self.next_step_override.as_deref()
    }

    pub fn step_history(&self) -> &[String] {
        &self.history
    }

    pub fn set_step_history(&mut self, history: Vec<String>) {
        self.history = history;
    }

    /// Agrega siempre, sin deduplicar: cada revisita queda registrada.
    pub fn add_step_to_history(&mut self, name: impl Into<String>) {
        self.history.push(name.into());
    }

    /// Retrocede desde el final del historial descartando nombres hasta
    /// encontrar el step actual, que se conserva.
    ///
    /// Devuelve `false` (y el contexto queda inválido) si el historial se
    /// agota sin encontrarlo: el step no es alcanzable desde la traversal
    /// registrada.
    pub fn rewind_history(&mut self) -> bool {
        let Some(current) = self.current_step.as_deref() else {
            self.valid = false;
            return false;
        };
        match self.history.iter().rposition(|name| name == current) {
            Some(index) => {
                if index + 1 < self.history.len() {
                    debug!("rewinding history to '{}' (dropping {} entries)",
                           current,
                           self.history.len() - index - 1);
                }
                self.history.truncate(index + 1);
                self.valid = true;
            }
            None => {
                self.history.clear();
                self.valid = false;
            }
        }
        self.valid
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Cierra la traversal: limpia historial y datos y desvincula escenario,
    /// step actual y override.
    pub fn close(&mut self) {
        self.process = None;
        self.current_step = None;
        self.next_step_override = None;
        self.history.clear();
        self.data.clear();
        self.valid = false;
    }

    pub fn request(&self) -> &FlowRequest {
        &self.request
    }

    pub fn set_request(&mut self, request: FlowRequest) {
        self.request = request;
    }

    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn all_data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Restaura historial y datos persistidos.
    pub fn hydrate(&mut self, snapshot: FlowSnapshot) {
        self.history = snapshot.history;
        self.data = snapshot.data;
    }

    /// Estado a persistir. El step a retomar es el último del historial (el
    /// destino de la última redirección); sin historial, el step actual.
    pub fn snapshot(&self, definition_hash: &str) -> FlowSnapshot {
        let current_step = self.history.last().cloned().or_else(|| self.current_step.clone());
        FlowSnapshot { current_step,
                       history: self.history.clone(),
                       data: self.data.clone(),
                       definition_hash: definition_hash.to_string(),
                       updated_at: Utc::now() }
    }
}
