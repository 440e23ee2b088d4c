//! Sesión: une el coordinador con el colaborador de storage.
//!
//! Cada llamada crea un `ProcessContext` nuevo, lo hidrata desde el storage,
//! ejecuta una acción y persiste el resultado. Si la acción falla no se
//! persiste nada.

use log::{debug, warn};

use crate::context::ProcessContext;
use crate::errors::CoreFlowError;
use crate::model::{FlowRequest, FlowSnapshot, Output, SessionKey};
use crate::navigation::RouteGenerator;
use crate::storage::ContextStorage;

use super::{Coordinator, FlowAction};

pub struct FlowSession<'a, R, S>
    where R: RouteGenerator,
          S: ContextStorage + ?Sized
{
    coordinator: &'a Coordinator<R>,
    storage: &'a S,
    session_id: String,
}

impl<'a, R, S> FlowSession<'a, R, S>
    where R: RouteGenerator,
          S: ContextStorage + ?Sized
{
    pub fn new(coordinator: &'a Coordinator<R>, storage: &'a S, session_id: impl Into<String>) -> Self {
        Self { coordinator,
               storage,
               session_id: session_id.into() }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn key(&self, scenario_alias: &str) -> SessionKey {
        SessionKey::new(self.session_id.clone(), scenario_alias)
    }

    pub fn start(&self, scenario_alias: &str) -> Result<Output, CoreFlowError> {
        self.handle(scenario_alias, None, FlowAction::Start, FlowRequest::new())
    }

    pub fn display(&self, scenario_alias: &str, step_name: &str) -> Result<Output, CoreFlowError> {
        self.handle(scenario_alias, Some(step_name), FlowAction::Display, FlowRequest::new())
    }

    pub fn forward(&self, scenario_alias: &str, step_name: &str, request: FlowRequest) -> Result<Output, CoreFlowError> {
        self.handle(scenario_alias, Some(step_name), FlowAction::Forward, request)
    }

    /// Retoma la traversal guardada: redirige al display del último step
    /// registrado o, si no hay snapshot utilizable, comienza desde cero.
    pub fn resume(&self, scenario_alias: &str) -> Result<Output, CoreFlowError> {
        let process = self.coordinator.load_scenario(scenario_alias)?;
        let resumable = self.usable_snapshot(scenario_alias, process.scenario().definition_hash())?
                            .and_then(|snap| snap.current_step)
                            .filter(|name| process.scenario().has_step(name));
        match resumable {
            Some(step_name) => self.coordinator.display_address(&process, &step_name).map(Output::redirect),
            None => self.start(scenario_alias),
        }
    }

    /// Snapshot persistido, tal cual está en el storage.
    pub fn snapshot(&self, scenario_alias: &str) -> Result<Option<FlowSnapshot>, CoreFlowError> {
        self.storage.load(&self.key(scenario_alias))
    }

    // Ejecuta una acción con el contexto hidratado y persiste el resultado.
    fn handle(&self,
              scenario_alias: &str,
              step_name: Option<&str>,
              action: FlowAction,
              request: FlowRequest)
              -> Result<Output, CoreFlowError> {
        let process = self.coordinator.load_scenario(scenario_alias)?;
        let definition_hash = process.scenario().definition_hash().to_string();

        let mut ctx = ProcessContext::new();
        if let Some(snapshot) = self.usable_snapshot(scenario_alias, &definition_hash)? {
            ctx.hydrate(snapshot);
        }
        ctx.set_request(request);

        let output = self.coordinator.process(&mut ctx, scenario_alias, step_name, action)?;

        let key = self.key(scenario_alias);
        if ctx.step_history().is_empty() && ctx.all_data().is_empty() {
            debug!("flow {} closed; removing snapshot", key);
            self.storage.remove(&key)?;
        } else {
            self.storage.save(&key, &ctx.snapshot(&definition_hash))?;
        }
        Ok(output)
    }

    // Un snapshot de otra definición referencia steps que pueden no existir
    // o estar en otro orden: se ignora.
    fn usable_snapshot(&self, scenario_alias: &str, definition_hash: &str) -> Result<Option<FlowSnapshot>, CoreFlowError> {
        let key = self.key(scenario_alias);
        match self.storage.load(&key)? {
            Some(snapshot) if snapshot.definition_hash != definition_hash => {
                warn!("discarding stale snapshot for {} (definition changed)", key);
                Ok(None)
            }
            other => Ok(other),
        }
    }
}
