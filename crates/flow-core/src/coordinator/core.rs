//! Core Coordinator implementation

use log::{debug, warn};

use crate::constants::{COMPLETED_ROUTE, DISPLAY_ROUTE, FORWARD_ROUTE, PARAM_SCENARIO_ALIAS, PARAM_STEP_NAME,
                       START_ROUTE};
use crate::context::ProcessContext;
use crate::errors::CoreFlowError;
use crate::model::Output;
use crate::navigation::{RouteGenerator, RouteParams};
use crate::scenario::{Process, Scenario, ScenarioRegistry};
use crate::step::{ActionResult, StepResult};

use super::FlowAction;

/// Coordinador de flujos.
///
/// Resuelve el escenario, repara la posición del `ProcessContext` contra el
/// step pedido, invoca el step e interpreta su resultado para decidir la
/// siguiente dirección. El registro se puebla en el arranque (`&mut self`)
/// y después el coordinador se comparte de sólo lectura entre peticiones.
#[derive(Debug)]
pub struct Coordinator<R>
    where R: RouteGenerator
{
    router: R,
    scenarios: ScenarioRegistry,
}

impl<R> Coordinator<R> where R: RouteGenerator
{
    pub fn new(router: R) -> Self {
        Self::with_registry(router, ScenarioRegistry::new())
    }

    pub fn with_registry(router: R, scenarios: ScenarioRegistry) -> Self {
        Self { router, scenarios }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn scenarios(&self) -> &ScenarioRegistry {
        &self.scenarios
    }

    pub fn register_scenario(&mut self, alias: impl Into<String>, scenario: Scenario) -> Result<(), CoreFlowError> {
        self.scenarios.register(alias, scenario)
    }

    pub fn load_scenario(&self, alias: &str) -> Result<Process, CoreFlowError> {
        self.scenarios.load(alias)
    }

    /// Comienza el escenario desde el primer step. Siempre redirige al
    /// display del primer step; nunca ejecuta el step en línea.
    pub fn start(&self, ctx: &mut ProcessContext, scenario_alias: &str) -> Result<Output, CoreFlowError> {
        self.process(ctx, scenario_alias, None, FlowAction::Start)
    }

    /// Muestra el step pidiendo su output al step, sin cambiar de estado.
    pub fn display(&self,
                   ctx: &mut ProcessContext,
                   scenario_alias: &str,
                   step_name: &str)
                   -> Result<Output, CoreFlowError> {
        self.process(ctx, scenario_alias, Some(step_name), FlowAction::Display)
    }

    /// Completa el step e interpreta su resultado.
    pub fn forward(&self,
                   ctx: &mut ProcessContext,
                   scenario_alias: &str,
                   step_name: &str)
                   -> Result<Output, CoreFlowError> {
        self.process(ctx, scenario_alias, Some(step_name), FlowAction::Forward)
    }

    /// Procedimiento compartido por las tres acciones.
    ///
    /// Sin `step_name` se trata de un comienzo desde cero: la traversal
    /// anterior se descarta. Con `step_name`, el historial se rebobina hasta
    /// ese step; si no aparece en él, se redirige al primer step en lugar de
    /// fallar. `Start` no admite step; `Display` y `Forward` lo exigen.
    pub(crate) fn process(&self,
                          ctx: &mut ProcessContext,
                          scenario_alias: &str,
                          step_name: Option<&str>,
                          action: FlowAction)
                          -> Result<Output, CoreFlowError> {
        match (action, step_name) {
            (FlowAction::Start, Some(name)) => {
                return Err(CoreFlowError::InvalidAction(format!("{action} with step \"{name}\"")));
            }
            (FlowAction::Display | FlowAction::Forward, None) => {
                return Err(CoreFlowError::InvalidAction(format!("{action} without step")));
            }
            _ => {}
        }
        let process = self.load_scenario(scenario_alias)?;
        let scenario = process.shared_scenario();

        let step = match step_name {
            None => {
                let first = scenario.first_step()?;
                ctx.restart(process.clone(), first.name());
                first
            }
            Some(name) => {
                let step = scenario.step_by_name(name)?;
                ctx.initialize(process.clone(), step.name());
                if !ctx.rewind_history() {
                    // El historial no contiene el step pedido: la posición no
                    // es alcanzable desde la traversal registrada.
                    let first = scenario.first_step()?;
                    warn!("step '{}' of '{}' not reached yet; redirecting to '{}'",
                          name,
                          scenario_alias,
                          first.name());
                    return self.redirect_to_step_display(ctx, &process, first.name());
                }
                step
            }
        };

        if !ctx.is_valid() {
            return Err(CoreFlowError::FlowPositionInvalid);
        }

        debug!("{} '{}' @ '{}'", action, scenario_alias, step.name());
        match action {
            FlowAction::Start => self.redirect_to_step_display(ctx, &process, step.name()),
            FlowAction::Display => Ok(step.display(ctx)),
            FlowAction::Forward => {
                let result = step.forward(ctx);
                self.process_step_result(ctx, &process, result)
            }
        }
    }

    /// Interpreta el resultado de `forward`.
    ///
    /// - `Output`: se devuelve sin modificar.
    /// - `JumpTo`: fija el override y redirige al step destino. Un destino
    ///   vacío se trata como `Proceed`.
    /// - `Proceed` en el último step: cierra el contexto y redirige al destino
    ///   de finalización del escenario.
    /// - `Proceed`: redirige al siguiente step por posición.
    pub fn process_step_result(&self,
                               ctx: &mut ProcessContext,
                               process: &Process,
                               result: StepResult)
                               -> Result<Output, CoreFlowError> {
        let action = match result {
            StepResult::Output(output) => return Ok(output),
            StepResult::Action(ActionResult::JumpTo(target)) if target.trim().is_empty() => ActionResult::Proceed,
            StepResult::Action(action) => action,
        };
        match action {
            ActionResult::JumpTo(target) => {
                ctx.set_next_step_by_name(target);
                let next = ctx.next_step()?.name().to_string();
                self.redirect_to_step_display(ctx, process, &next)
            }
            ActionResult::Proceed if ctx.is_last_step() => {
                ctx.close();
                debug!("scenario '{}' completed", process.scenario_alias());
                self.completion_address(process).map(Output::redirect)
            }
            ActionResult::Proceed => {
                let next = ctx.next_step()?.name().to_string();
                self.redirect_to_step_display(ctx, process, &next)
            }
        }
    }

    /// Registra `step_name` en el historial y redirige a su display.
    fn redirect_to_step_display(&self,
                                ctx: &mut ProcessContext,
                                process: &Process,
                                step_name: &str)
                                -> Result<Output, CoreFlowError> {
        let url = self.display_address(process, step_name)?;
        ctx.add_step_to_history(step_name);
        Ok(Output::redirect(url))
    }

    /// Dirección de display de un step: la ruta propia del escenario (sólo
    /// `stepName`) o la ruta por defecto (`scenarioAlias` + `stepName`).
    pub fn display_address(&self, process: &Process, step_name: &str) -> Result<String, CoreFlowError> {
        let mut params = RouteParams::new();
        params.insert(PARAM_STEP_NAME.to_string(), step_name.to_string());
        match process.scenario().display_route() {
            Some(route) => self.router.generate(route, &params),
            None => {
                params.insert(PARAM_SCENARIO_ALIAS.to_string(), process.scenario_alias().to_string());
                self.router.generate(DISPLAY_ROUTE, &params)
            }
        }
    }

    /// Dirección de entrada del escenario (`start`).
    pub fn start_address(&self, process: &Process) -> Result<String, CoreFlowError> {
        let mut params = RouteParams::new();
        params.insert(PARAM_SCENARIO_ALIAS.to_string(), process.scenario_alias().to_string());
        self.router.generate(START_ROUTE, &params)
    }

    /// Dirección a la que se envía (`forward`) un step.
    pub fn forward_address(&self, process: &Process, step_name: &str) -> Result<String, CoreFlowError> {
        let mut params = RouteParams::new();
        params.insert(PARAM_SCENARIO_ALIAS.to_string(), process.scenario_alias().to_string());
        params.insert(PARAM_STEP_NAME.to_string(), step_name.to_string());
        self.router.generate(FORWARD_ROUTE, &params)
    }

    /// Destino al completar el escenario: su `redirect` (sin parámetros) o
    /// la ruta de finalización por defecto.
    pub fn completion_address(&self, process: &Process) -> Result<String, CoreFlowError> {
        match process.scenario().redirect() {
            Some(route) => self.router.generate(route, &RouteParams::new()),
            None => {
                let mut params = RouteParams::new();
                params.insert(PARAM_SCENARIO_ALIAS.to_string(), process.scenario_alias().to_string());
                self.router.generate(COMPLETED_ROUTE, &params)
            }
        }
    }
}
