use crate::context::ProcessContext;
use crate::model::Output;

use super::result::StepResult;

/// Trait que define un Step del escenario.
///
/// Las implementaciones no guardan estado entre peticiones: lo que deban
/// recordar va a `ProcessContext::set_data`.
pub trait StepDefinition: Send + Sync {
    /// Nombre estable y único dentro del escenario.
    fn name(&self) -> &str;

    /// Renderiza el estado actual. No debe provocar transiciones.
    fn display(&self, ctx: &ProcessContext) -> Output;

    /// Intenta completar el step y propone una transición.
    ///
    /// Por defecto avanza linealmente.
    fn forward(&self, _ctx: &mut ProcessContext) -> StepResult {
        StepResult::Action(crate::step::ActionResult::Proceed)
    }
}
