//! Steps de prueba compartidos por los tests unitarios del crate.

use serde_json::json;

use crate::context::ProcessContext;
use crate::model::Output;
use crate::step::{StepDefinition, StepResult};

/// Step que muestra su nombre y avanza linealmente, o salta al step indicado
/// en el parámetro `jump` de la petición.
pub(crate) struct NamedStep(pub &'static str);

impl StepDefinition for NamedStep {
    fn name(&self) -> &str {
        self.0
    }

    fn display(&self, ctx: &ProcessContext) -> Output {
        Output::view(self.0, json!({ "history": ctx.step_history() }))
    }

    fn forward(&self, ctx: &mut ProcessContext) -> StepResult {
        match ctx.request().get_str("jump") {
            Some(target) => StepResult::jump_to(target),
            None => StepResult::proceed(),
        }
    }
}

pub(crate) fn scenario_of(names: &[&'static str]) -> crate::Scenario {
    names.iter()
         .copied()
         .fold(crate::Scenario::builder(), |b, n| b.step(NamedStep(n)))
         .build()
         .expect("scenario without duplicates")
}
