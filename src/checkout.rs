//! Escenario de demostración: checkout de cinco pasos.
//!
//! cart -> address -> shipping -> payment -> review
//!
//! `address` salta directamente a `payment` cuando el cliente elige recoger
//! en tienda (`delivery=pickup`). Cada step guarda lo enviado en los datos del
//! contexto; `review` los muestra juntos.
use flow_core::{Coordinator, CoreFlowError, Output, PathRouter, ProcessContext, Scenario, StepDefinition, StepResult};
use serde_json::{json, Map, Value};

pub const CHECKOUT_ALIAS: &str = "checkout";
pub const THANKS_ROUTE: &str = "checkout_thanks";

const SHIPPING_METHODS: &[&str] = &["standard", "express"];
const PAYMENT_METHODS: &[&str] = &["card", "transfer"];

fn invalid(field: &str, reason: &str) -> StepResult {
    Output::response(422, json!({ "field": field, "error": reason })).into()
}

// Vista estándar: template `checkout/<step>` con lo guardado para ese step.
fn page(ctx: &ProcessContext, step: &str, extra: Value) -> Output {
    Output::view(format!("checkout/{step}"),
                 json!({
                     "step": step,
                     "saved": ctx.data(step),
                     "progress": ctx.progress(),
                     "options": extra,
                 }))
}

fn required<'a>(ctx: &'a ProcessContext, field: &str) -> Option<&'a str> {
    ctx.request().get_str(field).map(str::trim).filter(|v| !v.is_empty())
}

pub struct CartStep;

impl StepDefinition for CartStep {
    fn name(&self) -> &str {
        "cart"
    }

    fn display(&self, ctx: &ProcessContext) -> Output {
        page(ctx, self.name(), Value::Null)
    }

    fn forward(&self, ctx: &mut ProcessContext) -> StepResult {
        let Some(items) = required(ctx, "items") else {
            return invalid("items", "cart is empty");
        };
        let items: Vec<String> = items.split(',')
                                      .map(str::trim)
                                      .filter(|i| !i.is_empty())
                                      .map(str::to_string)
                                      .collect();
        ctx.set_data(self.name(), json!({ "items": items }));
        StepResult::proceed()
    }
}

pub struct AddressStep;

impl StepDefinition for AddressStep {
    fn name(&self) -> &str {
        "address"
    }

    fn display(&self, ctx: &ProcessContext) -> Output {
        page(ctx, self.name(), json!(["delivery", "pickup"]))
    }

    fn forward(&self, ctx: &mut ProcessContext) -> StepResult {
        if ctx.request().get_str("delivery") == Some("pickup") {
            ctx.set_data(self.name(), json!({ "pickup": true }));
            return StepResult::jump_to(PaymentStep.name());
        }
        let Some(address) = required(ctx, "address").map(str::to_string) else {
            return invalid("address", "address is required for delivery");
        };
        ctx.set_data(self.name(), json!({ "pickup": false, "address": address }));
        StepResult::proceed()
    }
}

pub struct ShippingStep;

impl StepDefinition for ShippingStep {
    fn name(&self) -> &str {
        "shipping"
    }

    fn display(&self, ctx: &ProcessContext) -> Output {
        page(ctx, self.name(), json!(SHIPPING_METHODS))
    }

    fn forward(&self, ctx: &mut ProcessContext) -> StepResult {
        match required(ctx, "method").map(str::to_string) {
            Some(method) if SHIPPING_METHODS.contains(&method.as_str()) => {
                ctx.set_data(self.name(), json!({ "method": method }));
                StepResult::proceed()
            }
            _ => invalid("method", "unknown shipping method"),
        }
    }
}

pub struct PaymentStep;

impl StepDefinition for PaymentStep {
    fn name(&self) -> &str {
        "payment"
    }

    fn display(&self, ctx: &ProcessContext) -> Output {
        page(ctx, self.name(), json!(PAYMENT_METHODS))
    }

    fn forward(&self, ctx: &mut ProcessContext) -> StepResult {
        match required(ctx, "method").map(str::to_string) {
            Some(method) if PAYMENT_METHODS.contains(&method.as_str()) => {
                ctx.set_data(self.name(), json!({ "method": method }));
                StepResult::proceed()
            }
            _ => invalid("method", "unknown payment method"),
        }
    }
}

pub struct ReviewStep;

impl StepDefinition for ReviewStep {
    fn name(&self) -> &str {
        "review"
    }

    // Al volver atrás y cambiar de rama quedan datos de steps que ya no están
    // en el historial; el resumen sólo muestra la traversal vigente.
    fn display(&self, ctx: &ProcessContext) -> Output {
        let visited = ctx.step_history();
        let summary: Map<String, Value> = ctx.all_data()
                                             .iter()
                                             .filter(|(step, _)| visited.contains(*step))
                                             .map(|(step, value)| (step.clone(), value.clone()))
                                             .collect();
        Output::view("checkout/review",
                     json!({
                         "summary": summary,
                         "visited": ctx.step_history(),
                         "progress": ctx.progress(),
                     }))
    }
}

pub fn checkout_scenario() -> Result<Scenario, CoreFlowError> {
    Scenario::builder().step(CartStep)
                       .step(AddressStep)
                       .step(ShippingStep)
                       .step(PaymentStep)
                       .step(ReviewStep)
                       .redirect(THANKS_ROUTE)
                       .build()
}

/// Coordinador con las rutas del flujo bajo `route_prefix` y el checkout
/// registrado.
pub fn build_coordinator(route_prefix: &str) -> Result<Coordinator<PathRouter>, CoreFlowError> {
    let prefix = route_prefix.trim_end_matches('/');
    let router = PathRouter::with_flow_routes(prefix).route(THANKS_ROUTE, format!("{prefix}/{CHECKOUT_ALIAS}/thanks"));
    let mut coordinator = Coordinator::new(router);
    coordinator.register_scenario(CHECKOUT_ALIAS, checkout_scenario()?)?;
    Ok(coordinator)
}
