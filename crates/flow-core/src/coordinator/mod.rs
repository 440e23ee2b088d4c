//! Coordinator module
//!
//! Provides the coordinator, the action kinds it dispatches and the session
//! helper that hydrates/persists contexts around one action.

pub mod core;
pub mod session;

pub use core::Coordinator;
pub use session::FlowSession;

use std::fmt;
use std::str::FromStr;

use crate::errors::CoreFlowError;

/// Acción de entrada de una petición.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    Start,
    Display,
    Forward,
}

impl FlowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Display => "display",
            Self::Forward => "forward",
        }
    }
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowAction {
    type Err = CoreFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "display" => Ok(Self::Display),
            "forward" => Ok(Self::Forward),
            other => Err(CoreFlowError::InvalidAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ProcessContext;
    use crate::model::{FlowRequest, Output};
    use crate::navigation::PathRouter;
    use crate::scenario::Scenario;
    use crate::step::{StepDefinition, StepResult};
    use crate::testing::{scenario_of, NamedStep};
    use serde_json::json;

    fn coordinator() -> Coordinator<PathRouter> {
        let router = PathRouter::with_flow_routes("/flow").route("thanks", "/thanks");
        let mut c = Coordinator::new(router);
        c.register_scenario("abc", scenario_of(&["a", "b", "c"])).unwrap();
        c
    }

    fn names(history: &[String]) -> Vec<&str> {
        history.iter().map(String::as_str).collect()
    }

    fn redirect(output: Output) -> String {
        output.redirect_url().expect("redirect output").to_string()
    }

    #[test]
    fn start_redirects_to_first_step_and_resets_history() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        ctx.set_step_history(vec!["a".into(), "b".into()]);
        let out = c.start(&mut ctx, "abc").unwrap();
        assert_eq!(redirect(out), "/flow/abc/a");
        assert_eq!(names(ctx.step_history()), ["a"]);
    }

    #[test]
    fn linear_advance_then_completion() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        c.start(&mut ctx, "abc").unwrap();
        assert_eq!(redirect(c.forward(&mut ctx, "abc", "a").unwrap()), "/flow/abc/b");
        assert_eq!(redirect(c.forward(&mut ctx, "abc", "b").unwrap()), "/flow/abc/c");
        assert_eq!(names(ctx.step_history()), ["a", "b", "c"]);

        let done = c.forward(&mut ctx, "abc", "c").unwrap();
        assert_eq!(redirect(done), "/flow/abc/completed");
        assert!(ctx.step_history().is_empty());
        assert!(!ctx.is_initialized());
    }

    #[test]
    fn explicit_jump_skips_steps() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        c.start(&mut ctx, "abc").unwrap();
        ctx.set_request(FlowRequest::new().with_param("jump", "c"));
        let out = c.forward(&mut ctx, "abc", "a").unwrap();
        assert_eq!(redirect(out), "/flow/abc/c");
        assert_eq!(names(ctx.step_history()), ["a", "c"]);
        assert_eq!(ctx.next_step_override(), Some("c"));
    }

    #[test]
    fn jump_to_unknown_step_fails() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        c.start(&mut ctx, "abc").unwrap();
        ctx.set_request(FlowRequest::new().with_param("jump", "ghost"));
        let err = c.forward(&mut ctx, "abc", "a").unwrap_err();
        assert_eq!(err, CoreFlowError::UnknownStep("ghost".into()));
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_jump_target_advances_linearly() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        c.start(&mut ctx, "abc").unwrap();
        ctx.set_request(FlowRequest::new().with_param("jump", ""));
        assert_eq!(redirect(c.forward(&mut ctx, "abc", "a").unwrap()), "/flow/abc/b");
        assert_eq!(ctx.next_step_override(), None);

        ctx.set_request(FlowRequest::new().with_param("jump", " "));
        assert_eq!(redirect(c.forward(&mut ctx, "abc", "b").unwrap()), "/flow/abc/c");
        assert_eq!(redirect(c.forward(&mut ctx, "abc", "c").unwrap()), "/flow/abc/completed");
    }

    #[test]
    fn start_with_step_and_step_action_without_step_are_rejected() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        ctx.set_step_history(vec!["a".into(), "b".into()]);
        let err = c.process(&mut ctx, "abc", Some("b"), FlowAction::Start).unwrap_err();
        assert!(matches!(err, CoreFlowError::InvalidAction(_)));
        assert_eq!(names(ctx.step_history()), ["a", "b"]);

        for action in [FlowAction::Display, FlowAction::Forward] {
            assert!(matches!(c.process(&mut ctx, "abc", None, action), Err(CoreFlowError::InvalidAction(_))));
        }
        assert_eq!(names(ctx.step_history()), ["a", "b"]);
    }

    #[test]
    fn direct_request_rewinds_history() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        ctx.set_step_history(vec!["a".into(), "b".into(), "c".into()]);
        let out = c.display(&mut ctx, "abc", "b").unwrap();
        assert_eq!(out, Output::view("b", json!({ "history": ["a", "b"] })));
        assert_eq!(names(ctx.step_history()), ["a", "b"]);
        assert_eq!(ctx.current_step_name(), Some("b"));
        assert!(ctx.is_valid());
    }

    #[test]
    fn unreached_step_redirects_to_first() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        ctx.set_step_history(vec!["a".into()]);
        let out = c.forward(&mut ctx, "abc", "c").unwrap();
        assert_eq!(redirect(out), "/flow/abc/a");
        assert!(!ctx.is_valid());
        assert_eq!(names(ctx.step_history()), ["a"]);
    }

    #[test]
    fn display_is_idempotent() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        ctx.set_step_history(vec!["a".into(), "b".into()]);
        let first = c.display(&mut ctx, "abc", "b").unwrap();
        let history = ctx.step_history().to_vec();
        let second = c.display(&mut ctx, "abc", "b").unwrap();
        assert_eq!(first, second);
        assert_eq!(ctx.step_history(), history.as_slice());
        assert_eq!(ctx.current_step_name(), Some("b"));
    }

    #[test]
    fn unknown_scenario_and_step() {
        let c = coordinator();
        let mut ctx = ProcessContext::new();
        assert_eq!(c.start(&mut ctx, "nope").unwrap_err(),
                   CoreFlowError::UnregisteredScenario("nope".into()));
        assert_eq!(c.display(&mut ctx, "abc", "zz").unwrap_err(),
                   CoreFlowError::UnknownStep("zz".into()));
    }

    #[test]
    fn start_of_empty_scenario_fails() {
        let mut c = coordinator();
        c.register_scenario("empty", Scenario::builder().build().unwrap()).unwrap();
        let mut ctx = ProcessContext::new();
        assert_eq!(c.start(&mut ctx, "empty").unwrap_err(), CoreFlowError::EmptyScenario);
    }

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut c = coordinator();
        let err = c.register_scenario("abc", scenario_of(&["x"])).unwrap_err();
        assert_eq!(err, CoreFlowError::DuplicateScenarioAlias("abc".into()));
        assert_eq!(c.load_scenario("abc").unwrap().scenario().len(), 3);
    }

    #[test]
    fn custom_display_route_and_redirect() {
        let router = PathRouter::with_flow_routes("/flow").route("wizard_step", "/wizard/{stepName}")
                                                          .route("thanks", "/thanks");
        let mut c = Coordinator::new(router);
        let scenario = Scenario::builder().step(NamedStep("x"))
                                          .step(NamedStep("y"))
                                          .display_route("wizard_step")
                                          .redirect("thanks")
                                          .build()
                                          .unwrap();
        c.register_scenario("custom", scenario).unwrap();

        let mut ctx = ProcessContext::new();
        assert_eq!(redirect(c.start(&mut ctx, "custom").unwrap()), "/wizard/x");
        assert_eq!(redirect(c.forward(&mut ctx, "custom", "x").unwrap()), "/wizard/y");
        assert_eq!(redirect(c.forward(&mut ctx, "custom", "y").unwrap()), "/thanks");
    }

    struct Passthrough;
    impl StepDefinition for Passthrough {
        fn name(&self) -> &str {
            "raw"
        }
        fn display(&self, _ctx: &ProcessContext) -> Output {
            Output::response(200, json!("display"))
        }
        fn forward(&self, _ctx: &mut ProcessContext) -> StepResult {
            Output::response(422, json!({"error": "invalid"})).into()
        }
    }

    #[test]
    fn direct_output_passes_through_untouched() {
        let mut c = coordinator();
        c.register_scenario("raw", Scenario::builder().step(Passthrough).build().unwrap()).unwrap();
        let mut ctx = ProcessContext::new();
        c.start(&mut ctx, "raw").unwrap();
        let out = c.forward(&mut ctx, "raw", "raw").unwrap();
        assert_eq!(out, Output::response(422, json!({"error": "invalid"})));
        assert_eq!(names(ctx.step_history()), ["raw"]);
    }

    #[test]
    fn action_parsing() {
        assert_eq!("forward".parse::<FlowAction>().unwrap(), FlowAction::Forward);
        assert_eq!("jump".parse::<FlowAction>().unwrap_err(), CoreFlowError::InvalidAction("jump".into()));
    }

    #[test]
    fn start_and_forward_addresses() {
        let c = coordinator();
        let process = c.load_scenario("abc").unwrap();
        assert_eq!(c.start_address(&process).unwrap(), "/flow/abc/start");
        assert_eq!(c.forward_address(&process, "b").unwrap(), "/flow/abc/b/forward");
    }
}
