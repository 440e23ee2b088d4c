//! Contexto de proceso: step actual, historial y validez de la posición.

mod process_context;

pub use process_context::ProcessContext;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreFlowError;
    use crate::scenario::ScenarioRegistry;
    use crate::testing::scenario_of;

    fn registry() -> ScenarioRegistry {
        let mut r = ScenarioRegistry::new();
        r.register("abc", scenario_of(&["a", "b", "c"])).unwrap();
        r.register("single", scenario_of(&["only"])).unwrap();
        r
    }

    fn history(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn rewind_trims_history_to_requested_step() {
        let mut ctx = ProcessContext::new();
        ctx.set_step_history(history(&["a", "b", "c"]));
        ctx.initialize(registry().load("abc").unwrap(), "b");
        assert!(!ctx.is_valid(), "no es válido antes del rewind");

        assert!(ctx.rewind_history());
        assert_eq!(ctx.step_history(), history(&["a", "b"]).as_slice());
        assert_eq!(ctx.current_step_name(), Some("b"));
        assert!(ctx.is_valid());
    }

    #[test]
    fn rewind_keeps_most_recent_visit() {
        let mut ctx = ProcessContext::new();
        ctx.set_step_history(history(&["a", "b", "a", "b", "c"]));
        ctx.initialize(registry().load("abc").unwrap(), "a");
        assert!(ctx.rewind_history());
        assert_eq!(ctx.step_history(), history(&["a", "b", "a"]).as_slice());
    }

    #[test]
    fn rewind_fails_for_unreached_step() {
        let mut ctx = ProcessContext::new();
        ctx.set_step_history(history(&["a"]));
        ctx.initialize(registry().load("abc").unwrap(), "c");
        assert!(!ctx.rewind_history());
        assert!(!ctx.is_valid());
        assert!(ctx.step_history().is_empty());
    }

    #[test]
    fn rewind_on_empty_history_fails() {
        let mut ctx = ProcessContext::new();
        ctx.initialize(registry().load("abc").unwrap(), "a");
        assert!(!ctx.rewind_history());
    }

    #[test]
    fn restart_is_valid_and_clears_history() {
        let mut ctx = ProcessContext::new();
        ctx.set_step_history(history(&["a", "b"]));
        ctx.set_data("email", "x@y.z");
        ctx.restart(registry().load("abc").unwrap(), "a");
        assert!(ctx.is_valid());
        assert!(ctx.step_history().is_empty());
        assert!(ctx.data("email").is_none());
        assert_eq!(ctx.current_step_name(), Some("a"));
    }

    #[test]
    fn first_and_last_are_exclusive_for_multi_step() {
        let registry = registry();
        let mut ctx = ProcessContext::new();
        for (name, first, last) in [("a", true, false), ("b", false, false), ("c", false, true)] {
            ctx.initialize(registry.load("abc").unwrap(), name);
            assert_eq!(ctx.is_first_step(), first, "first @ {name}");
            assert_eq!(ctx.is_last_step(), last, "last @ {name}");
        }
    }

    #[test]
    fn single_step_is_first_and_last() {
        let mut ctx = ProcessContext::new();
        ctx.initialize(registry().load("single").unwrap(), "only");
        assert!(ctx.is_first_step());
        assert!(ctx.is_last_step());
        assert_eq!(ctx.progress(), 100);
    }

    #[test]
    fn next_step_prefers_override() {
        let mut ctx = ProcessContext::new();
        ctx.initialize(registry().load("abc").unwrap(), "a");
        assert_eq!(ctx.next_step().unwrap().name(), "b");
        ctx.set_next_step_by_name("c");
        assert_eq!(ctx.next_step().unwrap().name(), "c");
        ctx.set_next_step_by_name("ghost");
        assert_eq!(ctx.next_step().err(), Some(CoreFlowError::UnknownStep("ghost".into())));
    }

    #[test]
    fn next_step_at_last_without_override_fails() {
        let mut ctx = ProcessContext::new();
        ctx.initialize(registry().load("abc").unwrap(), "c");
        assert_eq!(ctx.next_step().err(), Some(CoreFlowError::NoSuchAdjacentStep("c".into())));
        assert_eq!(ctx.previous_step().unwrap().name(), "b");
    }

    #[test]
    fn close_detaches_everything() {
        let mut ctx = ProcessContext::new();
        ctx.add_step_to_history("a");
        ctx.initialize(registry().load("abc").unwrap(), "a");
        ctx.set_next_step_by_name("c");
        ctx.close();
        assert!(!ctx.is_initialized());
        assert!(ctx.step_history().is_empty());
        assert!(ctx.next_step_override().is_none());
        assert!(!ctx.is_first_step());
        assert_eq!(ctx.current_step().err(), Some(CoreFlowError::ContextNotInitialized));
        assert_eq!(ctx.progress(), 0);
    }

    #[test]
    fn history_records_revisits() {
        let mut ctx = ProcessContext::new();
        ctx.add_step_to_history("a");
        ctx.add_step_to_history("a");
        assert_eq!(ctx.step_history().len(), 2);
    }

    #[test]
    fn snapshot_resumes_at_last_history_entry() {
        let mut ctx = ProcessContext::new();
        ctx.initialize(registry().load("abc").unwrap(), "a");
        ctx.set_step_history(history(&["a", "c"]));
        ctx.set_data("k", 1);
        let snap = ctx.snapshot("h");
        assert_eq!(snap.current_step.as_deref(), Some("c"));
        assert_eq!(snap.definition_hash, "h");

        let mut restored = ProcessContext::new();
        restored.hydrate(snap);
        assert_eq!(restored.step_history(), history(&["a", "c"]).as_slice());
        assert_eq!(restored.data("k"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn progress_is_percent_of_position() {
        let mut ctx = ProcessContext::new();
        ctx.initialize(registry().load("abc").unwrap(), "a");
        assert_eq!(ctx.progress(), 33);
        ctx.initialize(registry().load("abc").unwrap(), "c");
        assert_eq!(ctx.progress(), 100);
    }
}
