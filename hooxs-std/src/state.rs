//! Registry storage shared by [`Hooks`](crate::Hooks) and its builder.

use hooxs_core::{CallError, HandlerId, HookArgs, SharedHandler, SharedInterceptor};
use std::{
    any::{Any, type_name},
    collections::HashMap,
    time::Duration,
};

/// A type-erased handler registered under a name.
pub(crate) struct Entry {
    id: HandlerId,
    args: &'static str,
    handler: Box<dyn Any + Send + Sync>,
}

impl Entry {
    pub(crate) fn new<A: HookArgs>(handler: SharedHandler<A>) -> Self {
        Self {
            id: handler.id(),
            args: type_name::<A>(),
            handler: Box::new(handler),
        }
    }

    pub(crate) fn id(&self) -> HandlerId {
        self.id
    }

    pub(crate) fn downcast<A: HookArgs>(&self) -> Option<&SharedHandler<A>> {
        self.handler.downcast_ref()
    }

    pub(crate) fn accepts<A: HookArgs>(&self) -> bool {
        self.handler.is::<SharedHandler<A>>()
    }
}

/// Which interceptor collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Before,
    After,
}

/// Options fixed when the registry is built.
#[derive(Debug, Clone, Default)]
pub(crate) struct HooksConfig {
    /// Upper bound on a single handler's completion.
    #[cfg_attr(not(feature = "timeout"), allow(dead_code))]
    pub(crate) handler_timeout: Option<Duration>,
}

/// Handlers and interceptors at one point in time.
///
/// Invariants: no name maps to an empty sequence, and every entry under a
/// name takes the same argument type.
#[derive(Default)]
pub(crate) struct State {
    pub(crate) handlers: HashMap<String, Vec<Entry>>,
    pub(crate) before: Vec<SharedInterceptor>,
    pub(crate) after: Vec<SharedInterceptor>,
}

impl State {
    /// The argument type of the handlers under `name`.
    pub(crate) fn args_of(&self, name: &str) -> Option<&'static str> {
        self.handlers
            .get(name)
            .and_then(|entries| entries.first())
            .map(|entry| entry.args)
    }

    /// Append `handler` under `name`.
    ///
    /// Refused with the name's argument type if it already holds handlers
    /// for a type other than `A`.
    pub(crate) fn push_handler<A: HookArgs>(
        &mut self,
        name: &str,
        handler: SharedHandler<A>,
    ) -> Result<(), &'static str> {
        let entries = self.handlers.entry(name.to_owned()).or_default();
        if let Some(first) = entries.first() {
            if !first.accepts::<A>() {
                return Err(first.args);
            }
        }
        entries.push(Entry::new(handler));
        Ok(())
    }

    /// Remove the first entry with `id` under `name`, dropping the name once
    /// its sequence is empty.
    pub(crate) fn remove_handler(&mut self, name: &str, id: HandlerId) -> bool {
        let Some(entries) = self.handlers.get_mut(name) else {
            return false;
        };
        let Some(pos) = entries.iter().position(|entry| entry.id() == id) else {
            return false;
        };
        entries.remove(pos);
        if entries.is_empty() {
            self.handlers.remove(name);
        }
        true
    }

    pub(crate) fn interceptors_mut(&mut self, stage: Stage) -> &mut Vec<SharedInterceptor> {
        match stage {
            Stage::Before => &mut self.before,
            Stage::After => &mut self.after,
        }
    }

    pub(crate) fn remove_interceptor(&mut self, stage: Stage, id: HandlerId) -> bool {
        let interceptors = self.interceptors_mut(stage);
        match interceptors.iter().position(|i| i.id() == id) {
            Some(pos) => {
                interceptors.remove(pos);
                true
            }
            None => false,
        }
    }

    /// The handlers under `name`, if they take `A`.
    pub(crate) fn handlers_of<A: HookArgs>(&self, name: &str) -> Option<Vec<SharedHandler<A>>> {
        self.handlers
            .get(name)?
            .iter()
            .map(|entry| entry.downcast::<A>().cloned())
            .collect()
    }

    /// Capture what a call to `name` will run.
    ///
    /// Fails if the handlers under `name` take a type other than `A`.
    pub(crate) fn snapshot<A: HookArgs>(&self, name: &str) -> Result<Snapshot<A>, CallError> {
        let handlers = match self.args_of(name) {
            None => Vec::new(),
            Some(expected) => self
                .handlers_of::<A>(name)
                .ok_or_else(|| CallError::ArgsMismatch {
                    hook: name.to_owned(),
                    expected,
                    found: type_name::<A>(),
                })?,
        };

        Ok(Snapshot {
            before: self.before.clone(),
            handlers,
            after: self.after.clone(),
        })
    }
}

/// The handlers and interceptors captured at the start of a call.
pub(crate) struct Snapshot<A: HookArgs> {
    pub(crate) before: Vec<SharedInterceptor>,
    pub(crate) handlers: Vec<SharedHandler<A>>,
    pub(crate) after: Vec<SharedInterceptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_drops_empty_sequence() {
        let mut state = State::default();
        let handler = SharedHandler::from_fn(|_: &()| {});
        state.push_handler("build", handler.clone()).unwrap();
        state.push_handler("build", handler.clone()).unwrap();

        assert!(state.remove_handler("build", handler.id()));
        assert_eq!(state.handlers["build"].len(), 1);

        assert!(state.remove_handler("build", handler.id()));
        assert!(!state.handlers.contains_key("build"));

        assert!(!state.remove_handler("build", handler.id()));
    }

    #[test]
    fn test_snapshot_rejects_foreign_args() {
        let mut state = State::default();
        state
            .push_handler("load", SharedHandler::from_fn(|_: &u32| {}))
            .unwrap();

        assert_eq!(state.snapshot::<u32>("load").unwrap().handlers.len(), 1);
        assert!(matches!(
            state.snapshot::<String>("load"),
            Err(CallError::ArgsMismatch { expected: "u32", .. })
        ));
    }

    #[test]
    fn test_push_refuses_second_argument_type() {
        let mut state = State::default();
        state
            .push_handler("load", SharedHandler::from_fn(|_: &u32| {}))
            .unwrap();

        let refused = state.push_handler("load", SharedHandler::from_fn(|_: &String| {}));
        assert_eq!(refused, Err("u32"));
        assert_eq!(state.handlers["load"].len(), 1);
        assert_eq!(state.args_of("load"), Some("u32"));
        assert!(state.handlers_of::<String>("load").is_none());

        // Once the name is gone, any type may claim it.
        state.handlers.remove("load");
        state
            .push_handler("load", SharedHandler::from_fn(|_: &String| {}))
            .unwrap();
        assert_eq!(state.handlers_of::<String>("load").map(|h| h.len()), Some(1));
    }

    #[test]
    fn test_snapshot_of_unknown_name_is_empty() {
        let mut state = State::default();
        state.before.push(SharedInterceptor::new(|_: &str| {}));

        let snapshot = state.snapshot::<()>("missing").unwrap();
        assert!(snapshot.handlers.is_empty());
        assert_eq!(snapshot.before.len(), 1);
        assert!(snapshot.after.is_empty());
    }
}
