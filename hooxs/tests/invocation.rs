use hooxs::{Hooks, SharedHandler, testing::CallLog};

mod common;
use common::{Config, delayed};

#[tokio::test]
async fn test_handlers_run_once_in_registration_order() {
    let hooks = Hooks::new();
    let log = CallLog::new();

    for label in ["h1", "h2", "h3", "h4"] {
        hooks.register("build", log.handler_with_args::<(u8, &'static str)>(label));
    }

    hooks.call("build", &(7u8, "release")).await.unwrap();

    assert_eq!(
        log.entries(),
        [
            r#"h1((7, "release"))"#,
            r#"h2((7, "release"))"#,
            r#"h3((7, "release"))"#,
            r#"h4((7, "release"))"#,
        ]
    );
}

#[tokio::test]
async fn test_handlers_receive_args_verbatim() {
    let hooks = Hooks::new();
    let config = Config {
        name: "prod".into(),
        retries: 3,
    };
    let expected = config.clone();

    hooks.register(
        "config:load",
        SharedHandler::from_fn(move |received: &Config| {
            assert_eq!(received, &expected);
        }),
    );

    hooks.call("config:load", &config).await.unwrap();
}

#[tokio::test]
async fn test_interceptors_wrap_handlers() {
    let hooks = Hooks::new();
    let log = CallLog::new();

    hooks.before(log.interceptor("B"));
    hooks.after(log.interceptor("A"));
    hooks.register("x", log.handler::<()>("M"));

    hooks.call("x", &()).await.unwrap();
    assert_eq!(log.entries(), ["B:x", "M", "A:x"]);
}

#[tokio::test]
async fn test_interceptors_fire_for_unknown_names() {
    let hooks = Hooks::new();
    let log = CallLog::new();

    hooks.before(log.interceptor("before-1"));
    hooks.before(log.interceptor("before-2"));
    hooks.after(log.interceptor("after-1"));
    hooks.after(log.interceptor("after-2"));

    hooks.call("nothing:registered", &()).await.unwrap();
    assert_eq!(
        log.entries(),
        [
            "before-1:nothing:registered",
            "before-2:nothing:registered",
            "after-1:nothing:registered",
            "after-2:nothing:registered",
        ]
    );

    log.clear();
    hooks.call("again", &()).await.unwrap();
    assert_eq!(log.len(), 4);
}

#[tokio::test]
async fn test_async_handler_settles_before_next_starts() {
    let hooks = Hooks::new();
    let log = CallLog::new();

    hooks.register("build", log.handler::<()>("S1"));
    hooks.register("build", delayed(&log, "A", 20));
    hooks.register("build", log.handler::<()>("S2"));

    hooks.call("build", &()).await.unwrap();
    assert_eq!(log.entries(), ["S1", "A:start", "A:end", "S2"]);
}

#[tokio::test]
async fn test_concurrent_calls_keep_their_own_order() {
    let hooks = Hooks::new();
    let log = CallLog::new();

    hooks.register("a", delayed(&log, "a1", 10));
    hooks.register("a", delayed(&log, "a2", 1));
    hooks.register("b", delayed(&log, "b1", 1));
    hooks.register("b", delayed(&log, "b2", 10));

    let (a, b) = futures::join!(hooks.call("a", &()), hooks.call("b", &()));
    a.unwrap();
    b.unwrap();

    let entries = log.entries();
    let position = |label: &str| entries.iter().position(|e| e == label).unwrap();
    assert!(position("a1:end") < position("a2:start"));
    assert!(position("b1:end") < position("b2:start"));
    assert_eq!(entries.len(), 8);
}

#[tokio::test]
async fn test_handler_may_call_back_into_registry() {
    let hooks = Hooks::new();
    let log = CallLog::new();

    let inner_hooks = hooks.clone();
    let outer_log = log.clone();
    hooks.register(
        "outer",
        SharedHandler::new(move |_: &()| {
            let hooks = inner_hooks.clone();
            let log = outer_log.clone();
            async move {
                log.record("outer:start");
                hooks.call("inner", &()).await?;
                log.record("outer:end");
                Ok::<(), hooxs::CallError>(())
            }
        }),
    );
    hooks.register("inner", log.handler::<()>("inner"));
    hooks.before(log.interceptor("before"));

    hooks.call("outer", &()).await.unwrap();
    assert_eq!(
        log.entries(),
        [
            "before:outer",
            "outer:start",
            "before:inner",
            "inner",
            "outer:end"
        ]
    );

    // Break the registry <-> handler cycle.
    hooks.unregister_all();
}

#[tokio::test]
async fn test_registration_during_call_applies_to_next_call() {
    let hooks = Hooks::new();
    let log = CallLog::new();

    let late = log.handler::<()>("late");
    let registering_hooks = hooks.clone();
    let registering_log = log.clone();
    hooks.register(
        "build",
        SharedHandler::from_fn(move |_: &()| {
            registering_log.record("first");
            if registering_hooks.handler_count("build") == 1 {
                registering_hooks.register("build", late.clone());
            }
        }),
    );

    hooks.call("build", &()).await.unwrap();
    assert_eq!(log.entries(), ["first"]);

    log.clear();
    hooks.call("build", &()).await.unwrap();
    assert_eq!(log.entries(), ["first", "late"]);

    hooks.unregister_all();
}

#[tokio::test]
async fn test_unregister_during_call_does_not_skip_handlers() {
    let hooks = Hooks::new();
    let log = CallLog::new();

    let second = log.handler::<()>("second");
    let removing_hooks = hooks.clone();
    let removed = second.clone();
    hooks.register(
        "build",
        SharedHandler::from_fn(move |_: &()| removing_hooks.unregister("build", &removed)),
    );
    hooks.register("build", second);

    hooks.call("build", &()).await.unwrap();
    assert_eq!(log.entries(), ["second"]);
    assert_eq!(hooks.handler_count("build"), 1);

    hooks.unregister_all();
}
