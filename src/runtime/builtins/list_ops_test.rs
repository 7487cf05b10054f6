use crate::runtime::{
    config::EngineConfig,
    engine::Engine,
    error::{BAD_ARGUMENT, INDEX_OUT_OF_BOUNDS, TYPE_MISMATCH},
    test_support::{Double, atom, call},
    value::Value,
};

fn ints(values: &[i64]) -> Value {
    Value::list_of(values.iter().map(|&n| Value::Integer(n)))
}

#[test]
fn create_splices_list_arguments() {
    let result = Engine::new()
        .eval(&call(
            "create$",
            [atom("a"), ints(&[1, 2]), call("+", [Value::Integer(1), Value::Integer(2)])],
        ))
        .unwrap();
    assert_eq!(
        result,
        Value::list_of([atom("a"), Value::Integer(1), Value::Integer(2), Value::Integer(3)])
    );
}

#[test]
fn create_uses_the_configured_capacity() {
    let mut engine = Engine::with_config(EngineConfig {
        sequence_capacity: 2,
        ..EngineConfig::default()
    });
    let Value::List(list) = engine.eval(&call("create$", [])).unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(list.borrow().capacity(), 2);
    assert!(list.borrow().is_empty());
}

#[test]
fn nth_is_one_based() {
    let mut engine = Engine::new();
    let list = ints(&[10, 20, 30]);

    assert_eq!(
        engine
            .eval(&call("nth$", [Value::Integer(1), list.clone()]))
            .unwrap(),
        Value::Integer(10)
    );
    assert_eq!(
        engine
            .eval(&call("nth$", [Value::Integer(3), list.clone()]))
            .unwrap(),
        Value::Integer(30)
    );

    let err = engine
        .eval(&call("nth$", [Value::Integer(4), list.clone()]))
        .unwrap_err();
    assert_eq!(err.code(), INDEX_OUT_OF_BOUNDS);
    assert_eq!(err.call.as_deref(), Some("(nth$ 4 (10 20 30))"));

    let err = engine
        .eval(&call("nth$", [Value::Integer(0), list]))
        .unwrap_err();
    assert_eq!(err.code(), BAD_ARGUMENT);
}

#[test]
fn length_counts_elements() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.eval(&call("length$", [ints(&[1, 2, 3])])).unwrap(),
        Value::Integer(3)
    );

    let err = engine
        .eval(&call("length$", [Value::Integer(3)]))
        .unwrap_err();
    assert_eq!(err.code(), TYPE_MISMATCH);
}

#[test]
fn list_function_reflects_the_live_registry() {
    let mut engine = Engine::new();
    let before = engine.eval(&call("list-function$", [])).unwrap();
    engine.add_userfunction(Double::default());
    let after = engine.eval(&call("list-function$", [])).unwrap();

    let Value::List(before) = before else {
        panic!("expected a list");
    };
    let Value::List(after) = after else {
        panic!("expected a list");
    };
    assert_eq!(after.borrow().len(), before.borrow().len() + 1);
    assert!(after.borrow().iter().any(|name| name.is_atom("double")));
    assert!(after.borrow().iter().any(|name| name.is_atom("advise")));
}
