use crate::runtime::{
    engine::Engine,
    error::BAD_ARGUMENT,
    listener::FunctionListener,
    test_support::{Double, Fail, Tally, atom, call},
    value::Value,
};

#[test]
fn listener_requires_an_installed_function() {
    let engine = Engine::new();
    let err = FunctionListener::new("on-click", &engine).unwrap_err();

    assert!(err.is_definition_order());
    assert_eq!(err.routine, "FunctionListener::new");
}

#[test]
fn events_become_the_single_argument() {
    let double = Double::default();
    let mut engine = Engine::new();
    engine.add_userfunction(double.clone());
    let listener = FunctionListener::new("double", &engine).unwrap();

    let result = listener
        .receive_event(&mut engine, Value::Integer(21))
        .unwrap();
    assert_eq!(result, Value::Integer(42));
    assert_eq!(listener.function_name(), "double");
    assert_eq!(
        double.calls.borrow()[0].as_slice(),
        &[atom("double"), Value::Integer(21)]
    );
}

#[test]
fn events_pass_through_advice_installed_later() {
    let mut engine = Engine::new();
    let seen = Tally::new("seen");
    engine.add_userfunction(Double::default());
    engine.add_userfunction(seen.clone());
    let listener = FunctionListener::new("double", &engine).unwrap();

    engine
        .eval(&call("advise", [atom("before"), atom("double"), call("seen", [])]))
        .unwrap();
    listener.receive_event(&mut engine, Value::Integer(1)).unwrap();
    listener.receive_event(&mut engine, Value::Integer(2)).unwrap();

    assert_eq!(seen.count.get(), 2);
}

#[test]
fn handler_failures_are_returned() {
    let mut engine = Engine::new();
    engine.add_userfunction(Fail);
    let listener = FunctionListener::new("fail", &engine).unwrap();

    let err = listener
        .receive_event(&mut engine, atom("event"))
        .unwrap_err();
    assert_eq!(err.code(), BAD_ARGUMENT);
    assert_eq!(err.call.as_deref(), Some("(fail event)"));
}
