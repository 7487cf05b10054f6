use crate::runtime::{
    advice::AdviceKind,
    engine::Engine,
    error::{BAD_ARGUMENT, WRONG_NUMBER_OF_ARGUMENTS},
    test_support::{Double, Tally, atom, call},
    value::Value,
};

fn engine_with(functions: &[&'static str]) -> (Engine, Double) {
    let double = Double::default();
    let mut engine = Engine::new();
    engine.add_userfunction(double.clone());
    for &name in functions {
        engine.add_userfunction(Tally::new(name));
    }
    (engine, double)
}

fn kinds(engine: &Engine, name: &str) -> Vec<AdviceKind> {
    engine
        .find_function(name)
        .unwrap()
        .layers()
        .iter()
        .map(|advice| advice.kind())
        .collect()
}

fn advise(kind: &str, target: Value, actions: impl IntoIterator<Item = Value>) -> Value {
    call(
        "advise",
        [atom(kind), target].into_iter().chain(actions),
    )
}

#[test]
fn advise_answers_true_and_installs_a_layer() {
    let (mut engine, _double) = engine_with(&[]);
    let result = engine
        .eval(&advise("before", atom("double"), []))
        .unwrap();

    assert_eq!(result, Value::true_atom());
    assert_eq!(kinds(&engine, "double"), vec![AdviceKind::Before]);
}

#[test]
fn advising_the_same_kind_replaces_the_layer() {
    let (mut engine, _double) = engine_with(&[]);
    engine
        .eval(&advise("after", atom("double"), [call("return", [Value::Integer(1)])]))
        .unwrap();
    engine
        .eval(&advise("after", atom("double"), [call("return", [Value::Integer(2)])]))
        .unwrap();

    assert_eq!(kinds(&engine, "double"), vec![AdviceKind::After]);
    assert_eq!(
        engine.call("double", [Value::Integer(5)]).unwrap(),
        Value::Integer(2)
    );
}

#[test]
fn different_kinds_stack_and_readvising_moves_a_layer_out() {
    let (mut engine, _double) = engine_with(&[]);
    engine.eval(&advise("before", atom("double"), [])).unwrap();
    engine.eval(&advise("after", atom("double"), [])).unwrap();
    assert_eq!(
        kinds(&engine, "double"),
        vec![AdviceKind::After, AdviceKind::Before]
    );

    engine.eval(&advise("before", atom("double"), [])).unwrap();
    assert_eq!(
        kinds(&engine, "double"),
        vec![AdviceKind::Before, AdviceKind::After]
    );
}

#[test]
fn unknown_kind_is_a_bad_argument() {
    let (mut engine, _double) = engine_with(&[]);
    let err = engine
        .eval(&advise("around", atom("double"), []))
        .unwrap_err();

    assert_eq!(err.code(), BAD_ARGUMENT);
    assert!(err.to_string().contains("got `around`"));
}

#[test]
fn advising_an_undefined_function_is_a_definition_order_error() {
    let (mut engine, _double) = engine_with(&[]);
    let err = engine
        .eval(&advise("before", atom("nosuch"), []))
        .unwrap_err();

    assert!(err.is_definition_order());
    insta::assert_snapshot!(err.to_string(), @r"
    advise: cannot advise a function before defining it: nosuch
      while executing (advise before nosuch)
    ");
}

#[test]
fn list_targets_advise_each_name() {
    let (mut engine, double) = engine_with(&["hits", "other"]);
    engine
        .eval(&advise(
            "before",
            call("create$", [atom("double"), atom("other")]),
            [call("hits", [])],
        ))
        .unwrap();

    assert_eq!(kinds(&engine, "double"), vec![AdviceKind::Before]);
    assert_eq!(kinds(&engine, "other"), vec![AdviceKind::Before]);
    assert!(kinds(&engine, "hits").is_empty());

    engine.call("double", [Value::Integer(2)]).unwrap();
    assert_eq!(double.count(), 1);
}

#[test]
fn a_missing_name_in_a_list_stops_after_earlier_targets() {
    let (mut engine, _double) = engine_with(&[]);
    let err = engine
        .eval(&advise(
            "before",
            Value::list_of([atom("double"), atom("nosuch")]),
            [],
        ))
        .unwrap_err();

    assert!(err.is_definition_order());
    assert_eq!(kinds(&engine, "double"), vec![AdviceKind::Before]);
}

#[test]
fn all_selector_advises_every_installed_function() {
    let (mut engine, _double) = engine_with(&["hits"]);
    engine
        .eval(&advise("before", atom("ALL"), [call("hits", [])]))
        .unwrap();

    for (name, function) in engine.registry().iter() {
        assert!(function.is_advised(), "{} should be advised", name);
    }

    engine.eval(&call("unadvise", [atom("ALL")])).unwrap();
    for (name, function) in engine.registry().iter() {
        assert!(!function.is_advised(), "{} should be plain", name);
    }
}

#[test]
fn unadvise_strips_the_outermost_layer_only() {
    let (mut engine, _double) = engine_with(&[]);
    engine.eval(&advise("before", atom("double"), [])).unwrap();
    engine.eval(&advise("after", atom("double"), [])).unwrap();

    engine.eval(&call("unadvise", [atom("double")])).unwrap();
    assert_eq!(kinds(&engine, "double"), vec![AdviceKind::Before]);

    engine.eval(&call("unadvise", [atom("double")])).unwrap();
    assert!(kinds(&engine, "double").is_empty());

    let result = engine.eval(&call("unadvise", [atom("double")])).unwrap();
    assert_eq!(result, Value::true_atom());
    assert!(kinds(&engine, "double").is_empty());
}

#[test]
fn unadvise_checks_arity_and_definition() {
    let (mut engine, _double) = engine_with(&[]);
    let err = engine.eval(&call("unadvise", [])).unwrap_err();
    assert_eq!(err.code(), WRONG_NUMBER_OF_ARGUMENTS);

    let err = engine
        .eval(&call("unadvise", [atom("nosuch")]))
        .unwrap_err();
    assert!(err.is_definition_order());
}
