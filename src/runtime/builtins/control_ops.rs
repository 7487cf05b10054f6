use crate::runtime::{
    callable::{CallResult, Flow},
    context::Context,
    value::Value,
    value_sequence::ValueSequence,
};

use super::helpers::{
    arguments, bad_argument, check_arity, check_arity_range, check_min_arity, type_error,
};

pub(super) fn builtin_return(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_arity_range(args, 0, 1, "return", "(return [<value>])")?;
    let value = if args.len() > 1 {
        args.get(1)?.resolve(ctx)?
    } else {
        Value::nil()
    };
    Ok(Flow::Return(value))
}

pub(super) fn builtin_bind(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_arity(args, 2, "bind", "(bind ?<name> <value>)")?;
    let name = match args.get(1)? {
        Value::Variable(name) => name.clone(),
        other => return Err(type_error("bind", "first argument", "VARIABLE", other)),
    };
    let value = args.get(2)?.resolve(ctx)?;
    ctx.set_variable(&name, value.clone());
    Ok(Flow::Value(value))
}

pub(super) fn builtin_progn(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    run_body(arguments(args), ctx)
}

/// `(if <condition> then <action>* [else <action>*])`
pub(super) fn builtin_if(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_min_arity(args, 2, "if", "(if <condition> then <action>* [else <action>*])")?;
    if !args.get(2)?.is_atom("then") {
        return Err(bad_argument("if", "expected `then` after the condition"));
    }

    let condition = args.get(1)?.resolve(ctx)?;
    let rest = &args.as_slice()[3..];
    let split = rest
        .iter()
        .position(|value| value.is_atom("else"))
        .unwrap_or(rest.len());

    if condition.is_truthy() {
        run_body(&rest[..split], ctx)
    } else if split < rest.len() {
        run_body(&rest[split + 1..], ctx)
    } else {
        Ok(Flow::Value(Value::false_atom()))
    }
}

pub(super) fn builtin_eq(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_min_arity(args, 2, "eq", "(eq <value> <value>+)")?;
    let first = args.get(1)?.resolve(ctx)?;
    for arg in &args.as_slice()[2..] {
        if arg.resolve(ctx)? != first {
            return Ok(Flow::Value(Value::false_atom()));
        }
    }
    Ok(Flow::Value(Value::true_atom()))
}

/// Evaluates `body` in order; an early return stops it and is passed on.
fn run_body(body: &[Value], ctx: &mut Context<'_>) -> CallResult {
    let mut last = Value::nil();
    for action in body {
        match action.evaluate(ctx)? {
            Flow::Value(value) => last = value,
            early @ Flow::Return(_) => return Ok(early),
        }
    }
    Ok(Flow::Value(last))
}
