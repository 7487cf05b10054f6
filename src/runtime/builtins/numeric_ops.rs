use crate::runtime::{
    callable::{CallResult, Flow},
    context::Context,
    error::RuntimeError,
    value::Value,
    value_sequence::ValueSequence,
};

use super::helpers::{arguments, check_min_arity, type_error};

enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(n) => *n as f64,
            Number::Float(n) => *n,
        }
    }
}

fn numbers(
    args: &ValueSequence,
    ctx: &mut Context<'_>,
    name: &str,
) -> Result<Vec<Number>, RuntimeError> {
    let mut out = Vec::with_capacity(args.len());
    for arg in arguments(args) {
        match arg.resolve(ctx)? {
            Value::Integer(n) => out.push(Number::Integer(n)),
            Value::Float(n) => out.push(Number::Float(n)),
            other => return Err(type_error(name, "argument", "number", &other)),
        }
    }
    Ok(out)
}

/// Folds the arguments with `int_op` while every operand is an integer and
/// with `float_op` from the first float on.
fn fold(
    values: Vec<Number>,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    let mut iter = values.into_iter();
    let mut acc = match iter.next() {
        Some(first) => first,
        None => return Value::Integer(0),
    };
    for next in iter {
        acc = match (acc, next) {
            (Number::Integer(a), Number::Integer(b)) => Number::Integer(int_op(a, b)),
            (a, b) => Number::Float(float_op(a.as_f64(), b.as_f64())),
        };
    }
    match acc {
        Number::Integer(n) => Value::Integer(n),
        Number::Float(n) => Value::Float(n),
    }
}

pub(super) fn builtin_add(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_min_arity(args, 1, "+", "(+ <number>+)")?;
    let values = numbers(args, ctx, "+")?;
    Ok(Flow::Value(fold(values, i64::wrapping_add, |a, b| a + b)))
}

pub(super) fn builtin_subtract(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_min_arity(args, 1, "-", "(- <number>+)")?;
    let values = numbers(args, ctx, "-")?;
    if let [Number::Integer(n)] = values.as_slice() {
        return Ok(Flow::Value(Value::Integer(n.wrapping_neg())));
    }
    if let [Number::Float(n)] = values.as_slice() {
        return Ok(Flow::Value(Value::Float(-n)));
    }
    Ok(Flow::Value(fold(values, i64::wrapping_sub, |a, b| a - b)))
}

pub(super) fn builtin_multiply(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_min_arity(args, 1, "*", "(* <number>+)")?;
    let values = numbers(args, ctx, "*")?;
    Ok(Flow::Value(fold(values, i64::wrapping_mul, |a, b| a * b)))
}
