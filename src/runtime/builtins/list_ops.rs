use crate::runtime::{
    callable::{CallResult, Flow},
    context::Context,
    value::Value,
    value_sequence::ValueSequence,
};

use super::helpers::{arguments, bad_argument, check_arity, type_error};

/// `(create$ <value>*)`; list arguments are spliced in.
pub(super) fn builtin_create(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    let mut list = ctx.engine().new_sequence();
    for arg in arguments(args) {
        match arg.resolve(ctx)? {
            Value::List(inner) => {
                for value in inner.borrow().iter() {
                    list.add(value.clone());
                }
            }
            value => {
                list.add(value);
            }
        }
    }
    Ok(Flow::Value(Value::list(list)))
}

/// `(nth$ <index> <list>)` with a 1-based index.
pub(super) fn builtin_nth(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_arity(args, 2, "nth$", "(nth$ <index> <list>)")?;
    let index = args.get(1)?.int_value(ctx)?;
    let list = args.get(2)?.list_value(ctx)?;
    if index < 1 {
        return Err(bad_argument(
            "nth$",
            format!("index must be at least 1, got {}", index),
        ));
    }
    let value = list.borrow().get(index as usize - 1)?.clone();
    Ok(Flow::Value(value))
}

pub(super) fn builtin_length(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_arity(args, 1, "length$", "(length$ <list>)")?;
    match args.get(1)?.resolve(ctx)? {
        Value::List(list) => Ok(Flow::Value(Value::Integer(list.borrow().len() as i64))),
        other => Err(type_error("length$", "argument", "LIST", &other)),
    }
}

pub(super) fn builtin_list_functions(args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
    check_arity(args, 0, "list-function$", "(list-function$)")?;
    Ok(Flow::Value(Value::list(
        ctx.engine().list_all_function_names(),
    )))
}
