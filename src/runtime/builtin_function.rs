use std::fmt;

use crate::runtime::{
    BuiltinFn,
    callable::{CallResult, Callable},
    context::Context,
    value_sequence::ValueSequence,
};

#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.name)
    }
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Callable for BuiltinFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn call(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        (self.func)(args, ctx)
    }
}
