use crate::runtime::{
    context::Context, error::RuntimeError, value::Value, value_sequence::ValueSequence,
};

/// Outcome of evaluating an expression or invoking a callable.
///
/// `Return` carries an early return requested by `(return ...)`. It travels
/// outward through statement positions until an advice layer or the
/// top-level call consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Value(Value),
    Return(Value),
}

impl Flow {
    pub fn value(&self) -> &Value {
        match self {
            Flow::Value(value) | Flow::Return(value) => value,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Flow::Value(value) | Flow::Return(value) => value,
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Flow::Return(_))
    }
}

pub type CallResult = Result<Flow, RuntimeError>;

/// Capability shared by every function the language can call.
pub trait Callable {
    /// Stable name, used for registry placement and diagnostics.
    fn name(&self) -> &str;

    /// Invokes the function.
    ///
    /// `args` holds the function name at index 0 followed by the arguments,
    /// unresolved. Resolve an argument before forwarding, storing, or
    /// returning it.
    fn call(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult;
}
