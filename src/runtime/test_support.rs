use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::runtime::{
    callable::{CallResult, Callable, Flow},
    context::Context,
    error::{BAD_ARGUMENT, RuntimeError},
    value::Value,
    value_sequence::ValueSequence,
};

/// `(double n)` answering `2n` and recording every argument list it saw.
#[derive(Default, Clone)]
pub(crate) struct Double {
    pub calls: Rc<RefCell<Vec<ValueSequence>>>,
}

impl Double {
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Callable for Double {
    fn name(&self) -> &str {
        "double"
    }

    fn call(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        self.calls.borrow_mut().push(args.clone());
        let n = args.get(1)?.int_value(ctx)?;
        Ok(Flow::Value(Value::Integer(n * 2)))
    }
}

/// Counts its calls and answers `nil`.
#[derive(Clone)]
pub(crate) struct Tally {
    pub name: &'static str,
    pub count: Rc<Cell<usize>>,
}

impl Tally {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            count: Rc::new(Cell::new(0)),
        }
    }
}

impl Callable for Tally {
    fn name(&self) -> &str {
        self.name
    }

    fn call(&self, _args: &ValueSequence, _ctx: &mut Context<'_>) -> CallResult {
        self.count.set(self.count.get() + 1);
        Ok(Flow::Value(Value::nil()))
    }
}

/// Records the in-advice flag each time it runs.
#[derive(Default, Clone)]
pub(crate) struct Probe {
    pub seen: Rc<RefCell<Vec<bool>>>,
}

impl Callable for Probe {
    fn name(&self) -> &str {
        "probe"
    }

    fn call(&self, _args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        self.seen.borrow_mut().push(ctx.in_advice());
        Ok(Flow::Value(Value::true_atom()))
    }
}

/// Always fails.
pub(crate) struct Fail;

impl Callable for Fail {
    fn name(&self) -> &str {
        "fail"
    }

    fn call(&self, _args: &ValueSequence, _ctx: &mut Context<'_>) -> CallResult {
        Err(RuntimeError::callee("fail", BAD_ARGUMENT, "boom"))
    }
}

/// Panics when called.
pub(crate) struct Explode;

impl Callable for Explode {
    fn name(&self) -> &str {
        "explode"
    }

    fn call(&self, _args: &ValueSequence, _ctx: &mut Context<'_>) -> CallResult {
        panic!("explode called");
    }
}

pub(crate) fn atom(name: &str) -> Value {
    Value::atom(name)
}

pub(crate) fn call(name: &str, args: impl IntoIterator<Item = Value>) -> Value {
    Value::funcall(name, args)
}

pub(crate) fn var(name: &str) -> Value {
    Value::variable(name)
}
