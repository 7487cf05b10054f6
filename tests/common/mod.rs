#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use rulecall::{CallResult, Callable, Context, Engine, Flow, Value, ValueSequence};

/// `(double n)` answering `2n`; counts its invocations.
#[derive(Default, Clone)]
pub struct Double {
    pub calls: Rc<Cell<usize>>,
}

impl Callable for Double {
    fn name(&self) -> &str {
        "double"
    }

    fn call(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        self.calls.set(self.calls.get() + 1);
        let n = args.get(1)?.int_value(ctx)?;
        Ok(Flow::Value(Value::Integer(n * 2)))
    }
}

/// `(log <value>*)` appending its resolved arguments to a shared journal.
#[derive(Default, Clone)]
pub struct Log {
    pub entries: Rc<RefCell<Vec<String>>>,
}

impl Log {
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl Callable for Log {
    fn name(&self) -> &str {
        "log"
    }

    fn call(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        let mut line = Vec::new();
        for arg in args.iter().skip(1) {
            line.push(arg.resolve(ctx)?.to_string());
        }
        self.entries.borrow_mut().push(line.join(" "));
        Ok(Flow::Value(Value::nil()))
    }
}

/// Answers its first argument, resolved.
pub struct Echo(pub &'static str);

impl Callable for Echo {
    fn name(&self) -> &str {
        self.0
    }

    fn call(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        args.get(1)?.resolve(ctx).map(Flow::Value)
    }
}

pub fn atom(name: &str) -> Value {
    Value::atom(name)
}

pub fn var(name: &str) -> Value {
    Value::variable(name)
}

pub fn call(name: &str, args: impl IntoIterator<Item = Value>) -> Value {
    Value::funcall(name, args)
}

pub fn advise(kind: &str, target: Value, actions: impl IntoIterator<Item = Value>) -> Value {
    call("advise", [atom(kind), target].into_iter().chain(actions))
}

pub fn unadvise(target: Value) -> Value {
    call("unadvise", [target])
}

/// Engine with `double` and `log` installed.
pub fn engine() -> (Engine, Double, Log) {
    let double = Double::default();
    let log = Log::default();
    let mut engine = Engine::new();
    engine.add_userfunction(double.clone());
    engine.add_userfunction(log.clone());
    (engine, double, log)
}
