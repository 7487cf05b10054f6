use std::{fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::runtime::{
    callable::{CallResult, Flow},
    context::Context,
    error::{ADVICE_TRAIL, RuntimeError},
    function::Function,
    value::{ListRef, Value},
    value_sequence::ValueSequence,
};

/// Variable bound to the argument list while before-advice runs.
pub const ARGV: &str = "argv";
/// Variable bound to the wrapped function's result while after-advice runs.
pub const RETVAL: &str = "retval";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceKind {
    Before,
    After,
}

impl AdviceKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "before" => Some(AdviceKind::Before),
            "after" => Some(AdviceKind::After),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdviceKind::Before => "before",
            AdviceKind::After => "after",
        }
    }
}

impl fmt::Display for AdviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interception layer around exactly one function.
///
/// Actions are kept unresolved and evaluated afresh on every invocation.
/// The layer answers to the wrapped function's name, so installing it is
/// invisible to lookups by name.
#[derive(Clone)]
pub struct Advice {
    kind: AdviceKind,
    function: Rc<Function>,
    actions: Vec<Value>,
}

impl fmt::Debug for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Advice({} {}, {} actions) -> {:?}",
            self.kind,
            self.name(),
            self.actions.len(),
            self.function
        )
    }
}

enum Intercept {
    Answer(Value),
    Proceed(ValueSequence),
}

impl Advice {
    pub fn new(kind: AdviceKind, function: Rc<Function>) -> Self {
        Self {
            kind,
            function,
            actions: Vec::new(),
        }
    }

    pub fn with_actions(kind: AdviceKind, function: Rc<Function>, actions: Vec<Value>) -> Self {
        Self {
            kind,
            function,
            actions,
        }
    }

    pub fn kind(&self) -> AdviceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        self.function.name()
    }

    /// The wrapped function.
    pub fn function(&self) -> &Rc<Function> {
        &self.function
    }

    pub fn actions(&self) -> &[Value] {
        &self.actions
    }

    pub fn add_action(&mut self, action: Value) {
        self.actions.push(action);
    }

    /// Same kind and actions around a different function.
    pub(crate) fn rewrap(&self, function: Rc<Function>) -> Advice {
        Advice::with_actions(self.kind, function, self.actions.clone())
    }

    pub fn invoke(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        trace!(function = self.name(), kind = %self.kind, "entering advice");
        let result = match self.kind {
            AdviceKind::Before => self.run_before(args, ctx),
            AdviceKind::After => self.run_after(args, ctx),
        };
        result.map_err(|err| err.with_trail(ADVICE_TRAIL))
    }

    fn run_before(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        let intercept = ctx.advice_frame(|ctx| {
            ctx.set_variable(ARGV, Value::List(ListRef::new(args.clone())));
            if let Some(answer) = self.run_actions(ctx)? {
                return Ok(Intercept::Answer(answer));
            }
            let argv = ctx.variable(ARGV)?;
            argv.sequence_value(ctx).map(Intercept::Proceed)
        })?;

        match intercept {
            Intercept::Answer(value) => Ok(Flow::Value(value)),
            Intercept::Proceed(argv) => self.function.invoke(&argv, ctx),
        }
    }

    fn run_after(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        let retval = self.function.invoke(args, ctx)?;
        let answer = ctx.advice_frame(|ctx| {
            ctx.set_variable(RETVAL, retval.value().clone());
            self.run_actions(ctx)
        })?;

        match answer {
            Some(value) => Ok(Flow::Value(value)),
            None => Ok(retval),
        }
    }

    /// Evaluates the actions in order. The first early return stops
    /// evaluation and is consumed here.
    fn run_actions(&self, ctx: &mut Context<'_>) -> Result<Option<Value>, RuntimeError> {
        for action in &self.actions {
            if let Flow::Return(value) = action.evaluate(ctx)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}
