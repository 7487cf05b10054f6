use std::{fmt, rc::Rc};

use crate::runtime::{
    advice::{Advice, AdviceKind},
    callable::{CallResult, Callable},
    context::Context,
    value_sequence::ValueSequence,
};

/// Entry of the function registry: a base callable, or an advice layer
/// wrapping another entry.
///
/// Entries are immutable once shared; installing or removing advice builds a
/// new chain that reuses the untouched inner entries.
#[derive(Clone)]
pub enum Function {
    Native(Rc<dyn Callable>),
    Advised(Advice),
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Native(callable) => write!(f, "Native({})", callable.name()),
            Function::Advised(advice) => write!(f, "{:?}", advice),
        }
    }
}

impl Function {
    pub fn native(callable: impl Callable + 'static) -> Rc<Function> {
        Rc::new(Function::Native(Rc::new(callable)))
    }

    pub fn advised(advice: Advice) -> Rc<Function> {
        Rc::new(Function::Advised(advice))
    }

    pub fn name(&self) -> &str {
        match self {
            Function::Native(callable) => callable.name(),
            Function::Advised(advice) => advice.name(),
        }
    }

    pub fn invoke(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        match self {
            Function::Native(callable) => callable.call(args, ctx),
            Function::Advised(advice) => advice.invoke(args, ctx),
        }
    }

    pub fn advice(&self) -> Option<&Advice> {
        match self {
            Function::Advised(advice) => Some(advice),
            Function::Native(_) => None,
        }
    }

    pub fn is_advised(&self) -> bool {
        self.advice().is_some()
    }

    /// Advice layers from the outermost inward.
    pub fn layers(&self) -> Vec<&Advice> {
        let mut layers = Vec::new();
        let mut current = self;
        while let Function::Advised(advice) = current {
            layers.push(advice);
            current = advice.function().as_ref();
        }
        layers
    }

    /// Removes the outermost advice layer, if any.
    pub fn strip_advice(function: &Rc<Function>) -> Rc<Function> {
        match &**function {
            Function::Advised(advice) => advice.function().clone(),
            Function::Native(_) => function.clone(),
        }
    }

    /// The base callable beneath every advice layer.
    pub fn unadvised(function: &Rc<Function>) -> Rc<Function> {
        let mut current = function.clone();
        while let Function::Advised(advice) = &*current {
            let inner = advice.function().clone();
            current = inner;
        }
        current
    }

    /// Rebuilds the chain without its outermost layer of `kind`.
    ///
    /// Layers above the removed one are rewrapped around what was beneath
    /// it; the chain is returned unchanged when no layer has that kind.
    pub fn without_kind(function: &Rc<Function>, kind: AdviceKind) -> Rc<Function> {
        match &**function {
            Function::Native(_) => function.clone(),
            Function::Advised(advice) if advice.kind() == kind => advice.function().clone(),
            Function::Advised(advice) => {
                let inner = Function::without_kind(advice.function(), kind);
                if Rc::ptr_eq(&inner, advice.function()) {
                    function.clone()
                } else {
                    Function::advised(advice.rewrap(inner))
                }
            }
        }
    }
}
