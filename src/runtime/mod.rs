//! Function invocation and advice for the rule language runtime.
//!
//! # Calling convention
//! Every argument sequence carries the called function's name at index 0,
//! followed by the unresolved arguments. Callables resolve what they use
//! against the [`context::Context`] they are handed.
//!
//! # Advice chains
//! A registry slot holds either a base callable or an [`advice::Advice`]
//! layer wrapping another entry. Chains are immutable `Rc` graphs: `advise`
//! and `unadvise` build a new chain and install it, so a chain that is
//! currently executing is never modified underneath itself.
//!
//! # No-Cycle Invariant
//! List values share their sequence through `Rc<RefCell<_>>`. Nothing in
//! the runtime creates a list that contains itself, and renderers and the
//! engine image reject one built by hand instead of looping.
use crate::runtime::{callable::CallResult, context::Context, value_sequence::ValueSequence};

pub mod advice;
pub mod builtin_function;
pub mod builtins;
pub mod callable;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod function;
pub mod image;
pub mod listener;
pub mod registry;
pub mod value;
pub mod value_sequence;

pub type BuiltinFn = fn(&ValueSequence, &mut Context<'_>) -> CallResult;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod listener_test;
