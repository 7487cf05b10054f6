use tracing::debug;

use crate::runtime::{
    advice::{Advice, AdviceKind},
    callable::{CallResult, Callable, Flow},
    context::Context,
    error::RuntimeError,
    function::Function,
    value::Value,
    value_sequence::ValueSequence,
};

use super::helpers::{bad_argument, check_arity, check_min_arity};

pub const ADVISE: &str = "advise";
pub const UNADVISE: &str = "unadvise";

/// The `advise` / `unadvise` meta-command.
///
/// One type serves both names; the name it was constructed under selects
/// the behaviour.
///
/// ```text
/// (advise before|after <name-or-list-or-ALL> <action>*)
/// (unadvise <name-or-list-or-ALL>)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceCommand {
    name: String,
}

impl AdviceCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn advise(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> Result<(), RuntimeError> {
        check_min_arity(
            args,
            2,
            ADVISE,
            "(advise before|after <function-or-list-or-ALL> <action>*)",
        )?;
        let kind_name = args.get(1)?.atom_value(ctx)?;
        let kind = AdviceKind::parse(&kind_name).ok_or_else(|| {
            bad_argument(
                ADVISE,
                format!("advice kind must be `before` or `after`, got `{}`", kind_name),
            )
        })?;
        let targets = target_names(args.get(2)?, ctx)?;
        let actions = &args.as_slice()[3..];

        for target in &targets {
            let name = target.atom_value(ctx)?;
            let current = ctx
                .engine()
                .find_function(&name)
                .ok_or_else(|| RuntimeError::definition_order(ADVISE, &*name))?;

            let peeled = Function::without_kind(&current, kind);
            let mut advice = Advice::new(kind, peeled);
            for action in actions {
                advice.add_action(action.clone());
            }

            debug!(function = %name, %kind, actions = actions.len(), "installing advice");
            ctx.engine_mut().install_function(Function::advised(advice));
        }
        Ok(())
    }

    fn unadvise(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> Result<(), RuntimeError> {
        check_arity(args, 1, UNADVISE, "(unadvise <function-or-list-or-ALL>)")?;
        let targets = target_names(args.get(1)?, ctx)?;

        for target in &targets {
            let name = target.atom_value(ctx)?;
            let current = ctx
                .engine()
                .find_function(&name)
                .ok_or_else(|| RuntimeError::definition_order(UNADVISE, &*name))?;

            if current.is_advised() {
                debug!(function = %name, "removing advice layer");
                ctx.engine_mut()
                    .install_function(Function::strip_advice(&current));
            }
        }
        Ok(())
    }
}

impl Callable for AdviceCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: &ValueSequence, ctx: &mut Context<'_>) -> CallResult {
        if self.name == ADVISE {
            self.advise(args, ctx)?;
        } else {
            self.unadvise(args, ctx)?;
        }
        Ok(Flow::Value(Value::true_atom()))
    }
}

/// Resolves a target argument into the names it selects.
///
/// A list is taken verbatim, the all-selector atom expands to every name
/// installed right now, and anything else is a single name.
fn target_names(arg: &Value, ctx: &mut Context<'_>) -> Result<ValueSequence, RuntimeError> {
    let value = arg.resolve(ctx)?;
    if let Value::List(list) = &value {
        return Ok(list.snapshot());
    }
    if value.is_atom(&ctx.engine().config().all_selector) {
        return Ok(ctx.engine().list_all_function_names());
    }
    let mut names = ctx.engine().new_sequence();
    names.add(value);
    Ok(names)
}
