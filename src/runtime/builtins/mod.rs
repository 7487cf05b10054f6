use crate::runtime::{
    builtin_function::BuiltinFunction, function::Function, registry::FunctionRegistry,
};

mod advice_ops;
mod control_ops;
mod helpers;
mod list_ops;
mod numeric_ops;

pub use advice_ops::{ADVISE, AdviceCommand, UNADVISE};

use control_ops::{builtin_bind, builtin_eq, builtin_if, builtin_progn, builtin_return};
use list_ops::{builtin_create, builtin_length, builtin_list_functions, builtin_nth};
use numeric_ops::{builtin_add, builtin_multiply, builtin_subtract};

/// Ordinary built-in functions installed into every engine.
pub static BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "return",
        func: builtin_return,
    },
    BuiltinFunction {
        name: "bind",
        func: builtin_bind,
    },
    BuiltinFunction {
        name: "progn",
        func: builtin_progn,
    },
    BuiltinFunction {
        name: "if",
        func: builtin_if,
    },
    BuiltinFunction {
        name: "eq",
        func: builtin_eq,
    },
    BuiltinFunction {
        name: "create$",
        func: builtin_create,
    },
    BuiltinFunction {
        name: "nth$",
        func: builtin_nth,
    },
    BuiltinFunction {
        name: "length$",
        func: builtin_length,
    },
    BuiltinFunction {
        name: "list-function$",
        func: builtin_list_functions,
    },
    BuiltinFunction {
        name: "+",
        func: builtin_add,
    },
    BuiltinFunction {
        name: "-",
        func: builtin_subtract,
    },
    BuiltinFunction {
        name: "*",
        func: builtin_multiply,
    },
];

/// Installs the built-in table and both advice commands.
pub fn install_builtins(registry: &mut FunctionRegistry) {
    for builtin in BUILTINS {
        registry.install(Function::native(builtin.clone()));
    }
    registry.install(Function::native(AdviceCommand::new(ADVISE)));
    registry.install(Function::native(AdviceCommand::new(UNADVISE)));
}

#[cfg(test)]
mod advice_ops_test;
#[cfg(test)]
mod list_ops_test;
