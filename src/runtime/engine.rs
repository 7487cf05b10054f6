use std::rc::Rc;

use tracing::debug;

use crate::runtime::{
    builtins,
    callable::{Callable, Flow},
    config::EngineConfig,
    context::Context,
    error::{RuntimeError, UNDEFINED_FUNCTION},
    function::Function,
    registry::FunctionRegistry,
    value::Value,
    value_sequence::ValueSequence,
};

/// Function registry plus configuration; the entry point for top-level calls.
///
/// Every call creates a fresh [`Context`] that borrows the engine mutably
/// for its duration, so functions can install or remove advice while
/// running.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: FunctionRegistry,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with the built-in functions and the `advise` /
    /// `unadvise` commands installed.
    pub fn with_config(config: EngineConfig) -> Self {
        let mut registry = FunctionRegistry::new();
        builtins::install_builtins(&mut registry);
        debug!(functions = registry.len(), "engine created");
        Self { registry, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn find_function(&self, name: &str) -> Option<Rc<Function>> {
        self.registry.find(name).cloned()
    }

    /// Installs `function` under its name, replacing any prior occupant.
    pub fn install_function(&mut self, function: Rc<Function>) {
        self.registry.install(function);
    }

    pub fn add_userfunction(&mut self, callable: impl Callable + 'static) {
        self.install_function(Function::native(callable));
    }

    /// Live listing of every installed function name, as atoms.
    pub fn list_all_function_names(&self) -> ValueSequence {
        let mut names = self.new_sequence();
        for name in self.registry.names() {
            names.add(Value::atom(name));
        }
        names
    }

    pub fn new_sequence(&self) -> ValueSequence {
        ValueSequence::with_capacity(self.config.sequence_capacity)
    }

    /// Calls `name` with already-resolved `args`.
    ///
    /// An early return requested anywhere in the call is answered as the
    /// call's value.
    pub fn call(
        &mut self,
        name: &str,
        args: impl IntoIterator<Item = Value>,
    ) -> Result<Value, RuntimeError> {
        let mut call = self.new_sequence();
        call.add(Value::atom(name));
        for arg in args {
            call.add(arg);
        }

        let function = self.find_function(name).ok_or_else(|| {
            RuntimeError::callee(
                "Engine::call",
                UNDEFINED_FUNCTION,
                format!("no such function: {}", name),
            )
        })?;

        let mut ctx = Context::new(self);
        function
            .invoke(&call, &mut ctx)
            .map(Flow::into_value)
            .map_err(|err| err.with_call(|| call.diagnostic_rendering()))
    }

    /// Evaluates `expr` in a fresh top-level context.
    pub fn eval(&mut self, expr: &Value) -> Result<Value, RuntimeError> {
        let mut ctx = Context::new(self);
        expr.resolve(&mut ctx)
    }
}
