use tracing::error;

use crate::runtime::{
    engine::Engine,
    error::RuntimeError,
    value::Value,
};

/// Forwards host events into a named function of an engine.
///
/// Every received event becomes the single argument of a call to the
/// function, so advice installed on that function sees the events too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionListener {
    function: String,
}

impl FunctionListener {
    /// Connects to `function`, which must already be installed in `engine`.
    pub fn new(function: impl Into<String>, engine: &Engine) -> Result<Self, RuntimeError> {
        let function = function.into();
        if engine.find_function(&function).is_none() {
            return Err(RuntimeError::definition_order(
                "FunctionListener::new",
                function,
            ));
        }
        Ok(Self { function })
    }

    pub fn function_name(&self) -> &str {
        &self.function
    }

    pub fn receive_event(&self, engine: &mut Engine, event: Value) -> Result<Value, RuntimeError> {
        engine.call(&self.function, [event]).inspect_err(|err| {
            error!(function = %self.function, "event handler failed: {}", err);
        })
    }
}
