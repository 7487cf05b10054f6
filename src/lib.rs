pub mod runtime;

pub use runtime::{
    advice::{Advice, AdviceKind},
    callable::{CallResult, Callable, Flow},
    config::EngineConfig,
    context::Context,
    engine::Engine,
    error::{ErrorKind, RuntimeError},
    function::Function,
    image::EngineImage,
    listener::FunctionListener,
    value::{ListRef, Value, ValueType},
    value_sequence::ValueSequence,
};
