use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use crate::runtime::{
    callable::CallResult,
    engine::Engine,
    error::{RuntimeError, UNBOUND_VARIABLE, UNDEFINED_FUNCTION},
    function::Function,
    value::{ListRef, Value},
};

/// Execution scope of one top-level call.
///
/// Holds the variable binding frames visible to the expression being
/// evaluated, the in-advice flag, and the engine whose registry call
/// expressions are dispatched through. Threaded by `&mut` through every nested
/// call and dropped when the top-level call returns.
pub struct Context<'e> {
    engine: &'e mut Engine,
    frames: Vec<HashMap<String, Value>>,
    in_advice: bool,
}

impl<'e> Context<'e> {
    pub fn new(engine: &'e mut Engine) -> Self {
        Self {
            engine,
            frames: vec![HashMap::new()],
            in_advice: false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &*self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut *self.engine
    }

    pub fn in_advice(&self) -> bool {
        self.in_advice
    }

    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    /// Looks a binding up, innermost frame first.
    pub fn find_variable(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn variable(&self, name: &str) -> Result<Value, RuntimeError> {
        self.find_variable(name).cloned().ok_or_else(|| {
            RuntimeError::callee(
                "Context::variable",
                UNBOUND_VARIABLE,
                format!("no such variable ?{}", name),
            )
        })
    }

    /// Binds `name` in the innermost frame.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), value);
        }
    }

    /// Runs `body` in a fresh binding frame with the in-advice flag set.
    ///
    /// The frame is popped and the previous flag restored on every exit,
    /// unwinding included, so bindings made inside never leak into the
    /// caller's frame.
    pub fn advice_frame<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.in_advice;
        self.in_advice = true;
        self.frames.push(HashMap::new());

        let mut guard = AdviceFrameGuard { ctx: self, saved };
        body(&mut *guard)
    }

    /// Evaluates the call expression `call` through the registry.
    ///
    /// While advice actions run, the target's advice layers are bypassed
    /// unless the engine is configured to advise calls made inside advice.
    pub fn call(&mut self, call: &ListRef) -> CallResult {
        let args = call.snapshot();
        let name = args.get(0)?.atom_value(self)?;
        let function = self.engine.find_function(&name).ok_or_else(|| {
            RuntimeError::callee(
                "Funcall::execute",
                UNDEFINED_FUNCTION,
                format!("no such function: {}", name),
            )
            .with_call(|| args.diagnostic_rendering())
        })?;

        let function = if self.in_advice && !self.engine.config().advise_inside_advice {
            Function::unadvised(&function)
        } else {
            function
        };

        function
            .invoke(&args, self)
            .map_err(|err| err.with_call(|| args.diagnostic_rendering()))
    }
}

/// Pops the advice frame and restores the saved flag when dropped.
struct AdviceFrameGuard<'a, 'e> {
    ctx: &'a mut Context<'e>,
    saved: bool,
}

impl<'e> Deref for AdviceFrameGuard<'_, 'e> {
    type Target = Context<'e>;

    fn deref(&self) -> &Context<'e> {
        self.ctx
    }
}

impl<'e> DerefMut for AdviceFrameGuard<'_, 'e> {
    fn deref_mut(&mut self) -> &mut Context<'e> {
        self.ctx
    }
}

impl Drop for AdviceFrameGuard<'_, '_> {
    fn drop(&mut self) {
        self.ctx.frames.pop();
        self.ctx.in_advice = self.saved;
    }
}
