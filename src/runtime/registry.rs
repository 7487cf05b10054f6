use std::{collections::BTreeMap, rc::Rc};

use crate::runtime::function::Function;

/// Name-to-function table of an engine.
///
/// Each slot holds the currently active entry for its name: a base callable
/// or an advice chain around one. Slots are created by the first install
/// under a name and are never removed.
#[derive(Debug, Default, Clone)]
pub struct FunctionRegistry {
    slots: BTreeMap<String, Rc<Function>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, name: &str) -> Option<&Rc<Function>> {
        self.slots.get(name)
    }

    /// Installs `function` under its own name, returning the previous
    /// occupant of that slot.
    pub fn install(&mut self, function: Rc<Function>) -> Option<Rc<Function>> {
        self.slots.insert(function.name().to_string(), function)
    }

    /// Every installed name, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<Function>)> {
        self.slots.iter().map(|(name, function)| (name.as_str(), function))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
