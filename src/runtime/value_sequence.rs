use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::runtime::{error::RuntimeError, value::Value};

/// Capacity of a sequence built with [`ValueSequence::new`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Growable, index-addressable sequence of values.
///
/// Used both as the argument list of a call (element 0 is the called
/// function's name) and as the payload of list values.
///
/// The backing store always holds `capacity()` slots; only the first
/// `len()` are live. Slots past the logical length keep whatever they held
/// before, so a `set_length` that grows the sequence exposes stale values or
/// the `nil` filler. Callers write those slots before reading them.
#[derive(Debug)]
pub struct ValueSequence {
    slots: Vec<Value>,
    len: usize,
}

impl Default for ValueSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueSequence {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Value::nil(); capacity],
            len: 0,
        }
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let slots: Vec<Value> = values.into_iter().collect();
        let len = slots.len();
        Self { slots, len }
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Result<&Value, RuntimeError> {
        if index >= self.len {
            return Err(RuntimeError::index("get", index, self.diagnostic_rendering()));
        }
        Ok(&self.slots[index])
    }

    pub fn set(&mut self, value: Value, index: usize) -> Result<&mut Self, RuntimeError> {
        if index >= self.len {
            return Err(RuntimeError::index("set", index, self.diagnostic_rendering()));
        }
        self.slots[index] = value;
        Ok(self)
    }

    /// Appends `value`, doubling the backing store when it is full.
    pub fn add(&mut self, value: Value) -> &mut Self {
        if self.len >= self.slots.len() {
            let grown = (self.slots.len() * 2).max(1);
            self.slots.resize(grown, Value::nil());
        }
        self.slots[self.len] = value;
        self.len += 1;
        self
    }

    pub fn set_length(&mut self, len: usize) -> &mut Self {
        if len > self.slots.len() {
            self.slots.resize(len, Value::nil());
        }
        self.len = len;
        self
    }

    /// Makes `target` a shallow copy of this sequence, reusing its storage
    /// when it is large enough.
    pub fn clone_into<'a>(&self, target: &'a mut ValueSequence) -> &'a mut ValueSequence {
        if self.len > target.slots.len() {
            target.slots = vec![Value::nil(); self.len];
        }
        target.slots[..self.len].clone_from_slice(&self.slots[..self.len]);
        target.len = self.len;
        target
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.slots[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.as_slice().iter()
    }

    /// Space-joined rendering of the elements, without parentheses.
    pub fn render_flat(&self) -> Result<String, RuntimeError> {
        let mut out = String::new();
        let mut ancestry = Vec::new();
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            value.write_flat(&mut out, &mut ancestry)?;
        }
        Ok(out)
    }

    /// Canonical rendering with every nested sequence wrapped in parentheses.
    pub fn render_parens(&self) -> Result<String, RuntimeError> {
        let mut out = String::new();
        self.write_parens(&mut out, &mut Vec::new())?;
        Ok(out)
    }

    pub(crate) fn write_parens(
        &self,
        out: &mut String,
        ancestry: &mut Vec<usize>,
    ) -> Result<(), RuntimeError> {
        out.push('(');
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            value.write_parens(out, ancestry)?;
        }
        out.push(')');
        Ok(())
    }

    /// Rendering used inside diagnostics; never fails.
    pub fn diagnostic_rendering(&self) -> String {
        self.render_parens()
            .unwrap_or_else(|_| CYCLIC_MARKER.to_string())
    }
}

pub(crate) const CYCLIC_MARKER: &str = "#<cyclic list>";

impl Clone for ValueSequence {
    /// Shallow copy sized to the logical length; elements are shared.
    fn clone(&self) -> Self {
        let mut copy = ValueSequence::with_capacity(self.len.max(1));
        self.clone_into(&mut copy);
        copy
    }
}

impl PartialEq for ValueSequence {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.as_slice() == other.as_slice()
    }
}

impl FromIterator<Value> for ValueSequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<'a> IntoIterator for &'a ValueSequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ValueSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render_flat() {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str(CYCLIC_MARKER),
        }
    }
}

impl Serialize for ValueSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ValueSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<Value>::deserialize(deserializer)?;
        Ok(Self::from_values(values))
    }
}
