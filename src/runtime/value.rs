use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::runtime::{
    callable::{CallResult, Flow},
    context::Context,
    error::{CYCLIC_LIST, RuntimeError, TYPE_MISMATCH},
    value_sequence::{CYCLIC_MARKER, ValueSequence},
};

pub const NIL: &str = "nil";
pub const TRUE: &str = "TRUE";
pub const FALSE: &str = "FALSE";

/// Shape of a value, as seen before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Atom,
    String,
    Integer,
    Float,
    List,
    Variable,
    Funcall,
}

impl ValueType {
    pub fn type_name(self) -> &'static str {
        match self {
            ValueType::Atom => "ATOM",
            ValueType::String => "STRING",
            ValueType::Integer => "INTEGER",
            ValueType::Float => "FLOAT",
            ValueType::List => "LIST",
            ValueType::Variable => "VARIABLE",
            ValueType::Funcall => "FUNCALL",
        }
    }
}

/// Shared handle to a mutable value sequence.
///
/// Clones share the same sequence, so mutating it through one handle is
/// visible through all of them. Cycles are representable but every renderer
/// rejects them.
#[derive(Debug, Clone)]
pub struct ListRef(Rc<RefCell<ValueSequence>>);

impl ListRef {
    pub fn new(sequence: ValueSequence) -> Self {
        Self(Rc::new(RefCell::new(sequence)))
    }

    pub fn borrow(&self) -> Ref<'_, ValueSequence> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, ValueSequence> {
        self.0.borrow_mut()
    }

    /// Shallow copy of the current contents.
    pub fn snapshot(&self) -> ValueSequence {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &ListRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    fn enter(&self, ancestry: &mut Vec<usize>) -> Result<(), RuntimeError> {
        let address = self.address();
        if ancestry.contains(&address) {
            return Err(RuntimeError::callee(
                "Value::render",
                CYCLIC_LIST,
                "list contains itself",
            ));
        }
        ancestry.push(address);
        Ok(())
    }
}

impl PartialEq for ListRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.borrow() == *other.borrow()
    }
}

impl Serialize for ListRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.borrow().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ListRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ValueSequence::deserialize(deserializer).map(ListRef::new)
    }
}

/// A unit of data in the rule language.
///
/// `Variable` and `Funcall` are unresolved: they only become concrete values
/// through [`Value::evaluate`] against a call context. Every other variant
/// resolves to itself; a `List` is not resolved element-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Symbolic name.
    Atom(Rc<str>),
    /// Quoted string.
    String(Rc<str>),
    Integer(i64),
    Float(f64),
    /// List value sharing its sequence with every clone.
    List(ListRef),
    /// Reference to a context binding (`?name`).
    Variable(Rc<str>),
    /// Call expression; element 0 names the function.
    Funcall(ListRef),
}

impl Value {
    pub fn atom(name: &str) -> Self {
        Value::Atom(Rc::from(name))
    }

    pub fn string(text: &str) -> Self {
        Value::String(Rc::from(text))
    }

    pub fn variable(name: &str) -> Self {
        Value::Variable(Rc::from(name))
    }

    pub fn nil() -> Self {
        Value::atom(NIL)
    }

    pub fn true_atom() -> Self {
        Value::atom(TRUE)
    }

    pub fn false_atom() -> Self {
        Value::atom(FALSE)
    }

    pub fn boolean(flag: bool) -> Self {
        if flag {
            Value::true_atom()
        } else {
            Value::false_atom()
        }
    }

    pub fn list(sequence: ValueSequence) -> Self {
        Value::List(ListRef::new(sequence))
    }

    pub fn list_of(values: impl IntoIterator<Item = Value>) -> Self {
        Value::list(ValueSequence::from_values(values))
    }

    /// Builds the call expression `(name args...)`.
    pub fn funcall(name: &str, args: impl IntoIterator<Item = Value>) -> Self {
        let mut call = ValueSequence::new();
        call.add(Value::atom(name));
        for arg in args {
            call.add(arg);
        }
        Value::Funcall(ListRef::new(call))
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Atom(_) => ValueType::Atom,
            Value::String(_) => ValueType::String,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::List(_) => ValueType::List,
            Value::Variable(_) => ValueType::Variable,
            Value::Funcall(_) => ValueType::Funcall,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.value_type().type_name()
    }

    /// Only the `FALSE` atom is false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Atom(name) if &**name == FALSE)
    }

    pub fn is_atom(&self, name: &str) -> bool {
        matches!(self, Value::Atom(atom) if &**atom == name)
    }

    /// Resolves this value against `ctx`, keeping an early-return request
    /// raised while evaluating a call expression.
    pub fn evaluate(&self, ctx: &mut Context<'_>) -> CallResult {
        match self {
            Value::Variable(name) => ctx.variable(name).map(Flow::Value),
            Value::Funcall(call) => ctx.call(call),
            other => Ok(Flow::Value(other.clone())),
        }
    }

    pub fn resolve(&self, ctx: &mut Context<'_>) -> Result<Value, RuntimeError> {
        self.evaluate(ctx).map(Flow::into_value)
    }

    pub fn atom_value(&self, ctx: &mut Context<'_>) -> Result<Rc<str>, RuntimeError> {
        match self.resolve(ctx)? {
            Value::Atom(name) | Value::String(name) => Ok(name),
            other => Err(type_mismatch("atom_value", "ATOM", &other)),
        }
    }

    pub fn string_value(&self, ctx: &mut Context<'_>) -> Result<Rc<str>, RuntimeError> {
        match self.resolve(ctx)? {
            Value::String(text) | Value::Atom(text) => Ok(text),
            other => Err(type_mismatch("string_value", "STRING", &other)),
        }
    }

    pub fn int_value(&self, ctx: &mut Context<'_>) -> Result<i64, RuntimeError> {
        match self.resolve(ctx)? {
            Value::Integer(n) => Ok(n),
            Value::Float(n) => Ok(n as i64),
            other => Err(type_mismatch("int_value", "INTEGER", &other)),
        }
    }

    pub fn float_value(&self, ctx: &mut Context<'_>) -> Result<f64, RuntimeError> {
        match self.resolve(ctx)? {
            Value::Integer(n) => Ok(n as f64),
            Value::Float(n) => Ok(n),
            other => Err(type_mismatch("float_value", "FLOAT", &other)),
        }
    }

    pub fn list_value(&self, ctx: &mut Context<'_>) -> Result<ListRef, RuntimeError> {
        match self.resolve(ctx)? {
            Value::List(list) => Ok(list),
            other => Err(type_mismatch("list_value", "LIST", &other)),
        }
    }

    /// Shallow copy of the list this value resolves to.
    pub fn sequence_value(&self, ctx: &mut Context<'_>) -> Result<ValueSequence, RuntimeError> {
        self.list_value(ctx).map(|list| list.snapshot())
    }

    pub fn render_flat(&self) -> Result<String, RuntimeError> {
        let mut out = String::new();
        self.write_flat(&mut out, &mut Vec::new())?;
        Ok(out)
    }

    pub fn render_parens(&self) -> Result<String, RuntimeError> {
        let mut out = String::new();
        self.write_parens(&mut out, &mut Vec::new())?;
        Ok(out)
    }

    pub(crate) fn write_flat(
        &self,
        out: &mut String,
        ancestry: &mut Vec<usize>,
    ) -> Result<(), RuntimeError> {
        match self {
            Value::List(list) => {
                list.enter(ancestry)?;
                for (i, value) in list.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    value.write_flat(out, ancestry)?;
                }
                ancestry.pop();
                Ok(())
            }
            other => other.write_parens(out, ancestry),
        }
    }

    pub(crate) fn write_parens(
        &self,
        out: &mut String,
        ancestry: &mut Vec<usize>,
    ) -> Result<(), RuntimeError> {
        match self {
            Value::Atom(name) => out.push_str(name),
            Value::String(text) => {
                out.push('"');
                out.push_str(text);
                out.push('"');
            }
            Value::Integer(n) => out.push_str(&n.to_string()),
            Value::Float(n) => out.push_str(&format!("{:?}", n)),
            Value::Variable(name) => {
                out.push('?');
                out.push_str(name);
            }
            Value::List(list) | Value::Funcall(list) => {
                list.enter(ancestry)?;
                list.borrow().write_parens(out, ancestry)?;
                ancestry.pop();
            }
        }
        Ok(())
    }
}

fn type_mismatch(accessor: &str, expected: &str, got: &Value) -> RuntimeError {
    RuntimeError::callee(
        format!("Value::{}", accessor),
        TYPE_MISMATCH,
        format!("expected {}, got {} {}", expected, got.type_name(), got),
    )
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render_flat() {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str(CYCLIC_MARKER),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}
