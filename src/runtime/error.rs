use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.title)
    }
}

pub const INDEX_OUT_OF_BOUNDS: ErrorCode = ErrorCode {
    code: "E1100",
    title: "INDEX OUT OF BOUNDS",
};
pub const DEFINITION_ORDER: ErrorCode = ErrorCode {
    code: "E1101",
    title: "DEFINITION ORDER",
};
pub const UNDEFINED_FUNCTION: ErrorCode = ErrorCode {
    code: "E1102",
    title: "UNDEFINED FUNCTION",
};
pub const UNBOUND_VARIABLE: ErrorCode = ErrorCode {
    code: "E1103",
    title: "UNBOUND VARIABLE",
};
pub const TYPE_MISMATCH: ErrorCode = ErrorCode {
    code: "E1104",
    title: "TYPE MISMATCH",
};
pub const WRONG_NUMBER_OF_ARGUMENTS: ErrorCode = ErrorCode {
    code: "E1105",
    title: "WRONG NUMBER OF ARGUMENTS",
};
pub const BAD_ARGUMENT: ErrorCode = ErrorCode {
    code: "E1106",
    title: "BAD ARGUMENT",
};
pub const CYCLIC_LIST: ErrorCode = ErrorCode {
    code: "E1107",
    title: "CYCLIC LIST",
};
pub const IMAGE_FORMAT: ErrorCode = ErrorCode {
    code: "E1108",
    title: "IMAGE FORMAT",
};
pub const INVALID_CONFIG: ErrorCode = ErrorCode {
    code: "E1109",
    title: "INVALID CONFIG",
};

/// Trail tag appended by every advice layer a failing call passes through.
pub const ADVICE_TRAIL: &str = "advice";

/// What went wrong, independent of where it was observed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("bad index {index} in call to {op}() on this vector: {rendering}")]
    Index {
        op: &'static str,
        index: usize,
        rendering: String,
    },
    #[error("cannot advise a function before defining it: {name}")]
    DefinitionOrder { name: String },
    #[error("{message}")]
    Callee { code: ErrorCode, message: String },
}

/// Runtime failure raised by a callable, a value accessor, or the sequence
/// container.
///
/// `trail` is an ordered breadcrumb of the interception layers the failure
/// propagated through, innermost first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{routine}: {kind}{}", render_suffix(.call, .trail))]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub routine: String,
    pub call: Option<String>,
    pub trail: Vec<String>,
}

fn render_suffix(call: &Option<String>, trail: &[String]) -> String {
    let mut out = String::new();
    if let Some(call) = call {
        out.push_str("\n  while executing ");
        out.push_str(call);
    }
    for tag in trail {
        out.push_str("\n  in ");
        out.push_str(tag);
    }
    out
}

impl RuntimeError {
    pub fn new(routine: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            kind,
            routine: routine.into(),
            call: None,
            trail: Vec::new(),
        }
    }

    pub fn index(op: &'static str, index: usize, rendering: String) -> Self {
        Self::new(
            format!("ValueSequence::{}", op),
            ErrorKind::Index {
                op,
                index,
                rendering,
            },
        )
    }

    pub fn definition_order(routine: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(routine, ErrorKind::DefinitionOrder { name: name.into() })
    }

    pub fn callee(routine: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(
            routine,
            ErrorKind::Callee {
                code,
                message: message.into(),
            },
        )
    }

    /// Returns the error code matching this failure's kind.
    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            ErrorKind::Index { .. } => INDEX_OUT_OF_BOUNDS,
            ErrorKind::DefinitionOrder { .. } => DEFINITION_ORDER,
            ErrorKind::Callee { code, .. } => *code,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self.kind, ErrorKind::Index { .. })
    }

    pub fn is_definition_order(&self) -> bool {
        matches!(self.kind, ErrorKind::DefinitionOrder { .. })
    }

    /// Records the offending call unless a deeper frame already did.
    pub fn with_call(mut self, rendering: impl FnOnce() -> String) -> Self {
        if self.call.is_none() {
            self.call = Some(rendering());
        }
        self
    }

    pub fn with_trail(mut self, tag: impl Into<String>) -> Self {
        self.trail.push(tag.into());
        self
    }
}
