use crate::runtime::{
    error::{BAD_ARGUMENT, RuntimeError, TYPE_MISMATCH, WRONG_NUMBER_OF_ARGUMENTS},
    value::Value,
    value_sequence::ValueSequence,
};

pub(super) fn format_hint(signature: &str) -> String {
    format!("\n\nHint:\n  {}", signature)
}

/// Arguments after the function name; empty when the sequence has no name
/// slot either.
pub(super) fn arguments(args: &ValueSequence) -> &[Value] {
    args.as_slice().get(1..).unwrap_or(&[])
}

/// Number of arguments after the function name.
pub(super) fn arg_count(args: &ValueSequence) -> usize {
    args.len().saturating_sub(1)
}

pub(super) fn arity_error(name: &str, expected: &str, got: usize, signature: &str) -> RuntimeError {
    RuntimeError::callee(
        name,
        WRONG_NUMBER_OF_ARGUMENTS,
        format!(
            "wrong number of arguments\n\n  function: {}\n  expected: {}\n  got: {}{}",
            name,
            expected,
            got,
            format_hint(signature)
        ),
    )
}

pub(super) fn type_error(name: &str, label: &str, expected: &str, got: &Value) -> RuntimeError {
    RuntimeError::callee(
        name,
        TYPE_MISMATCH,
        format!(
            "{} expected {} to be {}, got {} {}",
            name,
            label,
            expected,
            got.type_name(),
            got
        ),
    )
}

pub(super) fn bad_argument(name: &str, message: impl Into<String>) -> RuntimeError {
    RuntimeError::callee(name, BAD_ARGUMENT, message)
}

pub(super) fn check_arity(
    args: &ValueSequence,
    expected: usize,
    name: &str,
    signature: &str,
) -> Result<(), RuntimeError> {
    let got = arg_count(args);
    if got != expected {
        return Err(arity_error(name, &expected.to_string(), got, signature));
    }
    Ok(())
}

pub(super) fn check_min_arity(
    args: &ValueSequence,
    min: usize,
    name: &str,
    signature: &str,
) -> Result<(), RuntimeError> {
    let got = arg_count(args);
    if got < min {
        return Err(arity_error(name, &format!("{}+", min), got, signature));
    }
    Ok(())
}

pub(super) fn check_arity_range(
    args: &ValueSequence,
    min: usize,
    max: usize,
    name: &str,
    signature: &str,
) -> Result<(), RuntimeError> {
    let got = arg_count(args);
    if got < min || got > max {
        return Err(arity_error(name, &format!("{}..{}", min, max), got, signature));
    }
    Ok(())
}
