//! Domain checks shared by every option setter.
//!
//! Each check returns the accepted value so setters can validate and store
//! in one expression. Failures are [`CameraError::Validation`] errors raised
//! before anything is stored or any process is touched.

use crate::error::{CameraError, Result};
use std::fmt::Display;

/// Check that `value` lies in `min..=max`.
pub fn int_between(name: &str, value: i32, min: i32, max: i32) -> Result<i32> {
    if value < min || value > max {
        return Err(CameraError::validation_error(format!(
            "{name}: expected integer between {min} and {max}, got {value}"
        )));
    }
    Ok(value)
}

/// Check that `value` is exactly one of `valid`.
pub fn one_of<T>(name: &str, value: T, valid: &[T]) -> Result<T>
where
    T: PartialEq + Display,
{
    if valid.contains(&value) {
        return Ok(value);
    }

    let choices = valid
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(CameraError::validation_error(format!(
        "{name}: expected value to be one of [{choices}], got {value}"
    )))
}

/// Check that `value` is a finite number strictly greater than zero.
pub fn positive_number(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CameraError::validation_error(format!(
            "{name}: expected positive number, got {value}"
        )));
    }
    Ok(value)
}

/// Check that a required string argument is not empty.
pub fn non_empty<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(CameraError::validation_error(format!("{name} required")));
    }
    Ok(value)
}
