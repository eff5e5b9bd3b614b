//! Per-type checks and text coercion
//!
//! The checkers only look at the variant of a value, never at its contents.

use super::types::{ConfigValue, Datatype, NewValue};
use crate::error::{Error, Result};

type Checker = fn(&ConfigValue) -> bool;

fn is_bool(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::Bool(_))
}

fn is_string(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::String(_))
}

fn is_int(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::Int(_))
}

fn is_float(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::Float(_))
}

fn is_list(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::List(_))
}

fn is_dict(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::Dict(_))
}

fn checker(datatype: Datatype) -> Checker {
    match datatype {
        Datatype::Bool => is_bool,
        Datatype::String => is_string,
        Datatype::Int => is_int,
        Datatype::Float => is_float,
        Datatype::List => is_list,
        Datatype::Dict => is_dict,
    }
}

/// Exact type check of `value` against `datatype`
pub(crate) fn matches_type(datatype: Datatype, value: &ConfigValue) -> bool {
    checker(datatype)(value)
}

/// Coerce an update input into `datatype`
///
/// Text is parsed according to the target type. Typed numbers are converted
/// between int and float; every other typed value passes through unchanged
/// and is left for validation to accept or reject.
pub(crate) fn coerce(datatype: Datatype, input: NewValue, list_delim: &str) -> Result<ConfigValue> {
    match input {
        NewValue::Text(text) => coerce_text(datatype, text, list_delim),
        NewValue::Typed(value) => convert_number(datatype, value),
    }
}

fn coerce_text(datatype: Datatype, text: String, list_delim: &str) -> Result<ConfigValue> {
    match datatype {
        Datatype::Bool => Ok(coerce_bool(text)),
        Datatype::Int => text
            .trim()
            .parse::<i64>()
            .map(ConfigValue::Int)
            .map_err(|e| coercion_error(datatype, &text, e)),
        Datatype::Float => text
            .trim()
            .parse::<f64>()
            .map(ConfigValue::Float)
            .map_err(|e| coercion_error(datatype, &text, e)),
        Datatype::List => {
            if list_delim.is_empty() {
                return Err(coercion_error(datatype, &text, "empty list delimiter"));
            }
            Ok(ConfigValue::List(
                text.split(list_delim).map(String::from).collect(),
            ))
        }
        Datatype::String | Datatype::Dict => Ok(ConfigValue::String(text)),
    }
}

// Unrecognized words stay text and fail the bool type check later.
fn coerce_bool(text: String) -> ConfigValue {
    match text.to_lowercase().as_str() {
        "yes" | "true" => ConfigValue::Bool(true),
        "no" | "false" => ConfigValue::Bool(false),
        _ => ConfigValue::String(text),
    }
}

/// Convert a typed number to the numeric `datatype`, passing anything else through
pub(crate) fn convert_number(datatype: Datatype, value: ConfigValue) -> Result<ConfigValue> {
    match (datatype, value) {
        (Datatype::Float, ConfigValue::Int(n)) => Ok(ConfigValue::Float(n as f64)),
        (Datatype::Int, ConfigValue::Float(n)) => {
            // i64::MAX is not representable; its f64 neighbour is 2^63
            if n.is_finite() && n >= i64::MIN as f64 && n < i64::MAX as f64 {
                Ok(ConfigValue::Int(n.trunc() as i64))
            } else {
                Err(coercion_error(datatype, &n.to_string(), "out of integer range"))
            }
        }
        // Bools are not numbers here and fail the numeric type check
        (_, value) => Ok(value),
    }
}

fn coercion_error(datatype: Datatype, input: &str, reason: impl ToString) -> Error {
    Error::Coercion {
        datatype,
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
