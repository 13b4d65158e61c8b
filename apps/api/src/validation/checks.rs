//! Building blocks for schema checks over an untyped `serde_json::Value`.
//!
//! A check is any `Fn(&Value, &FieldPath) -> Validated<T>`. Field accessors decide
//! what a *missing* key means (required / optional / nullable / defaulted); the
//! check only ever sees a present value.

use serde_json::{Map, Value};
use tracing::debug;

use crate::validation::diagnostic::{Collector, Diagnostic, FieldPath, Validated};
use crate::validation::formats::{is_valid_email, is_valid_url};

/// JSON type name as it appears in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Objects and fields
// ────────────────────────────────────────────────────────────────────────────

/// A JSON object positioned at `path`, checked against a fixed key set.
pub struct ObjectView<'a> {
    path: FieldPath,
    map: &'a Map<String, Value>,
}

impl<'a> ObjectView<'a> {
    /// Type-checks `value` as an object. Keys outside `known` are dropped (logged at debug).
    pub fn open(
        value: &'a Value,
        path: &FieldPath,
        known: &[&str],
    ) -> Validated<ObjectView<'a>> {
        let Value::Object(map) = value else {
            return Validated::invalid(Diagnostic::wrong_type(
                path.clone(),
                "object",
                type_name(value),
            ));
        };
        for key in map.keys().filter(|k| !known.contains(&k.as_str())) {
            debug!(path = %path, key = %key, "Ignoring unknown key");
        }
        Validated::Valid(ObjectView {
            path: path.clone(),
            map,
        })
    }

    pub fn field(&self, key: &'static str) -> Field<'a> {
        Field {
            path: self.path.key(key),
            value: self.map.get(key),
        }
    }
}

/// A (possibly missing) value at a known key.
pub struct Field<'a> {
    path: FieldPath,
    value: Option<&'a Value>,
}

impl<'a> Field<'a> {
    /// Missing key → `Required`. `null` is handed to the check (and rejected by it).
    pub fn required<T>(self, check: impl Fn(&'a Value, &FieldPath) -> Validated<T>) -> Validated<T> {
        match self.value {
            None => Validated::invalid(Diagnostic::required(self.path)),
            Some(v) => check(v, &self.path),
        }
    }

    /// Missing key → `None`. `null` is handed to the check (and rejected by it).
    pub fn optional<T>(
        self,
        check: impl Fn(&'a Value, &FieldPath) -> Validated<T>,
    ) -> Validated<Option<T>> {
        match self.value {
            None => Validated::Valid(None),
            Some(v) => check(v, &self.path).map(Some),
        }
    }

    /// Missing key or explicit `null` → `None`.
    pub fn nullable<T>(
        self,
        check: impl Fn(&'a Value, &FieldPath) -> Validated<T>,
    ) -> Validated<Option<T>> {
        match self.value {
            None | Some(Value::Null) => Validated::Valid(None),
            Some(v) => check(v, &self.path).map(Some),
        }
    }

    /// Missing key → `T::default()`. A present value of the wrong type is still a violation.
    pub fn or_default<T: Default>(
        self,
        check: impl Fn(&'a Value, &FieldPath) -> Validated<T>,
    ) -> Validated<T> {
        match self.value {
            None => Validated::Valid(T::default()),
            Some(v) => check(v, &self.path),
        }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar checks
// ────────────────────────────────────────────────────────────────────────────

fn as_str<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a str, Diagnostic> {
    value
        .as_str()
        .ok_or_else(|| Diagnostic::wrong_type(path.clone(), "string", type_name(value)))
}

/// Any string.
pub fn string(value: &Value, path: &FieldPath) -> Validated<String> {
    match as_str(value, path) {
        Ok(s) => Validated::Valid(s.to_string()),
        Err(d) => Validated::invalid(d),
    }
}

/// A string of at least `min` characters.
pub fn string_min(min: usize) -> impl Fn(&Value, &FieldPath) -> Validated<String> {
    move |value, path| match as_str(value, path) {
        Ok(s) if s.chars().count() >= min => Validated::Valid(s.to_string()),
        Ok(_) => Validated::invalid(Diagnostic::too_short_string(path.clone(), min)),
        Err(d) => Validated::invalid(d),
    }
}

pub fn email(value: &Value, path: &FieldPath) -> Validated<String> {
    match as_str(value, path) {
        Ok(s) if is_valid_email(s) => Validated::Valid(s.to_string()),
        Ok(_) => Validated::invalid(Diagnostic::new(path.clone(), "Invalid email")),
        Err(d) => Validated::invalid(d),
    }
}

pub fn url(value: &Value, path: &FieldPath) -> Validated<String> {
    match as_str(value, path) {
        Ok(s) if is_valid_url(s) => Validated::Valid(s.to_string()),
        Ok(_) => Validated::invalid(Diagnostic::new(path.clone(), "Invalid url")),
        Err(d) => Validated::invalid(d),
    }
}

/// A whole number greater than zero. Integer-ness and sign are reported separately.
pub fn positive_int(value: &Value, path: &FieldPath) -> Validated<u64> {
    let Some(n) = value.as_f64() else {
        return Validated::invalid(Diagnostic::wrong_type(
            path.clone(),
            "number",
            type_name(value),
        ));
    };

    let mut c = Collector::new();
    if n.fract() != 0.0 {
        c.push(Diagnostic::new(path.clone(), "Expected integer, received float"));
    }
    if n <= 0.0 {
        c.push(Diagnostic::new(path.clone(), "Number must be greater than 0"));
    }
    c.finish(|| match value.as_u64() {
        Some(exact) => Some(exact),
        // Whole floats such as `2.0`.
        None => Some(n as u64),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Arrays
// ────────────────────────────────────────────────────────────────────────────

/// An array with at least `min` items, each checked by `item`. The length violation
/// (at the array's path) precedes item violations.
pub fn array_of<T>(
    min: usize,
    item: impl Fn(&Value, &FieldPath) -> Validated<T>,
) -> impl Fn(&Value, &FieldPath) -> Validated<Vec<T>> {
    move |value, path| {
        let Value::Array(items) = value else {
            return Validated::invalid(Diagnostic::wrong_type(
                path.clone(),
                "array",
                type_name(value),
            ));
        };

        let mut c = Collector::new();
        if items.len() < min {
            c.push(Diagnostic::too_short_array(path.clone(), min));
        }
        let checked: Vec<Option<T>> = items
            .iter()
            .enumerate()
            .map(|(i, v)| c.take(item(v, &path.index(i))))
            .collect();
        c.finish(|| checked.into_iter().collect())
    }
}

/// Shorthand for the common `string[]` with no constraints.
pub fn string_list(value: &Value, path: &FieldPath) -> Validated<Vec<String>> {
    array_of(0, string)(value, path)
}
