//! Diagnostics, field paths and the accumulating `Validated<T>` result.

use std::fmt;

use serde::{Serialize, Serializer};

// ────────────────────────────────────────────────────────────────────────────
// Field paths
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Location of a value inside the submitted JSON, root first.
///
/// Renders as dot-joined segments with bare decimal indices: `experience.0.bullets`.
/// The root path renders as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &'static str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Diagnostic
// ────────────────────────────────────────────────────────────────────────────

/// A single parse or schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: FieldPath,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    pub fn required(path: FieldPath) -> Self {
        Self::new(path, "Required")
    }

    pub fn wrong_type(path: FieldPath, expected: &str, received: &str) -> Self {
        Self::new(path, format!("Expected {expected}, received {received}"))
    }

    pub fn too_short_string(path: FieldPath, min: usize) -> Self {
        Self::new(
            path,
            format!("String must contain at least {min} character(s)"),
        )
    }

    pub fn too_short_array(path: FieldPath, min: usize) -> Self {
        Self::new(path, format!("Array must contain at least {min} element(s)"))
    }
}

impl fmt::Display for Diagnostic {
    /// `"<path>: <message>"`, or just the message for a root-level diagnostic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validated<T>
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of checking one node of the tree. `Invalid` always carries at least one
/// diagnostic, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(Vec<Diagnostic>),
}

impl<T> Validated<T> {
    pub fn invalid(diagnostic: Diagnostic) -> Self {
        Validated::Invalid(vec![diagnostic])
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        match self {
            Validated::Valid(v) => Validated::Valid(f(v)),
            Validated::Invalid(d) => Validated::Invalid(d),
        }
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    pub fn into_result(self) -> Result<T, Vec<Diagnostic>> {
        match self {
            Validated::Valid(v) => Ok(v),
            Validated::Invalid(d) => Err(d),
        }
    }
}

/// Gathers diagnostics from sibling checks so that one bad field never hides
/// another. Values of failed checks come back as `None`; `finish` only runs the
/// constructor when nothing was collected.
#[derive(Debug, Default)]
pub struct Collector {
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take<T>(&mut self, checked: Validated<T>) -> Option<T> {
        match checked {
            Validated::Valid(v) => Some(v),
            Validated::Invalid(mut d) => {
                self.diagnostics.append(&mut d);
                None
            }
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Validated<T> {
        if !self.diagnostics.is_empty() {
            return Validated::Invalid(self.diagnostics);
        }
        match build() {
            Some(v) => Validated::Valid(v),
            // Every `None` passed through `take`, which records a diagnostic.
            None => Validated::invalid(Diagnostic::new(
                FieldPath::root(),
                "Validation produced no value",
            )),
        }
    }
}
