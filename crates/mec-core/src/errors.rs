//! Structured error types shared across the MEC crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`MecError`] variant.
///
/// `code` is a stable machine-readable identifier (`"deadline-exceeded"`,
/// `"bad-edge-line"`, ...); callers branch on it, never on the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (vertices, line numbers, counts, ...).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl ErrorInfo {
    /// Creates a new payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Canonical error type for the MEC engine.
///
/// Non-extendable inputs are *not* errors: the extension engine returns
/// `None` and the enumerators report a zero count. Errors here are either
/// cooperative cancellation (`Enumerate`/`Measure` families raised at
/// emission boundaries) or genuine failures (malformed input, I/O).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MecError {
    /// Graph structural errors (unknown vertex, self loop, ...).
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Orientation errors from the Meek/extension machinery.
    #[error("orient error: {0}")]
    Orient(ErrorInfo),
    /// Enumeration errors, including the emission cap.
    #[error("enumerate error: {0}")]
    Enumerate(ErrorInfo),
    /// Measurement sink errors, including the cooperative deadline.
    #[error("measure error: {0}")]
    Measure(ErrorInfo),
    /// Parsing, serialization and file format errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl MecError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MecError::Graph(info)
            | MecError::Orient(info)
            | MecError::Enumerate(info)
            | MecError::Measure(info)
            | MecError::Serde(info) => info,
        }
    }

    /// Whether the error is the cooperative deadline raised by the
    /// measurement sink. Callers treat it as "partial result": the delay
    /// aggregate remains valid, the count does not.
    pub fn is_deadline(&self) -> bool {
        matches!(self, MecError::Measure(info) if info.code == "deadline-exceeded")
    }

    /// Whether the error is the configured emission cap.
    pub fn is_emit_cap(&self) -> bool {
        matches!(self, MecError::Enumerate(info) if info.code == "emit-cap-reached")
    }
}
