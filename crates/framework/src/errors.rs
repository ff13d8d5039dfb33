//! Cross-cutting error and failure-scope types for the MatFlow boundary.
//!
//! [`CalculatorError`] covers every condition a calculator can surface to the
//! engine. There are exactly two classes: configuration problems detected
//! while the graph is being assembled, and data problems detected during a
//! single invocation.
//!
//! [`FailureScope`] is a cross-cutting concern: the engine asks an error for
//! its scope to decide between refusing to build the graph and failing one
//! invocation under its own recovery policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Failure scope
// ---------------------------------------------------------------------------

/// How far an error reaches: the whole graph build, or one invocation.
///
/// Returned by [`CalculatorError::scope`]. Calculators never retry
/// internally; they classify, and the engine decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureScope {
    /// The graph configuration itself is wrong; the graph must not be built.
    GraphConstruction,
    /// One invocation failed and emitted nothing. Whether the stream
    /// continues is the engine's call.
    Invocation,
}

// ---------------------------------------------------------------------------
// Calculator errors
// ---------------------------------------------------------------------------

/// Errors a calculator surfaces across the engine boundary.
///
/// No other failure modes exist: calculators perform no I/O, and output is
/// all-or-nothing per invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculatorError {
    /// The port cardinality or tag pairing declared in the graph
    /// configuration violates the calculator's contract.
    ///
    /// Produced during contract validation, before any packet flows.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the declaration problem.
        message: String,
    },

    /// The data supplied for one invocation is unusable (e.g. operand
    /// dimensions disagree).
    ///
    /// The invocation produces no output; the calculator itself remains
    /// usable for subsequent packets.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected input.
        message: String,
    },
}

impl CalculatorError {
    /// Creates a configuration-class error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an invalid-argument-class error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns how far this error reaches.
    pub fn scope(&self) -> FailureScope {
        match self {
            Self::Configuration { .. } => FailureScope::GraphConstruction,
            Self::InvalidArgument { .. } => FailureScope::Invocation,
        }
    }
}
