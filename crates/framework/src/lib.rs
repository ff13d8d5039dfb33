//! Graph-boundary domain for MatFlow calculators.
//!
//! This crate contains every concept shared between the hosting
//! graph-execution engine and calculator implementations: newtype
//! identifiers, shared value types, port declarations, cross-cutting error
//! types, and the [`Calculator`] trait itself. Calculator crates implement
//! the trait defined here; they never add boundary rules of their own.
//!
//! ## Architectural Layer
//!
//! **Boundary definitions.** This crate has no I/O dependencies. It defines
//! *what* the engine and a calculator exchange; the engine defines *how*
//! packets are scheduled, delivered, and disposed of.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`StreamName`, `SidePacketName`) |
//! | [`types`] | Shared value types (`Matrix`, `Timestamp`, `TimestampDiff`) |
//! | [`contract`] | Port declarations and the `CalculatorContract` |
//! | [`context`] | Per-node session state (`CalculatorContext`, `Packet`) |
//! | [`calculator`] | The [`Calculator`] trait |
//! | [`errors`] | Cross-cutting error and failure-scope types |

pub mod calculator;
pub mod context;
pub mod contract;
pub mod errors;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by calculator crates.
pub use calculator::Calculator;
pub use context::{CalculatorContext, Packet, PortBindings};
pub use contract::{CalculatorContract, OperandTag, SidePacketPort, StreamPort};
pub use errors::{CalculatorError, FailureScope};
pub use identifiers::{SidePacketName, StreamName};
pub use types::{Matrix, Timestamp, TimestampDiff};
