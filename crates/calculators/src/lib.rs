//! MatFlow calculator implementations.
//!
//! Each module implements one node against the [`framework`] boundary:
//! a [`framework::Calculator`] that validates its declared ports, fixes its
//! orientation at open, and transforms packets one invocation at a time.
//!
//! ## Architectural Layer
//!
//! **Node layer.** Calculators sequence value-type operations from the
//! [`framework`] crate; they own no scheduling, no port wiring, and no
//! packet lifetime.

pub mod matrix_subtract;

pub use matrix_subtract::MatrixSubtractCalculator;
