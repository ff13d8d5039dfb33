//! The seam between the graph-execution engine and node implementations.

use crate::context::{CalculatorContext, Packet};
use crate::contract::CalculatorContract;
use crate::errors::CalculatorError;

/// One node in a streaming dataflow graph.
///
/// The engine drives the whole lifecycle: [`Calculator::contract`] once
/// while the graph is assembled, [`Calculator::open`] once before the first
/// packet, then [`Calculator::process`] for every streamed packet until the
/// engine terminates the node. Implementations run to completion
/// synchronously within each call and keep no state across invocations
/// beyond what `open` fixed.
pub trait Calculator {
    /// Validates the port surface declared for this node in the graph
    /// configuration.
    ///
    /// A configuration-class error here halts graph assembly; no instance of
    /// the calculator is ever created.
    fn contract(contract: &CalculatorContract) -> Result<(), CalculatorError>
    where
        Self: Sized;

    /// Runs once after the graph is wired and the side input is delivered,
    /// before any streamed packet arrives.
    ///
    /// This is where a calculator declares its timestamp offset and fixes
    /// whatever orientation it derives from the resolved bindings.
    fn open(&mut self, cc: &mut CalculatorContext) -> Result<(), CalculatorError>;

    /// Handles one streamed packet.
    ///
    /// Output is all-or-nothing: on error the invocation must have emitted
    /// nothing, and the engine decides whether the stream continues.
    fn process(&mut self, cc: &mut CalculatorContext, input: &Packet)
        -> Result<(), CalculatorError>;
}
