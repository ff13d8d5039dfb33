//! Per-node session state the engine supplies to a calculator.
//!
//! The engine resolves a validated [`crate::CalculatorContract`] into
//! [`PortBindings`] once, constructs a [`CalculatorContext`] with the side
//! input already delivered, and then drives the calculator: `open` once,
//! `process` per streamed [`Packet`]. Emitted packets are drained by the
//! engine after each invocation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::{CalculatorContract, OperandTag};
use crate::errors::CalculatorError;
use crate::types::{Matrix, Timestamp, TimestampDiff};

// ---------------------------------------------------------------------------
// Packets
// ---------------------------------------------------------------------------

/// One streamed matrix and the stream time it belongs to.
///
/// The engine owns packet lifetime end to end: calculators borrow input
/// packets and transfer ownership of emitted packets back through
/// [`CalculatorContext::emit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    value: Matrix,
    timestamp: Timestamp,
}

impl Packet {
    /// Creates a packet carrying `value` at `timestamp`.
    pub fn new(value: Matrix, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }

    /// Returns the carried matrix.
    pub fn value(&self) -> &Matrix {
        &self.value
    }

    /// Returns the stream time this packet belongs to.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

// ---------------------------------------------------------------------------
// Port bindings
// ---------------------------------------------------------------------------

/// The resolved operand orientation of a node's two input ports.
///
/// Computed once when the graph is wired; afterwards the per-packet path
/// never looks at tags again. Resolution enforces the tag invariant: exactly
/// one streamed input and one side input, carrying complementary tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBindings {
    streamed: OperandTag,
    side_input: OperandTag,
}

impl PortBindings {
    /// Resolves the bindings declared by `contract`.
    ///
    /// Fails with a configuration-class error if the contract does not
    /// declare exactly one streamed input and one side input with
    /// complementary tags.
    pub fn from_contract(contract: &CalculatorContract) -> Result<Self, CalculatorError> {
        let [input] = contract.input_streams() else {
            return Err(CalculatorError::configuration(format!(
                "expected exactly one input stream, found {}",
                contract.input_streams().len()
            )));
        };
        let [side] = contract.input_side_packets() else {
            return Err(CalculatorError::configuration(format!(
                "expected exactly one input side packet, found {}",
                contract.input_side_packets().len()
            )));
        };
        match (input.tag(), side.tag()) {
            (Some(streamed), Some(side_input)) if side_input == streamed.complement() => {
                let bindings = Self {
                    streamed,
                    side_input,
                };
                debug!(
                    streamed = %streamed,
                    side_input = %side_input,
                    "resolved port bindings"
                );
                Ok(bindings)
            }
            _ => Err(CalculatorError::configuration(
                "input stream and input side packet must carry one MINUEND and one SUBTRAHEND between them",
            )),
        }
    }

    /// Returns the tag carried by the streamed input port.
    pub fn streamed(self) -> OperandTag {
        self.streamed
    }

    /// Returns the tag carried by the side-input port.
    pub fn side_input(self) -> OperandTag {
        self.side_input
    }
}

// ---------------------------------------------------------------------------
// Calculator context
// ---------------------------------------------------------------------------

/// Engine-supplied state for one calculator instance.
///
/// Construction requires the side-input matrix, so a calculator can never
/// observe a missing side packet: the engine must have delivered it before
/// `open` runs. The only mutable state is the declared timestamp offset and
/// the buffer of emitted packets the engine drains between invocations.
#[derive(Debug, Clone)]
pub struct CalculatorContext {
    bindings: PortBindings,
    side_input: Matrix,
    offset: Option<TimestampDiff>,
    emitted: Vec<Packet>,
}

impl CalculatorContext {
    /// Creates the session state for one node with its side input delivered.
    pub fn new(bindings: PortBindings, side_input: Matrix) -> Self {
        Self {
            bindings,
            side_input,
            offset: None,
            emitted: Vec::new(),
        }
    }

    /// Returns the resolved port bindings.
    pub fn bindings(&self) -> PortBindings {
        self.bindings
    }

    /// Returns the side-input matrix, constant across invocations.
    pub fn side_input(&self) -> &Matrix {
        &self.side_input
    }

    /// Declares how far output timestamps sit from input timestamps.
    ///
    /// Calculators call this once, during `open`.
    pub fn set_offset(&mut self, offset: TimestampDiff) {
        self.offset = Some(offset);
    }

    /// Returns the declared timestamp offset, if `open` has set one.
    pub fn offset(&self) -> Option<TimestampDiff> {
        self.offset
    }

    /// Emits one output packet on the node's output stream.
    ///
    /// Ownership of `value` transfers to the engine, which delivers the
    /// packet downstream and disposes of it.
    pub fn emit(&mut self, value: Matrix, at: Timestamp) {
        self.emitted.push(Packet::new(value, at));
    }

    /// Engine side: drains every packet emitted since the previous drain.
    pub fn take_emitted(&mut self) -> Vec<Packet> {
        std::mem::take(&mut self.emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureScope;
    use crate::identifiers::{SidePacketName, StreamName};

    fn contract(
        stream_tag: Option<OperandTag>,
        side_tag: Option<OperandTag>,
    ) -> CalculatorContract {
        CalculatorContract::new()
            .with_input_stream(stream_tag, StreamName::new("input_matrix").unwrap())
            .with_input_side_packet(side_tag, SidePacketName::new("side_matrix").unwrap())
            .with_output_stream(StreamName::new("output_matrix").unwrap())
    }

    #[test]
    fn bindings_resolve_for_both_complementary_assignments() {
        let b =
            PortBindings::from_contract(&contract(Some(OperandTag::Minuend), Some(OperandTag::Subtrahend)))
                .unwrap();
        assert_eq!(b.streamed(), OperandTag::Minuend);
        assert_eq!(b.side_input(), OperandTag::Subtrahend);

        let b =
            PortBindings::from_contract(&contract(Some(OperandTag::Subtrahend), Some(OperandTag::Minuend)))
                .unwrap();
        assert_eq!(b.streamed(), OperandTag::Subtrahend);
        assert_eq!(b.side_input(), OperandTag::Minuend);
    }

    #[test]
    fn bindings_reject_duplicate_or_missing_tags() {
        for (stream_tag, side_tag) in [
            (Some(OperandTag::Minuend), Some(OperandTag::Minuend)),
            (Some(OperandTag::Subtrahend), Some(OperandTag::Subtrahend)),
            (Some(OperandTag::Minuend), None),
            (None, Some(OperandTag::Subtrahend)),
            (None, None),
        ] {
            let err = PortBindings::from_contract(&contract(stream_tag, side_tag)).unwrap_err();
            assert_eq!(err.scope(), FailureScope::GraphConstruction);
        }
    }

    #[test]
    fn bindings_reject_wrong_port_counts() {
        let two_streams = contract(Some(OperandTag::Minuend), Some(OperandTag::Subtrahend))
            .with_input_stream(None, StreamName::new("extra").unwrap());
        assert!(PortBindings::from_contract(&two_streams).is_err());

        let no_side = CalculatorContract::new()
            .with_input_stream(Some(OperandTag::Minuend), StreamName::new("input_matrix").unwrap());
        assert!(PortBindings::from_contract(&no_side).is_err());
    }

    #[test]
    fn emitted_packets_drain_once() {
        let bindings =
            PortBindings::from_contract(&contract(Some(OperandTag::Minuend), Some(OperandTag::Subtrahend)))
                .unwrap();
        let mut cc = CalculatorContext::new(bindings, Matrix::zeros(1, 1));

        cc.emit(Matrix::zeros(1, 1), Timestamp::from_micros(7));
        let drained = cc.take_emitted();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].timestamp(), Timestamp::from_micros(7));
        assert!(cc.take_emitted().is_empty());
    }

    #[test]
    fn offset_is_unset_until_open_declares_it() {
        let bindings =
            PortBindings::from_contract(&contract(Some(OperandTag::Minuend), Some(OperandTag::Subtrahend)))
                .unwrap();
        let mut cc = CalculatorContext::new(bindings, Matrix::zeros(1, 1));

        assert_eq!(cc.offset(), None);
        cc.set_offset(TimestampDiff::ZERO);
        assert_eq!(cc.offset(), Some(TimestampDiff::ZERO));
    }
}
