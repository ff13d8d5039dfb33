//! Port declarations a calculator exposes at graph-construction time.
//!
//! The engine builds a [`CalculatorContract`] from the graph configuration
//! and hands it to [`crate::Calculator::contract`] for validation before any
//! packet flows. Declarations are immutable once validated.

use serde::{Deserialize, Serialize};

use crate::identifiers::{SidePacketName, StreamName};

// ---------------------------------------------------------------------------
// Operand tags
// ---------------------------------------------------------------------------

/// The role a tagged input port plays in a subtraction.
///
/// A closed two-value enumeration: configuration is validated against it
/// when the graph is assembled, and no tag string is ever re-parsed on the
/// per-packet path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperandTag {
    /// The port supplies the value subtracted from.
    Minuend,
    /// The port supplies the value being subtracted.
    Subtrahend,
}

impl OperandTag {
    /// Returns the other tag.
    pub fn complement(self) -> Self {
        match self {
            Self::Minuend => Self::Subtrahend,
            Self::Subtrahend => Self::Minuend,
        }
    }

    /// Returns the canonical configuration spelling (`"MINUEND"` /
    /// `"SUBTRAHEND"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minuend => "MINUEND",
            Self::Subtrahend => "SUBTRAHEND",
        }
    }
}

impl std::fmt::Display for OperandTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Port declarations
// ---------------------------------------------------------------------------

/// One streamed input port as written in the graph configuration.
///
/// The tag is optional at the declaration level; calculators that require a
/// tag reject untagged ports during contract validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamPort {
    tag: Option<OperandTag>,
    name: StreamName,
}

impl StreamPort {
    /// Creates a streamed input port declaration.
    pub fn new(tag: Option<OperandTag>, name: StreamName) -> Self {
        Self { tag, name }
    }

    /// Returns the operand tag attached to this port, if any.
    pub fn tag(&self) -> Option<OperandTag> {
        self.tag
    }

    /// Returns the configured stream name.
    pub fn name(&self) -> &StreamName {
        &self.name
    }
}

// ---------------------------------------------------------------------------

/// One side-input port as written in the graph configuration.
///
/// A side packet arrives once, before the stream starts, and is constant
/// across invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidePacketPort {
    tag: Option<OperandTag>,
    name: SidePacketName,
}

impl SidePacketPort {
    /// Creates a side-input port declaration.
    pub fn new(tag: Option<OperandTag>, name: SidePacketName) -> Self {
        Self { tag, name }
    }

    /// Returns the operand tag attached to this port, if any.
    pub fn tag(&self) -> Option<OperandTag> {
        self.tag
    }

    /// Returns the configured side-packet name.
    pub fn name(&self) -> &SidePacketName {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// The declared port surface of one calculator node.
///
/// Invariant (enforced by calculators during contract validation, and again
/// when [`crate::PortBindings`] are resolved): across a node's streamed
/// input and side input, each [`OperandTag`] is used exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorContract {
    input_streams: Vec<StreamPort>,
    input_side_packets: Vec<SidePacketPort>,
    output_streams: Vec<StreamName>,
}

impl CalculatorContract {
    /// Creates an empty contract; ports are added with the `with_*` methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a streamed input port.
    #[must_use]
    pub fn with_input_stream(mut self, tag: Option<OperandTag>, name: StreamName) -> Self {
        self.input_streams.push(StreamPort::new(tag, name));
        self
    }

    /// Adds a side-input port.
    #[must_use]
    pub fn with_input_side_packet(mut self, tag: Option<OperandTag>, name: SidePacketName) -> Self {
        self.input_side_packets.push(SidePacketPort::new(tag, name));
        self
    }

    /// Adds an untagged output stream.
    #[must_use]
    pub fn with_output_stream(mut self, name: StreamName) -> Self {
        self.output_streams.push(name);
        self
    }

    /// Returns the declared streamed input ports.
    pub fn input_streams(&self) -> &[StreamPort] {
        &self.input_streams
    }

    /// Returns the declared side-input ports.
    pub fn input_side_packets(&self) -> &[SidePacketPort] {
        &self.input_side_packets
    }

    /// Returns the declared output streams.
    pub fn output_streams(&self) -> &[StreamName] {
        &self.output_streams
    }

    /// Returns `true` if any streamed input port carries `tag`.
    pub fn has_input_tag(&self, tag: OperandTag) -> bool {
        self.input_streams.iter().any(|port| port.tag() == Some(tag))
    }

    /// Returns `true` if any side-input port carries `tag`.
    pub fn has_side_packet_tag(&self, tag: OperandTag) -> bool {
        self.input_side_packets
            .iter()
            .any(|port| port.tag() == Some(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(name: &str) -> StreamName {
        StreamName::new(name).unwrap()
    }

    fn side_packet(name: &str) -> SidePacketName {
        SidePacketName::new(name).unwrap()
    }

    #[test]
    fn complement_swaps_the_two_tags() {
        assert_eq!(OperandTag::Minuend.complement(), OperandTag::Subtrahend);
        assert_eq!(OperandTag::Subtrahend.complement(), OperandTag::Minuend);
    }

    #[test]
    fn tags_serialise_with_their_configuration_spelling() {
        assert_eq!(
            serde_json::to_string(&OperandTag::Minuend).unwrap(),
            "\"MINUEND\""
        );
        assert_eq!(OperandTag::Subtrahend.to_string(), "SUBTRAHEND");
    }

    #[test]
    fn contracts_accumulate_declared_ports() {
        let contract = CalculatorContract::new()
            .with_input_stream(Some(OperandTag::Minuend), stream("input_matrix"))
            .with_input_side_packet(Some(OperandTag::Subtrahend), side_packet("side_matrix"))
            .with_output_stream(stream("output_matrix"));

        assert_eq!(contract.input_streams().len(), 1);
        assert_eq!(contract.input_side_packets().len(), 1);
        assert_eq!(contract.output_streams().len(), 1);
        assert!(contract.has_input_tag(OperandTag::Minuend));
        assert!(!contract.has_input_tag(OperandTag::Subtrahend));
        assert!(contract.has_side_packet_tag(OperandTag::Subtrahend));
    }

    #[test]
    fn untagged_ports_match_no_tag() {
        let contract = CalculatorContract::new().with_input_stream(None, stream("input_matrix"));
        assert!(!contract.has_input_tag(OperandTag::Minuend));
        assert!(!contract.has_input_tag(OperandTag::Subtrahend));
    }
}
