//! Subtracts a streamed matrix and a fixed side-input matrix.
//!
//! The streamed input and the side input carry complementary operand tags;
//! whichever port is tagged `MINUEND` supplies the minuend, and each
//! invocation emits `minuend − subtrahend` at the streamed packet's
//! timestamp. Both matrices must have the same dimensions.
//!
//! Accepted wirings, in graph-configuration terms:
//!
//! ```text
//! input_stream:      MINUEND:input_matrix        input_stream:      SUBTRAHEND:input_matrix
//! input_side_packet: SUBTRAHEND:side_matrix  or  input_side_packet: MINUEND:side_matrix
//! output_stream:     output_matrix                output_stream:     output_matrix
//! ```

use framework::{
    Calculator, CalculatorContext, CalculatorContract, CalculatorError, OperandTag, Packet,
    TimestampDiff,
};
use tracing::{debug, trace};

/// Which port supplies the minuend. Fixed at open from the streamed port's
/// tag; immutable for the node's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    StreamedIsMinuend,
    StreamedIsSubtrahend,
}

/// Streaming node that emits the element-wise difference of its two inputs.
///
/// One streamed input port and one side-input port, tagged with one
/// [`OperandTag::Minuend`] and one [`OperandTag::Subtrahend`] in either
/// assignment; one untagged output stream. Output timestamps equal input
/// timestamps (zero offset).
#[derive(Debug, Default)]
pub struct MatrixSubtractCalculator {
    orientation: Option<Orientation>,
}

impl MatrixSubtractCalculator {
    /// Creates a calculator whose orientation is fixed at open.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Calculator for MatrixSubtractCalculator {
    fn contract(contract: &CalculatorContract) -> Result<(), CalculatorError> {
        if contract.input_streams().len() != 1 || contract.input_side_packets().len() != 1 {
            return Err(CalculatorError::configuration(
                "matrix subtract accepts exactly one input stream and one input side packet",
            ));
        }
        let streamed = contract.input_streams()[0].tag();
        let side = contract.input_side_packets()[0].tag();
        let complementary = matches!(
            (streamed, side),
            (Some(tag), Some(side_tag)) if side_tag == tag.complement()
        );
        if !complementary {
            return Err(CalculatorError::configuration(
                "must specify exactly one minuend and one subtrahend",
            ));
        }
        if contract.output_streams().len() != 1 {
            return Err(CalculatorError::configuration(
                "matrix subtract emits on exactly one output stream",
            ));
        }
        Ok(())
    }

    fn open(&mut self, cc: &mut CalculatorContext) -> Result<(), CalculatorError> {
        // Output for the packet at time T is emitted at time T.
        cc.set_offset(TimestampDiff::ZERO);
        let orientation = match cc.bindings().streamed() {
            OperandTag::Minuend => Orientation::StreamedIsMinuend,
            OperandTag::Subtrahend => Orientation::StreamedIsSubtrahend,
        };
        debug!(?orientation, "matrix subtract opened");
        self.orientation = Some(orientation);
        Ok(())
    }

    fn process(
        &mut self,
        cc: &mut CalculatorContext,
        input: &Packet,
    ) -> Result<(), CalculatorError> {
        let orientation = self
            .orientation
            .ok_or_else(|| CalculatorError::invalid_argument("process invoked before open"))?;

        let streamed = input.value();
        let side = cc.side_input();
        if streamed.dims() != side.dims() {
            return Err(CalculatorError::invalid_argument(format!(
                "input matrix is {}x{} but the side input matrix is {}x{}; \
                 both must have the same dimension",
                streamed.rows(),
                streamed.cols(),
                side.rows(),
                side.cols(),
            )));
        }

        let difference = match orientation {
            Orientation::StreamedIsMinuend => streamed - side,
            Orientation::StreamedIsSubtrahend => side - streamed,
        };
        trace!(
            rows = difference.rows(),
            cols = difference.cols(),
            at = %input.timestamp(),
            "emitting difference"
        );
        cc.emit(difference, input.timestamp());
        Ok(())
    }
}
