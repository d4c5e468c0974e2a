use lanewise_tensor::{DataType, TensorError};
use thiserror::Error;

/// An error type for element-wise operations.
#[derive(Error, Debug, PartialEq)]
pub enum ElementError {
    /// The output element type has no kernel.
    #[error("Unsupported data type for element-wise operation: {0}")]
    UnsupportedDataType(DataType),

    /// An input does not carry the element type of the output.
    #[error("Input {index} has data type {actual}, expected {expected}")]
    DataTypeMismatch {
        /// Position of the input in the argument list
        index: usize,
        /// The element type of the output
        expected: DataType,
        /// The element type of the input
        actual: DataType,
    },

    /// An input cannot be broadcast to the output shape.
    #[error("Input {index} with shape {input:?} cannot be broadcast to output shape {output:?}")]
    ShapeMismatch {
        /// Position of the input in the argument list
        index: usize,
        /// Dimensions of the input
        input: Vec<usize>,
        /// Dimensions of the output
        output: Vec<usize>,
    },

    /// Tensor error
    #[error("Error with the tensor: {0}")]
    TensorError(#[from] TensorError),
}
