//! Fixed shape of the classifier input
//!
//! These values come from the model's training setup; a different model needs
//! different constants.

pub const TENSOR_WIDTH: usize = 96;
pub const TENSOR_HEIGHT: usize = 96;
pub const TENSOR_CHANNELS: usize = 1;
pub const TENSOR_LEN: usize = TENSOR_WIDTH * TENSOR_HEIGHT * TENSOR_CHANNELS;

/// Single-channel signed intensities, row-major.
pub type IntensityTensor = [i8; TENSOR_LEN];

/// Zeroed tensor, ready to be filled by a converter.
pub fn empty_tensor() -> IntensityTensor {
    [0; TENSOR_LEN]
}
