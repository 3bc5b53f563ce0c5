//! Frame-to-tensor conversion
//!
//! Deterministic, allocation-free reduction of one RGB565 frame to the fixed
//! grayscale tensor the classifier expects.

mod converter;
pub mod rgb565;
pub mod tensor;


pub use converter::{FrameConverter, GrayscaleConverter};
pub use tensor::{
    IntensityTensor, TENSOR_CHANNELS, TENSOR_HEIGHT, TENSOR_LEN, TENSOR_WIDTH, empty_tensor,
};
