use thiserror::Error;

use crate::capture_pipeline::sensor::PixelFormat;

/// Sensor bring-up failures. Imaging stays unavailable until a later
/// `initialize` succeeds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("camera init failed with error 0x{code:x}")]
    Driver { code: i32 },

    #[error("camera init reported success but exposed no sensor handle")]
    NoSensor,

    #[error("camera init refused: a frame buffer is still outstanding")]
    FrameOutstanding,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera capture failed: driver returned no frame")]
    NoFrame,

    #[error("camera capture requested before the sensor was initialized")]
    Uninitialized,

    #[error("camera capture refused: previous frame buffer was not released")]
    FrameOutstanding,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error(
        "frame size mismatch: got {width}x{height} ({actual_len} bytes), expected {expected_width}x{expected_height} ({expected_len} bytes)"
    )]
    SizeMismatch {
        width: usize,
        height: usize,
        actual_len: usize,
        expected_width: usize,
        expected_height: usize,
        expected_len: usize,
    },

    #[error("unsupported pixel format for tensor conversion: {0:?}")]
    UnsupportedFormat(PixelFormat),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("inference input length mismatch: engine expects {expected}, tensor has {actual}")]
    InputLength { expected: usize, actual: usize },

    #[error("inference engine produced no scores")]
    EmptyOutput,

    #[error("inference engine error: {0}")]
    Engine(String),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
