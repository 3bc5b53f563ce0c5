//! Capture-to-tensor pipeline module
//!
//! This module brings a camera sensor up, switches it into a small capture mode
//! for each inference request, reduces the frame to the classifier's fixed
//! grayscale input and hands that to an inference engine.

pub mod common;
pub mod convert;
pub mod inference;
pub mod pipeline;
pub mod sensor;
pub mod session;

pub use common::{
    CaptureError,
    ConvertError,
    InferenceError,
    InitError,
    PipelineError,
    Result,
};

pub use sensor::{
    BoardVariant,
    CameraDriver,
    CaptureMode,
    FrameSize,
    PixelFormat,
    RawFrameBuffer,
    SensorControl,
    SensorId,
    SensorProfile,
    SessionConfig,
    SessionConfigBuilder,
    SimulatedDriver,
    StreamEncoding,
};

pub use session::{CaptureSession, SessionState};

pub use convert::{
    FrameConverter,
    GrayscaleConverter,
    IntensityTensor,
    TENSOR_LEN,
    empty_tensor,
};

pub use inference::{Classification, InferenceEngine, ReplayEngine};

pub use pipeline::{InferencePipeline, PipelineTimings};
