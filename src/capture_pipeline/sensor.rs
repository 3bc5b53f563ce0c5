//! Camera sensor boundary
//!
//! This module holds the driver traits, the frame buffer handle, board profiles
//! and an in-memory driver for hosts without camera hardware.

mod driver;
mod frame;
pub mod profile;
mod simulated;
pub mod types;

pub use driver::{CameraDriver, SensorControl};
pub use frame::RawFrameBuffer;
pub use profile::{
    BoardVariant, FlashConfig, PinAssignment, SensorProfile, SessionConfig,
    SessionConfigBuilder, StreamEncoding, STREAM_FRAME_SIZE,
};
pub use simulated::{SimulatedDriver, SimulatedSensor};
pub use types::{
    CaptureMode, FrameBufferLocation, FrameSize, GrabMode, PixelFormat, SensorId,
    SensorRegisters,
};
