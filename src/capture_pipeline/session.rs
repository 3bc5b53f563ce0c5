//! Capture session management
//!
//! Sensor lifecycle: one bring-up from a fixed profile, then a mode switch around
//! every inference capture with a guaranteed release of the frame buffer.

mod manager;

#[cfg(test)]
mod tests;

pub use manager::{
    CaptureSession, INFERENCE_FRAME_SIZE, INFERENCE_PIXEL_FORMAT, SessionState,
    apply_color_correction,
};
