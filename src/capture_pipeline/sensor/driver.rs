use super::frame::RawFrameBuffer;
use super::profile::{FlashConfig, SensorProfile};
use super::types::{FrameSize, PixelFormat, SensorId};

/// Register-level control of an initialized sensor.
///
/// Writes are fire-and-forget: once the driver has handed out a valid handle they
/// are assumed to succeed. Every setter writes an absolute value.
pub trait SensorControl {
    fn id(&self) -> SensorId;
    fn set_frame_size(&mut self, size: FrameSize);
    fn set_pixel_format(&mut self, format: PixelFormat);
    fn set_vflip(&mut self, enable: bool);
    fn set_hmirror(&mut self, enable: bool);
    fn set_brightness(&mut self, level: i8);
    fn set_saturation(&mut self, level: i8);
}

/// Camera peripheral driver.
pub trait CameraDriver {
    /// Brings the sensor up with `profile`. Returns the driver's error code on failure.
    fn init(&mut self, profile: &SensorProfile) -> std::result::Result<(), i32>;

    /// Handle to the sensor, `None` until `init` has succeeded.
    fn sensor(&mut self) -> Option<&mut dyn SensorControl>;

    /// Blocks until a frame is available. `None` on DMA failure, timeout or when
    /// no buffer is free.
    fn get_frame(&mut self) -> Option<RawFrameBuffer>;

    fn return_frame(&mut self, frame: RawFrameBuffer);

    fn enable_pullups(&mut self, _pins: &[u8]) {}

    fn attach_flash(&mut self, _flash: &FlashConfig) {}
}
