//! In-memory camera driver.
//!
//! Behaves like the peripheral driver at its boundary: a fixed pool of frame
//! buffers sized by the profile's buffer count, register state that follows the
//! control writes, and frames shaped by the current frame size and pixel format.
//! Used on hosts without camera hardware and to drive failure paths.

use tracing::debug;

use super::driver::{CameraDriver, SensorControl};
use super::frame::RawFrameBuffer;
use super::profile::{FlashConfig, SensorProfile};
use super::types::{FrameSize, PixelFormat, SensorId, SensorRegisters};

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Sensor half of the simulated driver.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    id: SensorId,
    registers: SensorRegisters,
}

impl SensorControl for SimulatedSensor {
    fn id(&self) -> SensorId {
        self.id
    }

    fn set_frame_size(&mut self, size: FrameSize) {
        self.registers.frame_size = size;
    }

    fn set_pixel_format(&mut self, format: PixelFormat) {
        self.registers.pixel_format = format;
    }

    fn set_vflip(&mut self, enable: bool) {
        self.registers.vflip = enable;
    }

    fn set_hmirror(&mut self, enable: bool) {
        self.registers.hmirror = enable;
    }

    fn set_brightness(&mut self, level: i8) {
        self.registers.brightness = level.clamp(-2, 2);
    }

    fn set_saturation(&mut self, level: i8) {
        self.registers.saturation = level.clamp(-2, 2);
    }
}

#[derive(Debug)]
pub struct SimulatedDriver {
    sensor_id: SensorId,
    init_error: Option<i32>,
    fill_pixel: [u8; 2],
    failures_pending: usize,
    sensor: Option<SimulatedSensor>,
    pool: Vec<Vec<u8>>,
    outstanding: usize,
    pullups: Vec<u8>,
    flash: Option<FlashConfig>,
}

impl SimulatedDriver {
    pub fn new(sensor_id: SensorId) -> Self {
        Self {
            sensor_id,
            init_error: None,
            fill_pixel: [0x00, 0x00],
            failures_pending: 0,
            sensor: None,
            pool: Vec::new(),
            outstanding: 0,
            pullups: Vec::new(),
            flash: None,
        }
    }

    /// Makes every `init` fail with `code`.
    pub fn with_init_error(mut self, code: i32) -> Self {
        self.init_error = Some(code);
        self
    }

    /// Byte pair written to every pixel of RGB565 frames, in memory order.
    pub fn with_fill_pixel(mut self, pixel: [u8; 2]) -> Self {
        self.fill_pixel = pixel;
        self
    }

    pub fn clear_init_error(&mut self) {
        self.init_error = None;
    }

    /// The next `count` frame requests return no frame.
    pub fn fail_next_frames(&mut self, count: usize) {
        self.failures_pending = count;
    }

    pub fn registers(&self) -> Option<SensorRegisters> {
        self.sensor.as_ref().map(|sensor| sensor.registers)
    }

    pub fn frames_outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn pullups(&self) -> &[u8] {
        &self.pullups
    }

    pub fn flash(&self) -> Option<FlashConfig> {
        self.flash
    }

    fn render(&self, registers: &SensorRegisters, mut buffer: Vec<u8>) -> RawFrameBuffer {
        let (width, height) = registers.frame_size.dimensions();
        buffer.clear();
        match registers.pixel_format {
            PixelFormat::Rgb565 => {
                buffer.reserve(width * height * 2);
                for _ in 0..width * height {
                    buffer.extend_from_slice(&self.fill_pixel);
                }
            }
            PixelFormat::Jpeg => {
                buffer.extend_from_slice(&JPEG_SOI);
                buffer.extend_from_slice(&(width as u16).to_be_bytes());
                buffer.extend_from_slice(&(height as u16).to_be_bytes());
                buffer.extend_from_slice(&JPEG_EOI);
            }
        }
        RawFrameBuffer::new(width, height, registers.pixel_format, buffer)
    }
}

impl CameraDriver for SimulatedDriver {
    fn init(&mut self, profile: &SensorProfile) -> std::result::Result<(), i32> {
        if let Some(code) = self.init_error {
            self.sensor = None;
            return Err(code);
        }

        debug!(
            board = %profile.board,
            pid = self.sensor_id.pid(),
            frame_size = ?profile.frame_size,
            fb_count = profile.fb_count,
            "Simulated sensor init"
        );
        self.sensor = Some(SimulatedSensor {
            id: self.sensor_id,
            registers: SensorRegisters::new(profile.frame_size, profile.pixel_format),
        });
        self.pool = (0..profile.fb_count).map(|_| Vec::new()).collect();
        self.outstanding = 0;
        self.flash = None;
        Ok(())
    }

    fn sensor(&mut self) -> Option<&mut dyn SensorControl> {
        self.sensor
            .as_mut()
            .map(|sensor| sensor as &mut dyn SensorControl)
    }

    fn get_frame(&mut self) -> Option<RawFrameBuffer> {
        let registers = self.sensor.as_ref()?.registers;

        if self.failures_pending > 0 {
            self.failures_pending -= 1;
            debug!("Simulated frame grab failure");
            return None;
        }

        let Some(buffer) = self.pool.pop() else {
            debug!("No free frame buffer");
            return None;
        };

        self.outstanding += 1;
        Some(self.render(&registers, buffer))
    }

    fn return_frame(&mut self, frame: RawFrameBuffer) {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.pool.push(frame.into_data());
    }

    fn enable_pullups(&mut self, pins: &[u8]) {
        self.pullups = pins.to_vec();
    }

    fn attach_flash(&mut self, flash: &FlashConfig) {
        self.flash = Some(*flash);
    }
}
