use tracing::{debug, error, info, instrument, warn};

use crate::capture_pipeline::common::error::{CaptureError, InitError};
use crate::capture_pipeline::sensor::{
    CameraDriver, CaptureMode, FrameSize, PixelFormat, RawFrameBuffer, STREAM_FRAME_SIZE,
    SensorControl, SensorId, SensorProfile, SessionConfig,
};

/// Resolution the sensor is switched to for every inference capture.
pub const INFERENCE_FRAME_SIZE: FrameSize = FrameSize::R96x96;

/// Encoding the sensor is switched to for every inference capture.
pub const INFERENCE_PIXEL_FORMAT: PixelFormat = PixelFormat::Rgb565;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready(CaptureMode),
}

/// Frame size and encoding to put back after an inference capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StreamSetting {
    frame_size: FrameSize,
    pixel_format: PixelFormat,
}

/// One-time OV3660 fix-up: undo the vertical flip, lift brightness one step and
/// pull saturation down two. Absolute writes, so repeating it is harmless.
pub fn apply_color_correction(sensor: &mut dyn SensorControl) {
    sensor.set_vflip(true);
    sensor.set_brightness(1);
    sensor.set_saturation(-2);
}

/// Owns the camera driver and switches the sensor between the streaming mode and
/// the inference capture mode.
pub struct CaptureSession<D: CameraDriver> {
    driver: D,
    config: SessionConfig,
    profile: Option<SensorProfile>,
    sensor_id: Option<SensorId>,
    stream: Option<StreamSetting>,
    state: SessionState,
    outstanding: bool,
}

impl<D: CameraDriver> CaptureSession<D> {
    pub fn new(driver: D, config: SessionConfig) -> Self {
        Self {
            driver,
            config,
            profile: None,
            sensor_id: None,
            stream: None,
            state: SessionState::Uninitialized,
            outstanding: false,
        }
    }

    fn reset(&mut self) {
        self.profile = None;
        self.sensor_id = None;
        self.stream = None;
        self.state = SessionState::Uninitialized;
    }

    #[instrument(skip(self), fields(board = %self.config.board, fast_memory = self.config.fast_memory))]
    pub fn initialize(&mut self) -> Result<(), InitError> {
        if self.outstanding {
            return Err(InitError::FrameOutstanding);
        }

        let profile = SensorProfile::select(&self.config);
        self.driver.enable_pullups(profile.board.input_pullups());

        if let Err(code) = self.driver.init(&profile) {
            self.reset();
            let err = InitError::Driver { code };
            error!("{}", err);
            return Err(err);
        }

        let Some(sensor) = self.driver.sensor() else {
            self.reset();
            error!("{}", InitError::NoSensor);
            return Err(InitError::NoSensor);
        };

        let sensor_id = sensor.id();
        if sensor_id.needs_color_correction() {
            debug!(?sensor_id, "Applying color and orientation correction");
            apply_color_correction(sensor);
        }

        // Smaller stream frames give a faster first frame.
        let mut stream_size = profile.frame_size;
        if profile.pixel_format.is_compressed() {
            stream_size = STREAM_FRAME_SIZE;
            sensor.set_frame_size(stream_size);
        }

        if let Some((vflip, hmirror)) = profile.board.orientation() {
            sensor.set_vflip(vflip);
            if hmirror {
                sensor.set_hmirror(true);
            }
        }

        if let Some(flash) = &profile.flash {
            self.driver.attach_flash(flash);
        }

        info!(
            ?sensor_id,
            frame_size = ?stream_size,
            pixel_format = ?profile.pixel_format,
            fb_count = profile.fb_count,
            "Camera initialized"
        );

        self.stream = Some(StreamSetting {
            frame_size: stream_size,
            pixel_format: profile.pixel_format,
        });
        self.profile = Some(profile);
        self.sensor_id = Some(sensor_id);
        self.state = SessionState::Ready(CaptureMode::Stream);
        Ok(())
    }

    /// Replaces the configuration and brings the sensor up again with it.
    pub fn reconfigure(&mut self, config: SessionConfig) -> Result<(), InitError> {
        if self.outstanding {
            return Err(InitError::FrameOutstanding);
        }
        self.config = config;
        self.initialize()
    }

    /// Switches to the inference capture mode and pulls one frame.
    ///
    /// On success the frame must be handed back through `release_and_restore`.
    /// On `NoFrame` the stream mode is already restored and nothing is
    /// outstanding, so the call can simply be repeated.
    pub fn capture_for_inference(&mut self) -> Result<RawFrameBuffer, CaptureError> {
        if self.state == SessionState::Uninitialized {
            error!("Capture requested on an uninitialized camera");
            return Err(CaptureError::Uninitialized);
        }
        if self.outstanding {
            warn!("Capture requested while a frame is still outstanding");
            return Err(CaptureError::FrameOutstanding);
        }

        let Some(sensor) = self.driver.sensor() else {
            error!("Camera lost its sensor handle");
            self.reset();
            return Err(CaptureError::Uninitialized);
        };
        sensor.set_frame_size(INFERENCE_FRAME_SIZE);
        sensor.set_pixel_format(INFERENCE_PIXEL_FORMAT);
        self.state = SessionState::Ready(CaptureMode::InferenceCapture);

        match self.driver.get_frame() {
            Some(frame) => {
                self.outstanding = true;
                debug!(
                    width = frame.width(),
                    height = frame.height(),
                    len = frame.len(),
                    "Frame acquired"
                );
                Ok(frame)
            }
            None => {
                error!("{}", CaptureError::NoFrame);
                self.restore_stream();
                Err(CaptureError::NoFrame)
            }
        }
    }

    /// Returns the frame to the driver and puts the stream mode back.
    ///
    /// A buffer handed in while no capture is outstanding did not come from this
    /// session; it is dropped instead of being pushed into the driver's pool.
    pub fn release_and_restore(&mut self, frame: RawFrameBuffer) {
        if !self.outstanding {
            warn!(len = frame.len(), "Release without an outstanding capture ignored");
            return;
        }
        self.driver.return_frame(frame);
        self.outstanding = false;
        self.restore_stream();
    }

    /// Captures a frame, runs `f` on it and releases it again whatever `f` returns.
    pub fn with_inference_frame<T, F>(&mut self, f: F) -> Result<T, CaptureError>
    where
        F: FnOnce(&RawFrameBuffer) -> T,
    {
        let frame = self.capture_for_inference()?;
        let output = f(&frame);
        self.release_and_restore(frame);
        Ok(output)
    }

    fn restore_stream(&mut self) {
        let Some(stream) = self.stream else {
            return;
        };
        if let Some(sensor) = self.driver.sensor() {
            sensor.set_frame_size(stream.frame_size);
            sensor.set_pixel_format(stream.pixel_format);
        }
        self.state = SessionState::Ready(CaptureMode::Stream);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> Option<CaptureMode> {
        match self.state {
            SessionState::Uninitialized => None,
            SessionState::Ready(mode) => Some(mode),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state != SessionState::Uninitialized
    }

    pub fn frame_outstanding(&self) -> bool {
        self.outstanding
    }

    pub fn sensor_id(&self) -> Option<SensorId> {
        self.sensor_id
    }

    pub fn profile(&self) -> Option<&SensorProfile> {
        self.profile.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
