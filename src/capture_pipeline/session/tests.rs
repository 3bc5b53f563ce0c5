use crate::capture_pipeline::common::error::{CaptureError, InitError};
use crate::capture_pipeline::sensor::{
    BoardVariant, CameraDriver, CaptureMode, FrameSize, PixelFormat, RawFrameBuffer,
    SensorControl, SensorId, SensorProfile, SessionConfig, SimulatedDriver, StreamEncoding,
};
use crate::capture_pipeline::session::{
    CaptureSession, INFERENCE_FRAME_SIZE, SessionState, apply_color_correction,
};

fn ready_session(sensor_id: SensorId, config: SessionConfig) -> CaptureSession<SimulatedDriver> {
    let mut session = CaptureSession::new(SimulatedDriver::new(sensor_id), config);
    session.initialize().unwrap();
    session
}

/// Driver whose init succeeds without ever exposing a sensor.
struct HeadlessDriver;

impl CameraDriver for HeadlessDriver {
    fn init(&mut self, _profile: &SensorProfile) -> std::result::Result<(), i32> {
        Ok(())
    }

    fn sensor(&mut self) -> Option<&mut dyn SensorControl> {
        None
    }

    fn get_frame(&mut self) -> Option<RawFrameBuffer> {
        None
    }

    fn return_frame(&mut self, _frame: RawFrameBuffer) {}
}

#[test]
fn test_initialize_drops_jpeg_stream_to_xga() {
    let session = ready_session(SensorId::Ov2640, SessionConfig::default());
    let registers = session.driver().registers().unwrap();

    assert_eq!(session.state(), SessionState::Ready(CaptureMode::Stream));
    assert_eq!(registers.frame_size, FrameSize::Xga);
    assert_eq!(registers.pixel_format, PixelFormat::Jpeg);
    assert_eq!(session.profile().unwrap().frame_size, FrameSize::Uxga);
    assert_eq!(session.sensor_id(), Some(SensorId::Ov2640));
}

#[test]
fn test_rgb565_stream_keeps_profile_frame_size() {
    let config = SessionConfig::builder()
        .stream_encoding(StreamEncoding::Rgb565)
        .build();
    let session = ready_session(SensorId::Ov2640, config);

    assert_eq!(
        session.driver().registers().unwrap().frame_size,
        FrameSize::R240x240
    );
}

#[test]
fn test_init_failure_leaves_session_uninitialized() {
    let driver = SimulatedDriver::new(SensorId::Ov2640).with_init_error(0x105);
    let mut session = CaptureSession::new(driver, SessionConfig::default());

    let result = session.initialize();

    assert_eq!(result, Err(InitError::Driver { code: 0x105 }));
    assert_eq!(session.state(), SessionState::Uninitialized);
    assert!(session.profile().is_none());
    assert!(matches!(
        session.capture_for_inference(),
        Err(CaptureError::Uninitialized)
    ));

    session.driver_mut().clear_init_error();
    assert!(session.initialize().is_ok());
    assert!(session.is_initialized());
}

#[test]
fn test_init_error_status_line() {
    let err = InitError::Driver { code: 0x105 };
    assert_eq!(err.to_string(), "camera init failed with error 0x105");
}

#[test]
fn test_capture_before_initialize_fails() {
    let mut session = CaptureSession::new(
        SimulatedDriver::new(SensorId::Ov2640),
        SessionConfig::default(),
    );

    assert!(matches!(
        session.capture_for_inference(),
        Err(CaptureError::Uninitialized)
    ));
    assert_eq!(session.driver().frames_outstanding(), 0);
}

#[test]
fn test_missing_sensor_handle_is_init_error() {
    let mut session = CaptureSession::new(HeadlessDriver, SessionConfig::default());

    assert_eq!(session.initialize(), Err(InitError::NoSensor));
    assert!(!session.is_initialized());
}

#[test]
fn test_ov3660_gets_color_correction() {
    let config = SessionConfig::builder().board(BoardVariant::AiThinker).build();
    let session = ready_session(SensorId::Ov3660, config);
    let registers = session.driver().registers().unwrap();

    assert!(registers.vflip);
    assert_eq!(registers.brightness, 1);
    assert_eq!(registers.saturation, -2);
}

#[test]
fn test_other_sensors_keep_default_color() {
    let config = SessionConfig::builder().board(BoardVariant::AiThinker).build();
    let session = ready_session(SensorId::Ov2640, config);
    let registers = session.driver().registers().unwrap();

    assert!(!registers.vflip);
    assert_eq!(registers.brightness, 0);
    assert_eq!(registers.saturation, 0);
}

#[test]
fn test_color_correction_is_idempotent() {
    let mut session = ready_session(SensorId::Ov3660, SessionConfig::default());
    let once = session.driver().registers().unwrap();

    let sensor = session.driver_mut().sensor().unwrap();
    apply_color_correction(sensor);
    apply_color_correction(sensor);

    assert_eq!(session.driver().registers().unwrap(), once);
}

#[test]
fn test_board_orientation_and_pullups() {
    let m5 = ready_session(
        SensorId::Ov2640,
        SessionConfig::builder().board(BoardVariant::M5StackWide).build(),
    );
    let registers = m5.driver().registers().unwrap();
    assert!(registers.vflip);
    assert!(registers.hmirror);

    let eye = ready_session(
        SensorId::Ov2640,
        SessionConfig::builder().board(BoardVariant::EspEye).build(),
    );
    assert_eq!(eye.driver().pullups(), &[13, 14]);
    assert!(!eye.driver().registers().unwrap().hmirror);
}

#[test]
fn test_flash_attached_when_enabled() {
    let session = ready_session(
        SensorId::Ov2640,
        SessionConfig::builder()
            .board(BoardVariant::AiThinker)
            .flash(true)
            .build(),
    );
    let flash = session.driver().flash().unwrap();

    assert_eq!(flash.pin, 4);
    assert_eq!(flash.frequency_hz, 5_000);
    assert_eq!(flash.resolution_bits, 8);
}

#[test]
fn test_capture_switches_to_inference_mode() {
    let mut session = ready_session(SensorId::Ov2640, SessionConfig::default());

    let frame = session.capture_for_inference().unwrap();

    assert_eq!(
        session.state(),
        SessionState::Ready(CaptureMode::InferenceCapture)
    );
    assert!(session.frame_outstanding());
    assert_eq!((frame.width(), frame.height()), INFERENCE_FRAME_SIZE.dimensions());
    assert_eq!(frame.format(), PixelFormat::Rgb565);
    assert_eq!(frame.len(), 96 * 96 * 2);

    session.release_and_restore(frame);
}

#[test]
fn test_release_restores_previous_registers() {
    let mut session = ready_session(SensorId::Ov3660, SessionConfig::default());
    let before = session.driver().registers().unwrap();

    let frame = session.capture_for_inference().unwrap();
    assert_eq!(
        session.driver().registers().unwrap().frame_size,
        FrameSize::R96x96
    );
    session.release_and_restore(frame);

    assert_eq!(session.driver().registers().unwrap(), before);
    assert_eq!(session.mode(), Some(CaptureMode::Stream));
    assert!(!session.frame_outstanding());
    assert_eq!(session.driver().frames_outstanding(), 0);
}

#[test]
fn test_no_frame_restores_stream_and_allows_retry() {
    let mut session = ready_session(SensorId::Ov2640, SessionConfig::default());
    let before = session.driver().registers().unwrap();
    session.driver_mut().fail_next_frames(1);

    let result = session.capture_for_inference();

    assert!(matches!(result, Err(CaptureError::NoFrame)));
    assert!(!session.frame_outstanding());
    assert_eq!(session.mode(), Some(CaptureMode::Stream));
    assert_eq!(session.driver().registers().unwrap(), before);

    let frame = session.capture_for_inference().unwrap();
    session.release_and_restore(frame);
}

#[test]
fn test_second_capture_without_release_is_refused() {
    let mut session = ready_session(SensorId::Ov2640, SessionConfig::default());

    let frame = session.capture_for_inference().unwrap();
    assert!(matches!(
        session.capture_for_inference(),
        Err(CaptureError::FrameOutstanding)
    ));
    assert_eq!(session.driver().frames_outstanding(), 1);
    assert_eq!(session.initialize(), Err(InitError::FrameOutstanding));

    session.release_and_restore(frame);
    assert!(session.capture_for_inference().is_ok());
}

#[test]
fn test_single_buffer_profile_survives_repeated_captures() {
    let config = SessionConfig::builder().fast_memory(false).build();
    let mut session = ready_session(SensorId::Ov2640, config);

    for _ in 0..5 {
        let frame = session.capture_for_inference().unwrap();
        session.release_and_restore(frame);
    }

    assert_eq!(session.driver().frames_outstanding(), 0);
}

#[test]
fn test_with_inference_frame_releases_after_closure() {
    let mut session = ready_session(SensorId::Ov2640, SessionConfig::default());

    let len = session.with_inference_frame(|frame| frame.len()).unwrap();

    assert_eq!(len, 96 * 96 * 2);
    assert!(!session.frame_outstanding());
    assert_eq!(session.mode(), Some(CaptureMode::Stream));
}

#[test]
fn test_reconfigure_reselects_profile() {
    let mut session = ready_session(SensorId::Ov2640, SessionConfig::default());

    session
        .reconfigure(SessionConfig::builder().fast_memory(false).build())
        .unwrap();

    assert_eq!(session.profile().unwrap().fb_count, 1);
    assert_eq!(session.profile().unwrap().frame_size, FrameSize::Svga);
}

#[test]
fn test_release_without_capture_leaves_pool_alone() {
    let config = SessionConfig::builder().fast_memory(false).build();
    let mut session = ready_session(SensorId::Ov2640, config);
    let stray = RawFrameBuffer::new(96, 96, PixelFormat::Rgb565, vec![0; 96 * 96 * 2]);

    session.release_and_restore(stray);

    assert!(!session.frame_outstanding());
    assert_eq!(session.mode(), Some(CaptureMode::Stream));
    // One-buffer profile: the pool still holds exactly one buffer.
    let driver = session.driver_mut();
    let frame = driver.get_frame().unwrap();
    assert!(driver.get_frame().is_none());
    driver.return_frame(frame);
}

#[test]
fn test_stream_drop_target_is_xga_without_fast_memory() {
    let config = SessionConfig::builder().fast_memory(false).build();
    let session = ready_session(SensorId::Ov2640, config);

    assert_eq!(session.profile().unwrap().frame_size, FrameSize::Svga);
    assert_eq!(
        session.driver().registers().unwrap().frame_size,
        FrameSize::Xga
    );
}
