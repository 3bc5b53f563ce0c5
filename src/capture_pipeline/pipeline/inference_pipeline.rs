use tracing::{info, instrument};

use crate::capture_pipeline::common::error::{InferenceError, Result};
use crate::capture_pipeline::convert::{FrameConverter, GrayscaleConverter, IntensityTensor, TENSOR_LEN};
use crate::capture_pipeline::inference::{Classification, InferenceEngine, classify};
use crate::capture_pipeline::pipeline::timing::PipelineTimings;
use crate::capture_pipeline::sensor::{CameraDriver, SessionConfig};
use crate::capture_pipeline::session::CaptureSession;

/// Capture, convert, release, infer.
pub struct InferencePipeline<D: CameraDriver, C: FrameConverter, E: InferenceEngine> {
    session: CaptureSession<D>,
    converter: C,
    engine: E,
}

impl<D: CameraDriver, E: InferenceEngine> InferencePipeline<D, GrayscaleConverter, E> {
    pub fn new(driver: D, engine: E, config: SessionConfig) -> Self {
        Self {
            session: CaptureSession::new(driver, config),
            converter: GrayscaleConverter,
            engine,
        }
    }
}

impl<D: CameraDriver, C: FrameConverter, E: InferenceEngine> InferencePipeline<D, C, E> {
    pub fn with_custom(session: CaptureSession<D>, converter: C, engine: E) -> Self {
        Self {
            session,
            converter,
            engine,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.check_engine_input()?;
        self.session.initialize()?;
        Ok(())
    }

    /// One capture and classification. `tensor` holds the converted frame afterwards.
    #[instrument(skip_all)]
    pub fn run_once(&mut self, tensor: &mut IntensityTensor) -> Result<Classification> {
        let mut timings = PipelineTimings::new();
        self.run_timed(tensor, &mut timings)
    }

    #[instrument(skip_all)]
    pub fn run_once_with_timings(
        &mut self,
        tensor: &mut IntensityTensor,
    ) -> Result<(Classification, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let classification = self.run_timed(tensor, &mut timings)?;
        Ok((classification, timings))
    }

    fn run_timed(
        &mut self,
        tensor: &mut IntensityTensor,
        timings: &mut PipelineTimings,
    ) -> Result<Classification> {
        // A wrong input slot is rejected before the sensor is switched at all.
        self.check_engine_input()?;

        let session = &mut self.session;
        let frame = timings.time("capture", || {
            let _span = tracing::info_span!("capture").entered();
            session.capture_for_inference()
        })?;

        let converter = &self.converter;
        let converted = timings.time("convert", || {
            let _span = tracing::info_span!("convert",
                width = frame.width(),
                height = frame.height()
            ).entered();
            converter.convert(&frame, tensor)
        });

        // Release before looking at the conversion result so the buffer goes back
        // on the error path too.
        timings.time("release", || session.release_and_restore(frame));

        converted?;

        let engine = &mut self.engine;
        let scores = timings.time("infer", || {
            let _span = tracing::info_span!("infer").entered();
            engine.invoke(tensor)
        })?;

        let classification = classify(&scores)?;
        info!(
            label = classification.label,
            score = classification.score,
            elapsed_ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Classification complete"
        );
        Ok(classification)
    }

    fn check_engine_input(&self) -> std::result::Result<(), InferenceError> {
        let expected = self.engine.input_len();
        if expected != TENSOR_LEN {
            return Err(InferenceError::InputLength {
                expected,
                actual: TENSOR_LEN,
            });
        }
        Ok(())
    }

    pub fn session(&self) -> &CaptureSession<D> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CaptureSession<D> {
        &mut self.session
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }
}
