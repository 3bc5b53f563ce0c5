use tracing::{instrument, trace};

use crate::capture_pipeline::common::error::ConvertError;
use crate::capture_pipeline::convert::rgb565::{self, BYTES_PER_PIXEL};
use crate::capture_pipeline::convert::tensor::{
    IntensityTensor, TENSOR_HEIGHT, TENSOR_LEN, TENSOR_WIDTH,
};
use crate::capture_pipeline::sensor::{PixelFormat, RawFrameBuffer};

pub trait FrameConverter {
    /// Writes the tensor for `frame` into `out`. Must not allocate.
    fn convert(&self, frame: &RawFrameBuffer, out: &mut IntensityTensor) -> Result<(), ConvertError>;
}

/// RGB565 to single-channel signed luma.
///
/// Three-channel input was too slow for the target processor, so the classifier
/// takes grayscale.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscaleConverter;

impl GrayscaleConverter {
    fn check_frame(frame: &RawFrameBuffer) -> Result<(), ConvertError> {
        if frame.format() != PixelFormat::Rgb565 {
            return Err(ConvertError::UnsupportedFormat(frame.format()));
        }

        let expected_len = TENSOR_LEN * BYTES_PER_PIXEL;
        if frame.width() != TENSOR_WIDTH
            || frame.height() != TENSOR_HEIGHT
            || frame.len() != expected_len
        {
            return Err(ConvertError::SizeMismatch {
                width: frame.width(),
                height: frame.height(),
                actual_len: frame.len(),
                expected_width: TENSOR_WIDTH,
                expected_height: TENSOR_HEIGHT,
                expected_len,
            });
        }

        Ok(())
    }
}

impl FrameConverter for GrayscaleConverter {
    #[instrument(level = "debug", skip_all, fields(len = frame.len()))]
    fn convert(&self, frame: &RawFrameBuffer, out: &mut IntensityTensor) -> Result<(), ConvertError> {
        Self::check_frame(frame)?;

        for (value, pixel) in out
            .iter_mut()
            .zip(frame.data().chunks_exact(BYTES_PER_PIXEL))
        {
            *value = rgb565::intensity(pixel[0], pixel[1]);
        }

        trace!(first = out[0], last = out[TENSOR_LEN - 1], "Frame converted");
        Ok(())
    }
}
