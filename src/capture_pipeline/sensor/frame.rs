//! Raw frame buffer handed out by the camera driver

use super::types::PixelFormat;

/// One frame of driver-owned memory.
///
/// Not `Clone`: the handle is the borrow. It has to go back to the driver via
/// `CameraDriver::return_frame` (normally through
/// `CaptureSession::release_and_restore`), after which it no longer exists.
#[derive(Debug)]
pub struct RawFrameBuffer {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl RawFrameBuffer {
    /// Called by driver implementations when lending out a buffer.
    pub fn new(width: usize, height: usize, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Byte length of the pixel payload.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Gives the backing memory back to a driver's buffer pool.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
