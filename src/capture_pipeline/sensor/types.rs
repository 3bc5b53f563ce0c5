//! Sensor-level value types shared by the driver boundary and the session

/// Resolutions the sensor can be asked for, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameSize {
    /// 96x96
    R96x96,
    /// 160x120
    Qqvga,
    /// 176x144
    Qcif,
    /// 240x176
    Hqvga,
    /// 240x240
    R240x240,
    /// 320x240
    Qvga,
    /// 400x296
    Cif,
    /// 480x320
    Hvga,
    /// 640x480
    Vga,
    /// 800x600
    Svga,
    /// 1024x768
    Xga,
    /// 1280x720
    Hd,
    /// 1280x1024
    Sxga,
    /// 1600x1200
    Uxga,
    /// 1920x1080
    Fhd,
    /// 2048x1536
    Qxga,
    /// 2560x1920
    Qsxga,
}

impl FrameSize {
    /// Pixel dimensions as `(width, height)`.
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            FrameSize::R96x96 => (96, 96),
            FrameSize::Qqvga => (160, 120),
            FrameSize::Qcif => (176, 144),
            FrameSize::Hqvga => (240, 176),
            FrameSize::R240x240 => (240, 240),
            FrameSize::Qvga => (320, 240),
            FrameSize::Cif => (400, 296),
            FrameSize::Hvga => (480, 320),
            FrameSize::Vga => (640, 480),
            FrameSize::Svga => (800, 600),
            FrameSize::Xga => (1024, 768),
            FrameSize::Hd => (1280, 720),
            FrameSize::Sxga => (1280, 1024),
            FrameSize::Uxga => (1600, 1200),
            FrameSize::Fhd => (1920, 1080),
            FrameSize::Qxga => (2048, 1536),
            FrameSize::Qsxga => (2560, 1920),
        }
    }
}

/// Pixel encodings the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 16 bits per pixel, 5/6/5 bit fields, big-endian byte pair.
    Rgb565,
    /// Compressed stream encoding.
    Jpeg,
}

impl PixelFormat {
    /// Fixed bytes per pixel, `None` for compressed encodings.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            PixelFormat::Rgb565 => Some(2),
            PixelFormat::Jpeg => None,
        }
    }

    pub fn is_compressed(self) -> bool {
        matches!(self, PixelFormat::Jpeg)
    }
}

/// Where the driver places its frame buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameBufferLocation {
    /// External PSRAM
    Psram,
    /// On-chip DRAM
    Dram,
}

/// Grab policy for frame requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabMode {
    /// Wait until a buffer is free
    WhenEmpty,
    /// Always hand out the most recent frame
    Latest,
}

/// The two runtime configurations the session switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Stream,
    InferenceCapture,
}

/// Sensor part, identified by its product id register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorId {
    Ov2640,
    Ov3660,
    Ov5640,
    Ov7670,
    Ov7725,
    Gc2145,
    Unknown(u16),
}

impl SensorId {
    pub fn from_pid(pid: u16) -> Self {
        match pid {
            0x26 => SensorId::Ov2640,
            0x3660 => SensorId::Ov3660,
            0x5640 => SensorId::Ov5640,
            0x76 => SensorId::Ov7670,
            0x77 => SensorId::Ov7725,
            0x2145 => SensorId::Gc2145,
            other => SensorId::Unknown(other),
        }
    }

    pub fn pid(self) -> u16 {
        match self {
            SensorId::Ov2640 => 0x26,
            SensorId::Ov3660 => 0x3660,
            SensorId::Ov5640 => 0x5640,
            SensorId::Ov7670 => 0x76,
            SensorId::Ov7725 => 0x77,
            SensorId::Gc2145 => 0x2145,
            SensorId::Unknown(pid) => pid,
        }
    }

    /// Early OV3660 modules ship flipped vertically with oversaturated color.
    pub fn needs_color_correction(self) -> bool {
        self == SensorId::Ov3660
    }
}

/// Register state a sensor holds after a sequence of control writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorRegisters {
    pub frame_size: FrameSize,
    pub pixel_format: PixelFormat,
    pub vflip: bool,
    pub hmirror: bool,
    pub brightness: i8,
    pub saturation: i8,
}

impl SensorRegisters {
    pub fn new(frame_size: FrameSize, pixel_format: PixelFormat) -> Self {
        Self {
            frame_size,
            pixel_format,
            vflip: false,
            hmirror: false,
            brightness: 0,
            saturation: 0,
        }
    }
}
