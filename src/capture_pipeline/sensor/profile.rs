//! Board variants and the immutable sensor configuration profile
//!
//! A board is chosen once at startup from a closed set of named variants. The
//! profile handed to the driver is derived from the board and from whether fast
//! external memory is fitted, and is never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use super::types::{FrameBufferLocation, FrameSize, GrabMode, PixelFormat};

/// Camera master clock.
pub const XCLK_FREQ_HZ: u32 = 20_000_000;

/// Frame size the stream is dropped to after init when it is compressed.
pub const STREAM_FRAME_SIZE: FrameSize = FrameSize::Xga;

/// GPIO assignment of the camera interface. `None` marks an unconnected line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    /// Y2..Y9
    pub data: [u8; 8],
    pub xclk: u8,
    pub pclk: u8,
    pub vsync: u8,
    pub href: u8,
    pub sccb_sda: u8,
    pub sccb_scl: u8,
    pub pwdn: Option<u8>,
    pub reset: Option<u8>,
}

/// LED flash driven through a PWM channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashConfig {
    pub pin: u8,
    pub frequency_hz: u32,
    pub resolution_bits: u8,
}

impl FlashConfig {
    fn on_pin(pin: u8) -> Self {
        Self {
            pin,
            frequency_hz: 5_000,
            resolution_bits: 8,
        }
    }
}

/// Supported camera boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardVariant {
    #[default]
    Esp32S3Eye,
    EspEye,
    AiThinker,
    M5StackWide,
}

impl BoardVariant {
    pub fn pins(self) -> PinAssignment {
        match self {
            BoardVariant::Esp32S3Eye => PinAssignment {
                data: [11, 9, 8, 10, 12, 18, 17, 16],
                xclk: 15,
                pclk: 13,
                vsync: 6,
                href: 7,
                sccb_sda: 4,
                sccb_scl: 5,
                pwdn: None,
                reset: None,
            },
            BoardVariant::EspEye => PinAssignment {
                data: [34, 13, 14, 35, 39, 38, 37, 36],
                xclk: 4,
                pclk: 25,
                vsync: 5,
                href: 27,
                sccb_sda: 18,
                sccb_scl: 23,
                pwdn: None,
                reset: None,
            },
            BoardVariant::AiThinker => PinAssignment {
                data: [5, 18, 19, 21, 36, 39, 34, 35],
                xclk: 0,
                pclk: 22,
                vsync: 25,
                href: 23,
                sccb_sda: 26,
                sccb_scl: 27,
                pwdn: Some(32),
                reset: None,
            },
            BoardVariant::M5StackWide => PinAssignment {
                data: [32, 35, 34, 5, 39, 18, 36, 19],
                xclk: 27,
                pclk: 21,
                vsync: 25,
                href: 26,
                sccb_sda: 22,
                sccb_scl: 23,
                pwdn: None,
                reset: Some(15),
            },
        }
    }

    pub fn flash_pin(self) -> Option<u8> {
        match self {
            BoardVariant::Esp32S3Eye => None,
            BoardVariant::EspEye => Some(22),
            BoardVariant::AiThinker => Some(4),
            BoardVariant::M5StackWide => Some(2),
        }
    }

    /// Pins that must be pulled up before the sensor is brought up.
    pub fn input_pullups(self) -> &'static [u8] {
        match self {
            BoardVariant::EspEye => &[13, 14],
            _ => &[],
        }
    }

    /// Fixed mounting correction as `(vflip, hmirror)`, if the board needs one.
    pub fn orientation(self) -> Option<(bool, bool)> {
        match self {
            BoardVariant::Esp32S3Eye => Some((true, false)),
            BoardVariant::M5StackWide => Some((true, true)),
            BoardVariant::EspEye | BoardVariant::AiThinker => None,
        }
    }
}

impl fmt::Display for BoardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoardVariant::Esp32S3Eye => "esp32s3-eye",
            BoardVariant::EspEye => "esp-eye",
            BoardVariant::AiThinker => "ai-thinker",
            BoardVariant::M5StackWide => "m5stack-wide",
        };
        f.write_str(name)
    }
}

impl FromStr for BoardVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "esp32s3-eye" | "s3-eye" => Ok(BoardVariant::Esp32S3Eye),
            "esp-eye" => Ok(BoardVariant::EspEye),
            "ai-thinker" | "esp32cam" => Ok(BoardVariant::AiThinker),
            "m5stack-wide" => Ok(BoardVariant::M5StackWide),
            other => Err(format!("unknown board variant '{}'", other)),
        }
    }
}

/// Encoding used while the sensor is in the streaming mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamEncoding {
    #[default]
    Jpeg,
    Rgb565,
}

impl StreamEncoding {
    fn pixel_format(self) -> PixelFormat {
        match self {
            StreamEncoding::Jpeg => PixelFormat::Jpeg,
            StreamEncoding::Rgb565 => PixelFormat::Rgb565,
        }
    }
}

/// Startup choices that select one sensor profile.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub board: BoardVariant,
    /// Whether external PSRAM was detected
    pub fast_memory: bool,
    pub stream_encoding: StreamEncoding,
    /// Attach the LED flash when the board has one
    pub flash: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board: BoardVariant::default(),
            fast_memory: true,
            stream_encoding: StreamEncoding::default(),
            flash: false,
        }
    }
}

impl SessionConfig {
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for SessionConfig
#[derive(Default)]
pub struct SessionConfigBuilder {
    board: Option<BoardVariant>,
    fast_memory: Option<bool>,
    stream_encoding: Option<StreamEncoding>,
    flash: Option<bool>,
}

impl SessionConfigBuilder {
    pub fn board(mut self, board: BoardVariant) -> Self {
        self.board = Some(board);
        self
    }

    pub fn fast_memory(mut self, present: bool) -> Self {
        self.fast_memory = Some(present);
        self
    }

    pub fn stream_encoding(mut self, encoding: StreamEncoding) -> Self {
        self.stream_encoding = Some(encoding);
        self
    }

    pub fn flash(mut self, enable: bool) -> Self {
        self.flash = Some(enable);
        self
    }

    pub fn build(self) -> SessionConfig {
        let default = SessionConfig::default();
        SessionConfig {
            board: self.board.unwrap_or(default.board),
            fast_memory: self.fast_memory.unwrap_or(default.fast_memory),
            stream_encoding: self.stream_encoding.unwrap_or(default.stream_encoding),
            flash: self.flash.unwrap_or(default.flash),
        }
    }
}

/// Everything the driver needs for one bring-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorProfile {
    pub board: BoardVariant,
    pub pins: PinAssignment,
    pub xclk_freq_hz: u32,
    pub frame_size: FrameSize,
    pub pixel_format: PixelFormat,
    pub jpeg_quality: u8,
    pub fb_location: FrameBufferLocation,
    pub fb_count: usize,
    pub grab_mode: GrabMode,
    pub flash: Option<FlashConfig>,
}

impl SensorProfile {
    pub fn select(config: &SessionConfig) -> Self {
        let pixel_format = config.stream_encoding.pixel_format();
        let (frame_size, jpeg_quality, fb_location, fb_count, grab_mode) =
            match (pixel_format.is_compressed(), config.fast_memory) {
                (true, true) => (
                    FrameSize::Uxga,
                    10,
                    FrameBufferLocation::Psram,
                    2,
                    GrabMode::Latest,
                ),
                (true, false) => (
                    FrameSize::Svga,
                    12,
                    FrameBufferLocation::Dram,
                    1,
                    GrabMode::WhenEmpty,
                ),
                (false, true) => (
                    FrameSize::R240x240,
                    12,
                    FrameBufferLocation::Psram,
                    2,
                    GrabMode::WhenEmpty,
                ),
                (false, false) => (
                    FrameSize::R240x240,
                    12,
                    FrameBufferLocation::Dram,
                    1,
                    GrabMode::WhenEmpty,
                ),
            };

        let flash = if config.flash {
            config.board.flash_pin().map(FlashConfig::on_pin)
        } else {
            None
        };

        Self {
            board: config.board,
            pins: config.board.pins(),
            xclk_freq_hz: XCLK_FREQ_HZ,
            frame_size,
            pixel_format,
            jpeg_quality,
            fb_location,
            fb_count,
            grab_mode,
            flash,
        }
    }
}
