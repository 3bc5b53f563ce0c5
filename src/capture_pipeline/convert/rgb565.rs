//! RGB565 unpacking and fixed-point luma

/// Bytes per packed RGB565 pixel.
pub const BYTES_PER_PIXEL: usize = 2;

/// BT.601 luma weights scaled by 1024.
const LUMA_R: u32 = 305;
const LUMA_G: u32 = 600;
const LUMA_B: u32 = 119;
const LUMA_SHIFT: u32 = 10;

/// Offset moving 0..=255 luma into the signed input range.
const ZERO_POINT: i16 = 128;

/// Widens one pixel to 8-bit channels, given its two bytes in memory order.
///
/// The first byte is read as the low half of the pixel, so against the sensor's
/// big-endian layout red and blue come out swapped. Kept as is until it has been
/// checked against a reference image.
#[inline]
pub fn unpack(first: u8, second: u8) -> (u8, u8, u8) {
    let r = (second & 0x1F) << 3;
    let g = ((first & 0x07) << 5) | ((second & 0xE0) >> 3);
    let b = first & 0xF8;
    (r, g, b)
}

/// `(305*R + 600*G + 119*B) >> 10`. Never exceeds 250 for widened 565 input.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let weighted = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    (weighted >> LUMA_SHIFT) as u8
}

/// One packed pixel to one signed intensity.
#[inline]
pub fn intensity(first: u8, second: u8) -> i8 {
    let (r, g, b) = unpack(first, second);
    (luminance(r, g, b) as i16 - ZERO_POINT) as i8
}
