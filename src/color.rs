//! Normalized color math shared by every filter.
//!
//! Colors are `palette::Srgb<f32>` with each channel in `[0, 1]`. Pixels at
//! rest are packed RGBA8 `u32` values laid out as `R<<24 | G<<16 | B<<8 | A`.

use palette::Srgb;

/// Normalized RGB, alpha lives on the buffer.
pub type Color = Srgb<f32>;

pub const OPAQUE_BLACK: u32 = 0x0000_00FF;
pub const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;
/// Fill used where a filter produced nothing (surface change skips transparent input).
pub const TRANSPARENT_WHITE: u32 = 0xFFFF_FF00;

/// Euclidean distance between two colors in normalized RGB.
pub fn distance(c1: Color, c2: Color) -> f32 {
    let dr = c1.red - c2.red;
    let dg = c1.green - c2.green;
    let db = c1.blue - c2.blue;
    (dr * dr + dg * dg + db * db).sqrt()
}

fn encode_channel(c: f32) -> u32 {
    // floor, then clamp (out of range must saturate, never wrap)
    num::clamp((c * 255.0).floor(), 0.0, 255.0) as u32
}

/// Packs a color into an opaque RGBA8 value.
pub fn encode(c: Color) -> u32 {
    encode_channel(c.red) << 24
        | encode_channel(c.green) << 16
        | encode_channel(c.blue) << 8
        | 0xFF
}

/// Unpacks the color channels of an RGBA8 value, ignoring alpha.
pub fn decode(packed: u32) -> Color {
    let [r, g, b, _] = packed.to_be_bytes();
    Srgb::new(r, g, b).into_format()
}

pub fn alpha(packed: u32) -> u8 {
    packed.to_be_bytes()[3]
}

/// Componentwise sum, no clamping.
pub fn add(a: Color, b: Color) -> Color {
    Srgb::new(a.red + b.red, a.green + b.green, a.blue + b.blue)
}

pub fn scale(c: Color, divisor: f32) -> Color {
    Srgb::new(c.red / divisor, c.green / divisor, c.blue / divisor)
}

pub fn powf(c: Color, exponent: f32) -> Color {
    Srgb::new(
        c.red.powf(exponent),
        c.green.powf(exponent),
        c.blue.powf(exponent),
    )
}
