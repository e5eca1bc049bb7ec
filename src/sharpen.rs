//! Outline sharpening: pixels next to clearly darker neighbors are pulled
//! toward them, which thickens and deepens dark outlines.

use crate::buffer::PixelBuffer;
use crate::color::{self, Color};
use crate::config::SharpenParams;
use log::debug;

/// True if `neighbor` is darker than `this` by more than `subtlety` in every channel.
fn is_darker(this: Color, neighbor: Color, subtlety: f32) -> bool {
    neighbor.red < this.red - subtlety
        && neighbor.green < this.green - subtlety
        && neighbor.blue < this.blue - subtlety
}

/// Reads `buffer` untouched and returns the sharpened copy.
///
/// Neighbors are scanned row by row (`dy` outer, `dx` inner). Each match averages
/// the pixel written so far with the neighbor and raises it to `exponent`, so
/// several dark neighbors compound.
pub fn sharpen<B: PixelBuffer>(buffer: &B, params: &SharpenParams) -> B {
    let mut output = buffer.clone();
    let width = buffer.width();
    let height = buffer.height();
    if width < 3 || height < 3 {
        return output;
    }

    let mut darkened = 0usize;
    for x in 1..width - 1 {
        for y in 1..height - 1 {
            let this = buffer.get_color(x, y);
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let neighbor =
                        buffer.get_color((x as i32 + dx) as u32, (y as i32 + dy) as u32);
                    if !is_darker(this, neighbor, params.subtlety) {
                        continue;
                    }
                    let current = output.get_color(x, y);
                    let mixed = color::scale(color::add(current, neighbor), 2.0);
                    output.set_color(x, y, color::powf(mixed, params.exponent));
                    darkened += 1;
                }
            }
        }
    }

    debug!(
        "sharpen: subtlety {}, exponent {}, {} darkening steps",
        params.subtlety, params.exponent, darkened
    );
    output
}
