//! Stochastic color relaxation ("blobbing").
//!
//! Each iteration picks a random pixel and pulls it to the mean of the pixels
//! in its square neighborhood that are already close to it in color. Writes are
//! immediate, so later samples see earlier ones. Flat regions grow out of the
//! noise the way hand-placed pixel art does.

use crate::buffer::PixelBuffer;
use crate::color::{self, Color};
use crate::config::RelaxParams;
use log::debug;
use palette::Srgb;
use rand::Rng;

/// Mean color of the neighbors of `(x, y)` within `threshold` of `center`,
/// or `None` if no neighbor qualifies.
fn neighborhood_mean<B: PixelBuffer>(
    buffer: &B,
    x: u32,
    y: u32,
    center: Color,
    radius: i32,
    threshold: f32,
) -> Option<Color> {
    let mut sum = Srgb::new(0.0, 0.0, 0.0);
    let mut count = 0u32;

    for dx in -radius..=radius {
        for dy in -radius..=radius {
            let (nx, ny) = match buffer.offset(x, y, dx, dy) {
                Some(position) => position,
                None => continue,
            };
            let neighbor = buffer.get_color(nx, ny);
            if color::distance(center, neighbor) < threshold {
                sum = color::add(sum, neighbor);
                count += 1;
            }
        }
    }

    // A zero threshold rejects even the center itself.
    if count == 0 {
        return None;
    }
    Some(color::scale(sum, count as f32))
}

/// Relaxes `buffer` in place and hands it back.
///
/// Positions are drawn with replacement from `rng`, so a seeded generator makes
/// the output reproducible.
pub fn relax<B: PixelBuffer, R: Rng + ?Sized>(
    mut buffer: B,
    params: &RelaxParams,
    rng: &mut R,
) -> B {
    let width = buffer.width();
    let height = buffer.height();
    // offsets beyond the larger side are all out of bounds
    let radius = params.kernel_radius.min(width.max(height)) as i32;

    let mut writes = 0u64;
    if width > 0 && height > 0 {
        for _ in 0..params.iterations {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);

            let center = buffer.get_color(x, y);
            if let Some(mean) =
                neighborhood_mean(&buffer, x, y, center, radius, params.reduction_threshold)
            {
                buffer.set_color(x, y, mean);
                writes += 1;
            }
        }
    }

    debug!(
        "relax: radius {}, {} iterations, threshold {}, {} writes",
        params.kernel_radius, params.iterations, params.reduction_threshold, writes
    );
    buffer
}
