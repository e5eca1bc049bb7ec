//! Finite-difference filters: a pseudo normal map and a binary edge map.
//!
//! Both read an untouched input and write into a fresh buffer. Only interior
//! pixels are visited; the 1-pixel border and transparent pixels keep the
//! output's fill.

use crate::buffer::PixelBuffer;
use crate::color::{self, OPAQUE_BLACK, TRANSPARENT_WHITE};
use crate::config::EdgeParams;
use log::debug;
use palette::Srgb;

/// Color distance across `(x, y)` horizontally and vertically, or `None` on the border.
pub fn gradient_pair<B: PixelBuffer>(buffer: &B, x: u32, y: u32) -> Option<(f32, f32)> {
    let color_at = |dx, dy| {
        buffer
            .offset(x, y, dx, dy)
            .map(|(nx, ny)| buffer.get_color(nx, ny))
    };
    let horizontal = color::distance(color_at(-1, 0)?, color_at(1, 0)?);
    let vertical = color::distance(color_at(0, -1)?, color_at(0, 1)?);
    Some((horizontal, vertical))
}

/// Calls `f` with every opaque interior pixel and its gradient.
fn for_each_gradient<B: PixelBuffer, F: FnMut(u32, u32, f32, f32)>(buffer: &B, mut f: F) {
    let width = buffer.width();
    let height = buffer.height();
    if width < 3 || height < 3 {
        return;
    }
    for x in 1..width - 1 {
        for y in 1..height - 1 {
            if buffer.is_transparent(x, y) {
                continue;
            }
            if let Some((horizontal, vertical)) = gradient_pair(buffer, x, y) {
                f(x, y, horizontal, vertical);
            }
        }
    }
}

/// Encodes the gradient as `(h/2 + 0.5, v/2 + 0.5, 1)`: flat areas come out
/// mid blue, edges lean red or green.
pub fn surface_change<B: PixelBuffer>(buffer: &B) -> B {
    let mut output = B::new_blank(buffer.width(), buffer.height(), TRANSPARENT_WHITE);
    for_each_gradient(buffer, |x, y, horizontal, vertical| {
        output.set_color(
            x,
            y,
            Srgb::new(horizontal / 2.0 + 0.5, vertical / 2.0 + 0.5, 1.0),
        );
    });
    debug!("surface_change: {}x{}", buffer.width(), buffer.height());
    output
}

/// White wherever the gradient magnitude exceeds the threshold, black elsewhere.
pub fn edge_map<B: PixelBuffer>(buffer: &B, params: &EdgeParams) -> B {
    let mut output = B::new_blank(buffer.width(), buffer.height(), OPAQUE_BLACK);
    let mut edges = 0usize;
    for_each_gradient(buffer, |x, y, horizontal, vertical| {
        if horizontal.hypot(vertical) > params.threshold {
            output.set_color(x, y, Srgb::new(1.0, 1.0, 1.0));
            edges += 1;
        }
    });
    debug!("edge_map: threshold {}, {} edge pixels", params.threshold, edges);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::OPAQUE_WHITE;
    use image::RgbaImage;

    fn uniform(width: u32, height: u32, c: Srgb<f32>) -> RgbaImage {
        let mut image = RgbaImage::new_blank(width, height, OPAQUE_BLACK);
        for y in 0..height {
            for x in 0..width {
                image.set_color(x, y, c);
            }
        }
        image
    }

    /// 4x4, left half black, right half white.
    fn split() -> RgbaImage {
        let mut image = RgbaImage::new_blank(4, 4, OPAQUE_BLACK);
        for y in 0..4 {
            for x in 2..4 {
                image.set_packed(x, y, OPAQUE_WHITE);
            }
        }
        image
    }

    #[test]
    fn gradient_of_uniform_is_zero() {
        let image = uniform(5, 5, Srgb::new(0.3, 0.6, 0.1));
        assert_eq!(gradient_pair(&image, 2, 2), Some((0.0, 0.0)));
    }

    #[test]
    fn gradient_across_split() {
        let (horizontal, vertical) = gradient_pair(&split(), 1, 1).unwrap();
        assert!((horizontal - 3f32.sqrt()).abs() < 1e-6);
        assert_eq!(vertical, 0.0);
    }

    #[test]
    fn border_has_no_gradient() {
        let image = split();
        assert_eq!(gradient_pair(&image, 0, 1), None);
        assert_eq!(gradient_pair(&image, 1, 0), None);
        assert_eq!(gradient_pair(&image, 3, 2), None);
        assert_eq!(gradient_pair(&image, 2, 3), None);
    }

    #[test]
    fn edge_map_of_uniform_is_black() {
        let image = uniform(8, 8, Srgb::new(0.5, 0.2, 0.9));
        let edges = edge_map(&image, &EdgeParams { threshold: 0.0 });
        for (_, _, pixel) in edges.enumerate_pixels() {
            assert_eq!(pixel.0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn edge_map_marks_boundary_columns() {
        let edges = edge_map(&split(), &EdgeParams { threshold: 0.1 });
        for y in 0..4 {
            for x in 0..4 {
                let expected = if (x == 1 || x == 2) && (y == 1 || y == 2) {
                    OPAQUE_WHITE
                } else {
                    OPAQUE_BLACK
                };
                assert_eq!(edges.get_packed(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn edge_map_respects_threshold() {
        let edges = edge_map(&split(), &EdgeParams { threshold: 2.0 });
        assert!(edges.pixels().all(|pixel| pixel.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn surface_change_of_uniform_is_flat_blue() {
        let image = uniform(6, 6, Srgb::new(0.1, 0.8, 0.4));
        let surface = surface_change(&image);
        // 0.5 truncates to 127
        let flat = color::encode(Srgb::new(0.5, 0.5, 1.0));
        assert_eq!(flat, 0x7F7F_FFFF);
        for y in 0..6 {
            for x in 0..6 {
                let interior = x > 0 && y > 0 && x < 5 && y < 5;
                let expected = if interior { flat } else { TRANSPARENT_WHITE };
                assert_eq!(surface.get_packed(x, y), expected);
            }
        }
    }

    #[test]
    fn surface_change_clamps_steep_edges() {
        // sqrt(3)/2 + 0.5 > 1 saturates the red channel
        let surface = surface_change(&split());
        assert_eq!(surface.get_packed(1, 1), 0xFF7F_FFFF);
    }

    #[test]
    fn transparent_pixels_are_skipped() {
        let mut image = split();
        image.set_packed(1, 1, 0x0000_0000);
        let edges = edge_map(&image, &EdgeParams { threshold: 0.1 });
        assert_eq!(edges.get_packed(1, 1), OPAQUE_BLACK);
        assert_eq!(edges.get_packed(1, 2), OPAQUE_WHITE);
        let surface = surface_change(&image);
        assert_eq!(surface.get_packed(1, 1), TRANSPARENT_WHITE);
    }

    #[test]
    fn tiny_buffers_have_no_interior() {
        let image = uniform(2, 2, Srgb::new(1.0, 1.0, 1.0));
        let edges = edge_map(&image, &EdgeParams::default());
        assert_eq!(edges, RgbaImage::new_blank(2, 2, OPAQUE_BLACK));
    }
}
