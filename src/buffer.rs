use crate::color::{self, Color};
use image::{Rgba, RgbaImage};

/// The raster every filter reads and writes through.
///
/// Writes always replace a whole pixel and are opaque. `Clone` is a deep copy,
/// used whenever a filter needs an untouched snapshot of its input.
pub trait PixelBuffer: Clone {
    fn new_blank(width: u32, height: u32, fill: u32) -> Self;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn get_packed(&self, x: u32, y: u32) -> u32;
    fn set_packed(&mut self, x: u32, y: u32, packed: u32);

    fn get_color(&self, x: u32, y: u32) -> Color {
        color::decode(self.get_packed(x, y))
    }

    fn set_color(&mut self, x: u32, y: u32, c: Color) {
        self.set_packed(x, y, color::encode(c));
    }

    fn is_transparent(&self, x: u32, y: u32) -> bool {
        color::alpha(self.get_packed(x, y)) == 0
    }

    /// Translates `(x + dx, y + dy)` into a position, or `None` if it leaves the buffer.
    fn offset(&self, x: u32, y: u32, dx: i32, dy: i32) -> Option<(u32, u32)> {
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        if nx < 0 || ny < 0 || nx >= self.width() as i64 || ny >= self.height() as i64 {
            return None;
        }
        Some((nx as u32, ny as u32))
    }
}

impl PixelBuffer for RgbaImage {
    fn new_blank(width: u32, height: u32, fill: u32) -> Self {
        RgbaImage::from_pixel(width, height, Rgba(fill.to_be_bytes()))
    }

    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get_packed(&self, x: u32, y: u32) -> u32 {
        u32::from_be_bytes(self.get_pixel(x, y).0)
    }

    fn set_packed(&mut self, x: u32, y: u32, packed: u32) {
        self.put_pixel(x, y, Rgba(packed.to_be_bytes()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{OPAQUE_BLACK, TRANSPARENT_WHITE};
    use palette::Srgb;

    #[test]
    fn blank_is_filled() {
        let image = RgbaImage::new_blank(3, 2, TRANSPARENT_WHITE);
        assert_eq!(PixelBuffer::width(&image), 3);
        assert_eq!(PixelBuffer::height(&image), 2);
        for (_, _, pixel) in image.enumerate_pixels() {
            assert_eq!(pixel.0, [255, 255, 255, 0]);
        }
        assert!(image.is_transparent(2, 1));
    }

    #[test]
    fn set_color_is_opaque() {
        let mut image = RgbaImage::new_blank(2, 2, TRANSPARENT_WHITE);
        image.set_color(1, 0, Srgb::new(1.0, 0.0, 0.2));
        assert_eq!(image.get_pixel(1, 0).0, [255, 0, 51, 255]);
        assert!(!image.is_transparent(1, 0));
        assert!(image.is_transparent(0, 0));
    }

    #[test]
    fn get_color_ignores_alpha() {
        let image = RgbaImage::new_blank(1, 1, TRANSPARENT_WHITE);
        assert_eq!(image.get_color(0, 0), Srgb::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn clone_is_deep() {
        let original = RgbaImage::new_blank(2, 2, OPAQUE_BLACK);
        let mut copy = original.clone();
        copy.set_color(0, 0, Srgb::new(1.0, 1.0, 1.0));
        assert_eq!(original.get_packed(0, 0), OPAQUE_BLACK);
    }

    #[test]
    fn offset_skips_out_of_bounds() {
        let image = RgbaImage::new_blank(4, 3, OPAQUE_BLACK);
        assert_eq!(image.offset(0, 0, -1, 0), None);
        assert_eq!(image.offset(3, 2, 1, 0), None);
        assert_eq!(image.offset(3, 2, 0, 1), None);
        assert_eq!(image.offset(1, 1, 1, -1), Some((2, 0)));
    }
}
