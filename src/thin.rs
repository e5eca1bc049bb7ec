//! Hit-or-miss thinning of a black/white image.

use crate::buffer::PixelBuffer;
use crate::color::OPAQUE_BLACK;
use log::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Foreground,
    Background,
    DontCare,
}

use self::Cell::{Background as O, DontCare as X, Foreground as I};

/// 3x3 template, indexed `[dy + 1][dx + 1]`.
pub type StructuringElement = [[Cell; 3]; 3];

/// Boundary-removal templates in sweep order: north, south, east, west, then
/// the four diagonals. Order matters because each sweep sees the previous ones.
pub const ELEMENTS: [StructuringElement; 8] = [
    // N
    [[O, O, O], [X, I, X], [I, I, I]],
    // S
    [[I, I, I], [X, I, X], [O, O, O]],
    // E
    [[I, X, O], [I, I, O], [I, X, O]],
    // W
    [[O, X, I], [O, I, I], [O, X, I]],
    // NE
    [[X, O, O], [I, I, O], [X, I, X]],
    // SE
    [[X, I, X], [I, I, O], [X, O, O]],
    // SW
    [[X, I, X], [O, I, I], [O, O, X]],
    // NW
    [[O, O, X], [O, I, I], [X, I, X]],
];

fn is_foreground<B: PixelBuffer>(buffer: &B, x: u32, y: u32) -> bool {
    buffer.get_color(x, y).red > 0.5
}

fn matches<B: PixelBuffer>(buffer: &B, x: u32, y: u32, element: &StructuringElement) -> bool {
    for (row, cells) in element.iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            let foreground = match cell {
                Cell::Foreground => true,
                Cell::Background => false,
                Cell::DontCare => continue,
            };
            let nx = x + column as u32 - 1;
            let ny = y + row as u32 - 1;
            if is_foreground(buffer, nx, ny) != foreground {
                return false;
            }
        }
    }
    true
}

/// One thinning pass: every element swept once over the interior.
///
/// Works on a copy of `buffer` that is modified as it goes, so later elements
/// see pixels removed by earlier ones. Call repeatedly to skeletonize.
pub fn thin<B: PixelBuffer>(buffer: &B) -> B {
    let mut output = buffer.clone();
    let width = output.width();
    let height = output.height();
    if width < 3 || height < 3 {
        return output;
    }

    let mut removed = 0usize;
    for element in ELEMENTS.iter() {
        for x in 1..width - 1 {
            for y in 1..height - 1 {
                if matches(&output, x, y, element) {
                    output.set_packed(x, y, OPAQUE_BLACK);
                    removed += 1;
                }
            }
        }
    }

    debug!("thin: {} pixels removed", removed);
    output
}
