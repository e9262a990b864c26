//! Stand-in art for entities whose sprite could not be loaded.

use crate::SpriteImage;

const FILL: [u8; 4] = [96, 96, 96, 160];
const BORDER: [u8; 4] = [255, 0, 255, 255];
const TEXT: [u8; 4] = [255, 255, 255, 255];
const BORDER_WIDTH: u32 = 2;

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;

/// Renders a bordered box with `label` stamped in the middle.
///
/// Labels that do not fit are truncated from the right; characters without
/// a glyph are drawn as blanks.
pub fn render_placeholder(width: u32, height: u32, label: &str) -> SpriteImage {
    let mut image = SpriteImage::blank(width, height);
    for y in 0..height {
        for x in 0..width {
            let on_border = x < BORDER_WIDTH
                || y < BORDER_WIDTH
                || x + BORDER_WIDTH >= width
                || y + BORDER_WIDTH >= height;
            let color = if on_border { BORDER } else { FILL };
            image.put_pixel_clipped(x as i64, y as i64, color);
        }
    }

    let inner_width = width.saturating_sub(BORDER_WIDTH * 4);
    let advance = GLYPH_WIDTH + 1;
    let max_chars = (inner_width / advance) as usize;
    let text: Vec<char> = label.chars().take(max_chars).collect();
    if text.is_empty() {
        return image;
    }

    let text_width = text.len() as u32 * advance - 1;
    let scale = (inner_width / text_width)
        .min(height.saturating_sub(BORDER_WIDTH * 4) / GLYPH_HEIGHT)
        .clamp(1, 4);
    let origin_x = (width.saturating_sub(text_width * scale) / 2) as i64;
    let origin_y = (height.saturating_sub(GLYPH_HEIGHT * scale) / 2) as i64;

    for (index, ch) in text.iter().enumerate() {
        let Some(rows) = glyph(*ch) else {
            continue;
        };
        let glyph_x = origin_x + (index as u32 * advance * scale) as i64;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        image.put_pixel_clipped(
                            glyph_x + (col * scale + dx) as i64,
                            origin_y + (row as u32 * scale + dy) as i64,
                            TEXT,
                        );
                    }
                }
            }
        }
    }
    image
}

/// 3x5 bitmap font, one 3-bit row per entry (MSB is the left column).
fn glyph(ch: char) -> Option<[u8; 5]> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        _ => return None,
    };
    Some(rows)
}
