//! Placeholder bitmaps for scenes that could not be illustrated.
//!
//! Text is drawn with a built-in 5x7 bitmap font so no font files are
//! needed at runtime. Lowercase letters are drawn as capitals and
//! characters outside the font are drawn as `?`.

use fabulist_error::{ImageError, ImageErrorKind};
use image::{Rgb, RgbImage};
use tracing::{debug, instrument};

/// Placeholder background (light blue).
pub const BACKGROUND: Rgb<u8> = Rgb([173, 216, 230]);

/// Shadow drawn behind the text.
pub const SHADOW: Rgb<u8> = Rgb([128, 128, 128]);

/// Text color.
pub const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Heading on every placeholder.
pub const PLACEHOLDER_HEADING: &str = "IMAGE PLACEHOLDER";

/// Characters of the description shown on the placeholder.
const DESCRIPTION_CHARS: usize = 60;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const SCALE: u32 = 2;
const CELL_WIDTH: u32 = (GLYPH_WIDTH + 1) * SCALE;
const LINE_HEIGHT: u32 = (GLYPH_HEIGHT + 2) * SCALE;
const MARGIN: u32 = 16;
const SHADOW_OFFSET: u32 = 2;

/// Render a placeholder for `text`.
///
/// The bitmap shows the heading, a blank line and the first 60 characters
/// of `text` followed by `...`, centered, in black over a gray shadow.
///
/// # Errors
///
/// Returns `ImageErrorKind::InvalidDimensions` if either dimension is zero.
///
/// # Examples
///
/// ```
/// use fabulist_story::{render_placeholder, BACKGROUND};
///
/// let img = render_placeholder("A castle in the clouds", 512, 512).unwrap();
/// assert_eq!(img.dimensions(), (512, 512));
/// assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
/// ```
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn render_placeholder(text: &str, width: u32, height: u32) -> Result<RgbImage, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::new(ImageErrorKind::InvalidDimensions(width, height)));
    }

    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    let excerpt: String = text.chars().take(DESCRIPTION_CHARS).collect();
    let max_cols = (width.saturating_sub(2 * MARGIN) / CELL_WIDTH).max(1) as usize;

    let mut lines = wrap(PLACEHOLDER_HEADING, max_cols);
    lines.push(String::new());
    lines.extend(wrap(&format!("{}...", excerpt), max_cols));

    let block_height = lines.len() as u32 * LINE_HEIGHT;
    let top = height.saturating_sub(block_height) / 2;

    for (row, line) in lines.iter().enumerate() {
        let line_width = line.chars().count() as u32 * CELL_WIDTH;
        let x = width.saturating_sub(line_width) / 2;
        let y = top + row as u32 * LINE_HEIGHT;
        draw_line(&mut img, line, x + SHADOW_OFFSET, y + SHADOW_OFFSET, SHADOW);
        draw_line(&mut img, line, x, y, INK);
    }

    debug!(lines = lines.len(), "Rendered placeholder image");
    Ok(img)
}

/// Greedy word wrap; words longer than a line are split.
fn wrap(text: &str, max_cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_cols {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_cols).collect());
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current.chars().count() + 1 + word.len()
        };
        if needed > max_cols {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn draw_line(img: &mut RgbImage, line: &str, x: u32, y: u32, color: Rgb<u8>) {
    for (col, ch) in line.chars().enumerate() {
        draw_glyph(img, glyph(ch), x + col as u32 * CELL_WIDTH, y, color);
    }
}

fn draw_glyph(img: &mut RgbImage, rows: [u8; 7], x: u32, y: u32, color: Rgb<u8>) {
    for (gy, bits) in rows.iter().enumerate() {
        for gx in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - gx)) == 0 {
                continue;
            }
            for dy in 0..SCALE {
                for dx in 0..SCALE {
                    let px = x + gx * SCALE + dx;
                    let py = y + gy as u32 * SCALE + dy;
                    if px < img.width() && py < img.height() {
                        img.put_pixel(px, py, color);
                    }
                }
            }
        }
    }
}

/// 5x7 glyph rows, top to bottom; bit 4 is the leftmost column.
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '\'' => [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '"' => [0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        ';' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    }
}
