//! Frame buffer
//!
//! 1 bit per pixel, organized as 8 pages of 128 columns to match the
//! LCD controller's memory, so `flush` is a straight copy. All drawing
//! clips to the buffer; out-of-bounds coordinates are ignored.

use crate::font::Font;

/// Display width in pixels
pub const WIDTH: usize = 128;

/// Display height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Text rendering styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextStyle {
    #[default]
    Normal,
    /// Light-on-dark, covering the full character cell
    Inverted,
    /// Each font pixel drawn 2x2 (big digits on the main screen)
    DoubleSize,
}

/// Page-organized monochrome frame buffer
pub struct FrameBuffer {
    pages: [u8; WIDTH * PAGES],
    dirty: bool,
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pages: [0; WIDTH * PAGES],
            dirty: true,
        }
    }

    /// Raw page data for [`crate::DisplayBackend::flush`]
    pub fn pages(&self) -> &[u8] {
        &self.pages
    }

    /// Check and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Clear the entire buffer
    pub fn clear(&mut self) {
        self.pages = [0; WIDTH * PAGES];
        self.dirty = true;
    }

    /// Set or clear one pixel
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let index = (y / 8) * WIDTH + x;
        let mask = 1u8 << (y % 8);
        if on {
            self.pages[index] |= mask;
        } else {
            self.pages[index] &= !mask;
        }
        self.dirty = true;
    }

    /// Read one pixel (out of bounds reads as off)
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pages[(y / 8) * WIDTH + x] & (1 << (y % 8)) != 0
    }

    /// Horizontal line
    pub fn hline(&mut self, x: usize, y: usize, len: usize) {
        for dx in 0..len {
            self.set_pixel(x + dx, y, true);
        }
    }

    /// Vertical line
    pub fn vline(&mut self, x: usize, y: usize, len: usize) {
        for dy in 0..len {
            self.set_pixel(x, y + dy, true);
        }
    }

    /// Filled rectangle
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        for dy in 0..h {
            self.hline(x, y + dy, w);
        }
    }

    /// Rectangle outline
    pub fn rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        if w == 0 || h == 0 {
            return;
        }
        self.hline(x, y, w);
        self.hline(x, y + h - 1, w);
        self.vline(x, y, h);
        self.vline(x + w - 1, y, h);
    }

    /// Invert a region (selection highlight)
    pub fn invert_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        for dy in 0..h {
            for dx in 0..w {
                let lit = self.pixel(x + dx, y + dy);
                self.set_pixel(x + dx, y + dy, !lit);
            }
        }
    }

    /// Draw text with the given font and style
    ///
    /// Returns the x coordinate after the last glyph.
    pub fn draw_text(&mut self, x: usize, y: usize, font: &Font, text: &str, style: TextStyle) -> usize {
        let mut cursor = x;
        for c in text.chars() {
            cursor = self.draw_char(cursor, y, font, c, style);
        }
        cursor
    }

    fn draw_char(&mut self, x: usize, y: usize, font: &Font, c: char, style: TextStyle) -> usize {
        let glyph = font.glyph(c);
        let scale = if style == TextStyle::DoubleSize { 2 } else { 1 };

        for (col, &bits) in glyph.iter().enumerate() {
            for row in 0..font.height as usize {
                let lit = bits & (1 << row) != 0;
                let lit = match style {
                    TextStyle::Inverted => !lit,
                    _ => lit,
                };
                for sx in 0..scale {
                    for sy in 0..scale {
                        self.set_pixel(
                            x + col * scale + sx,
                            y + row * scale + sy,
                            lit,
                        );
                    }
                }
            }
        }

        // Inter-glyph column: background colored for inverted text
        if style == TextStyle::Inverted {
            for row in 0..font.height as usize {
                self.set_pixel(x + font.width as usize, y + row, true);
            }
        }

        x + font.advance() as usize * scale
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FONT_5X7;

    #[test]
    fn test_pixel_round_trip() {
        let mut fb = FrameBuffer::new();
        fb.take_dirty();

        fb.set_pixel(10, 20, true);
        assert!(fb.pixel(10, 20));
        assert!(fb.take_dirty());

        fb.set_pixel(10, 20, false);
        assert!(!fb.pixel(10, 20));
    }

    #[test]
    fn test_page_layout() {
        let mut fb = FrameBuffer::new();
        // y=20 lands in page 2, bit 4
        fb.set_pixel(5, 20, true);
        assert_eq!(fb.pages()[2 * WIDTH + 5], 1 << 4);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(WIDTH, 0, true);
        fb.set_pixel(0, HEIGHT, true);
        assert!(fb.pages().iter().all(|&b| b == 0));
        assert!(!fb.pixel(WIDTH, 0));
    }

    #[test]
    fn test_hline_clips() {
        let mut fb = FrameBuffer::new();
        fb.hline(WIDTH - 4, 0, 100);
        let lit = (0..WIDTH).filter(|&x| fb.pixel(x, 0)).count();
        assert_eq!(lit, 4);
    }

    #[test]
    fn test_text_renders_pixels() {
        let mut fb = FrameBuffer::new();
        let end = fb.draw_text(0, 0, &FONT_5X7, "A", TextStyle::Normal);
        assert_eq!(end, 6);
        assert!(fb.pages().iter().any(|&b| b != 0));
    }

    #[test]
    fn test_space_renders_blank() {
        let mut fb = FrameBuffer::new();
        fb.draw_text(0, 0, &FONT_5X7, " ", TextStyle::Normal);
        assert!(fb.pages().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_inverted_text_fills_cell() {
        let mut fb = FrameBuffer::new();
        fb.draw_text(0, 0, &FONT_5X7, " ", TextStyle::Inverted);
        // An inverted space is a solid 6x7 block
        for x in 0..6 {
            for y in 0..7 {
                assert!(fb.pixel(x, y), "pixel ({x},{y}) should be lit");
            }
        }
    }

    #[test]
    fn test_double_size_advance_and_scale() {
        let mut fb = FrameBuffer::new();
        let end = fb.draw_text(0, 0, &FONT_5X7, "8", TextStyle::DoubleSize);
        assert_eq!(end, 12);

        let mut single = FrameBuffer::new();
        single.draw_text(0, 0, &FONT_5X7, "8", TextStyle::Normal);

        // Every lit single-size pixel maps to a 2x2 block
        for x in 0..5 {
            for y in 0..7 {
                let lit = single.pixel(x, y);
                assert_eq!(fb.pixel(2 * x, 2 * y), lit);
                assert_eq!(fb.pixel(2 * x + 1, 2 * y + 1), lit);
            }
        }
    }

    #[test]
    fn test_invert_rect_twice_is_identity() {
        let mut fb = FrameBuffer::new();
        fb.draw_text(2, 2, &FONT_5X7, "Kestrel", TextStyle::Normal);
        let before: heapless::Vec<u8, { WIDTH * PAGES }> =
            fb.pages().iter().copied().collect();

        fb.invert_rect(0, 0, 64, 16);
        fb.invert_rect(0, 0, 64, 16);
        assert_eq!(fb.pages(), before.as_slice());
    }
}
