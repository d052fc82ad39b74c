use crate::{surface::SurfaceSize, ui::Rect};

pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];
pub const WHITE: Color = [255, 255, 255, 255];

// A tiny 3x5 block font. Unknown glyphs render as '?'.
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel width of the widest line of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.lines()
        .map(|line| {
            let n = line.chars().count() as u32;
            if n == 0 {
                0
            } else {
                // No trailing gap after the last glyph.
                n * glyph_advance_x(scale) - scale.max(1)
            }
        })
        .max()
        .unwrap_or(0)
}

pub fn text_height(scale: u32) -> u32 {
    GLYPH_H * scale.max(1)
}

/// Parses `#RRGGBB` into an opaque color.
pub const fn rgb_hex(hex: u32) -> Color {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255]
}

/// Drawing interface used by game code.
///
/// Game code only talks to this trait, so the same drawing routines serve the window
/// (through `pixels`) and offscreen buffers in tests.
pub trait Renderer2d {
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// One pixel wide border drawn inside `rect`.
    fn rect_outline(&mut self, rect: Rect, color: Color);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Clips `rect` to the surface, returning `(x0, y0, x1, y1)` in pixels.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        if self.frame.len() < self.size.rgba_len() {
            return None;
        }
        let x1 = rect.x.saturating_add(rect.w).min(self.size.width);
        let y1 = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= x1 || rect.y >= y1 {
            return None;
        }
        Some((rect.x, rect.y, x1, y1))
    }

    fn row_span(&mut self, y: u32, x0: u32, x1: u32) -> &mut [u8] {
        let stride = self.size.width as usize * 4;
        let start = y as usize * stride + x0 as usize * 4;
        let end = y as usize * stride + x1 as usize * 4;
        &mut self.frame[start..end]
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            for px in self.row_span(y, x0, x1).chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let (w, h) = (x1 - x0, y1 - y0);

        self.fill_rect(Rect::new(x0, y0, w, 1), color);
        self.fill_rect(Rect::new(x0, y1 - 1, w, 1), color);
        self.fill_rect(Rect::new(x0, y0, 1, h), color);
        self.fill_rect(Rect::new(x1 - 1, y0, 1, h), color);
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            if ch == '\n' {
                cursor_x = x;
                cursor_y = cursor_y.saturating_add(line_advance_y(scale));
                continue;
            }
            if ch != ' ' {
                let bits = glyph(ch);
                let cells = (0..GLYPH_H).flat_map(|row| (0..GLYPH_W).map(move |col| (col, row)));
                for (col, row) in cells.filter(|&(col, row)| glyph_lit(bits, col, row)) {
                    let left = cursor_x.saturating_add(col * scale);
                    let top = cursor_y.saturating_add(row * scale);
                    self.fill_rect(Rect::new(left, top, scale, scale), color);
                }
            }
            cursor_x = cursor_x.saturating_add(glyph_advance_x(scale));
        }
    }
}

/// 3x5 glyphs, five rows of three bits packed top row first into the low 15 bits.
const FONT: &[(char, u16)] = &[
    ('0', 0x7B6F),
    ('1', 0x2C97),
    ('2', 0x73E7),
    ('3', 0x73CF),
    ('4', 0x5BC9),
    ('5', 0x79CF),
    ('6', 0x79EF),
    ('7', 0x7249),
    ('8', 0x7BEF),
    ('9', 0x7BCF),
    ('A', 0x2BED),
    ('B', 0x6BAE),
    ('C', 0x7927),
    ('D', 0x6B6E),
    ('E', 0x79E7),
    ('F', 0x79E4),
    ('G', 0x796F),
    ('H', 0x5BED),
    ('I', 0x7497),
    ('J', 0x726A),
    ('K', 0x5D35),
    ('L', 0x4927),
    ('M', 0x5FED),
    ('N', 0x5FFD),
    ('O', 0x7B6F),
    ('P', 0x7BE4),
    ('Q', 0x7B79),
    ('R', 0x7BF5),
    ('S', 0x79CF),
    ('T', 0x7492),
    ('U', 0x5B6F),
    ('V', 0x5B6A),
    ('W', 0x5BFD),
    ('X', 0x5AAD),
    ('Y', 0x5A92),
    ('Z', 0x72A7),
    ('.', 0x0002),
    (':', 0x0410),
    ('-', 0x01C0),
    ('_', 0x0007),
    ('!', 0x2482),
    ('/', 0x12A4),
    ('\'', 0x2400),
];
const MISSING_GLYPH: u16 = 0x7282;

fn glyph(ch: char) -> u16 {
    let ch = ch.to_ascii_uppercase();
    FONT.iter()
        .find(|(c, _)| *c == ch)
        .map_or(MISSING_GLYPH, |&(_, bits)| bits)
}

/// Whether the glyph lights the pixel at `col`, `row` (both from the top-left).
fn glyph_lit(bits: u16, col: u32, row: u32) -> bool {
    let shift = (GLYPH_H - 1 - row) * GLYPH_W + (GLYPH_W - 1 - col);
    bits >> shift & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_hex_splits_channels() {
        assert_eq!(rgb_hex(0xFF4D4D), [255, 77, 77, 255]);
        assert_eq!(rgb_hex(0xFFA64D), [255, 166, 77, 255]);
    }

    #[test]
    fn text_width_ignores_trailing_gap() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 1), 3);
        assert_eq!(text_width("AB", 2), 14);
        assert_eq!(text_width("AB\nABC", 1), 11);
    }

    #[test]
    fn font_lookup_is_case_insensitive_with_a_fallback() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('~'), MISSING_GLYPH);

        // '1': .#. / ##. / .#. / .#. / ###
        let one = glyph('1');
        assert!(glyph_lit(one, 1, 0));
        assert!(!glyph_lit(one, 0, 0));
        assert!(glyph_lit(one, 0, 1));
        assert!((0..3).all(|col| glyph_lit(one, col, 4)));
    }
}
