//! Pixel-space rectangles for laying out HUD text and panels.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self::new(0, 0, w, h)
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Half-open: the right and bottom edges are outside.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        (self.x..self.right()).contains(&px) && (self.y..self.bottom()).contains(&py)
    }

    /// Shrinks every side by `margin`, collapsing to zero size rather than inverting.
    pub fn inset(&self, margin: u32) -> Self {
        let w = self.w.saturating_sub(margin.saturating_mul(2));
        let h = self.h.saturating_sub(margin.saturating_mul(2));
        Self::new(
            self.x.saturating_add(margin.min(self.w / 2)),
            self.y.saturating_add(margin.min(self.h / 2)),
            w,
            h,
        )
    }

    /// A `w` x `h` child centered on both axes, clamped to this rect.
    pub fn centered(&self, w: u32, h: u32) -> Self {
        let child = self.top_centered(w, h);
        Self {
            y: self.y + (self.h - child.h) / 2,
            ..child
        }
    }

    /// A `w` x `h` child centered horizontally along the top edge, clamped to this rect.
    pub fn top_centered(&self, w: u32, h: u32) -> Self {
        let (w, h) = (w.min(self.w), h.min(self.h));
        Self::new(self.x + (self.w - w) / 2, self.y, w, h)
    }
}
