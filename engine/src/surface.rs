use crate::graphics::{Color, CpuRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    /// Number of whole `block`-sized cells that fit along each axis.
    pub const fn grid_cells(self, block: u32) -> (u32, u32) {
        if block == 0 {
            return (0, 0);
        }
        (self.width / block, self.height / block)
    }
}

/// A simple in-memory RGBA surface for headless rendering and tests.
#[derive(Debug, Clone)]
pub struct RgbaBufferSurface {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl RgbaBufferSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Borrows the buffer as a CPU renderer target.
    pub fn renderer(&mut self) -> CpuRenderer<'_> {
        CpuRenderer::new(&mut self.buf, self.size)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = self.buf.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
