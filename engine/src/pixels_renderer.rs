use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::SurfaceSize;

use pixels::Pixels;

/// Windowed presenter built on `pixels`.
///
/// The frame buffer keeps a fixed logical size; `pixels` scales it onto whatever the
/// window surface actually is (HiDPI, compositor quirks).
pub struct PixelsRenderer2d {
    pixels: Pixels,
    size: SurfaceSize,
}

impl PixelsRenderer2d {
    pub fn new(mut pixels: Pixels, size: SurfaceSize) -> Result<Self, pixels::Error> {
        pixels.resize_buffer(size.width, size.height)?;
        Ok(Self { pixels, size })
    }

    /// Resizes the window surface only; the logical frame is unchanged.
    pub fn resize_surface(&mut self, surface: SurfaceSize) -> Result<(), pixels::Error> {
        if surface.is_empty() {
            return Ok(());
        }
        self.pixels.resize_surface(surface.width, surface.height)?;
        Ok(())
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), self.size);
        f(&mut cpu)
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}
