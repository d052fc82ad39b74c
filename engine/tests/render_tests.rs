use engine::graphics::{BLACK, CpuRenderer, Renderer2d, WHITE, text_width};
use engine::surface::{RgbaBufferSurface, SurfaceSize};
use engine::ui::Rect;

const RED: [u8; 4] = [255, 0, 0, 255];

#[test]
fn fill_rect_clips_to_surface() {
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(8, 8));
    surface.renderer().fill_rect(Rect::new(6, 6, 10, 10), RED);

    assert_eq!(surface.pixel(6, 6), Some(RED));
    assert_eq!(surface.pixel(7, 7), Some(RED));
    assert_eq!(surface.pixel(5, 5), Some([0, 0, 0, 0]));
}

#[test]
fn clear_paints_every_pixel() {
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(3, 2));
    surface.renderer().clear(WHITE);
    assert!(surface.frame().chunks_exact(4).all(|px| px == WHITE));
}

#[test]
fn rect_outline_leaves_interior_untouched() {
    let mut surface = RgbaBufferSurface::new(SurfaceSize::new(20, 20));
    {
        let mut gfx = surface.renderer();
        gfx.clear(WHITE);
        gfx.rect_outline(Rect::new(0, 0, 20, 20), BLACK);
    }

    for (x, y) in [(0, 0), (19, 0), (0, 19), (19, 19), (10, 0), (0, 10)] {
        assert_eq!(surface.pixel(x, y), Some(BLACK), "edge pixel ({x}, {y})");
    }
    assert_eq!(surface.pixel(1, 1), Some(WHITE));
    assert_eq!(surface.pixel(10, 10), Some(WHITE));
}

#[test]
fn draw_text_stays_inside_measured_width() {
    let size = SurfaceSize::new(64, 16);
    let mut frame = vec![0u8; size.rgba_len()];
    let mut gfx = CpuRenderer::new(&mut frame, size);
    gfx.draw_text_scaled(0, 0, "GAME", WHITE, 2);

    let width = text_width("GAME", 2);
    let mut lit_columns = Vec::new();
    for x in 0..size.width {
        let lit = (0..size.height).any(|y| {
            let idx = ((y * size.width + x) * 4) as usize;
            frame[idx..idx + 4] == WHITE
        });
        if lit {
            lit_columns.push(x);
        }
    }
    assert_eq!(lit_columns.first(), Some(&0));
    assert_eq!(lit_columns.last(), Some(&(width - 1)));
}

#[test]
fn short_frame_buffers_are_ignored() {
    let mut frame = vec![0u8; 4];
    let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(4, 4));
    gfx.fill_rect(Rect::new(0, 0, 4, 4), RED);
    assert_eq!(frame, vec![0u8; 4]);
}
