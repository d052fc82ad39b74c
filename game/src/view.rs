//! Draws a [`GameSession`]: the well on the left, score and rankings on the right, and
//! the game-over banner with the name prompt on top of the well.

use engine::graphics::{BLACK, Color, Renderer2d, WHITE, text_height, text_width};
use engine::surface::SurfaceSize;
use engine::ui::Rect;

use crate::board::{Board, Cell};
use crate::controller::{BLOCK_SIZE, BOARD_SURFACE};
use crate::piece::ActivePiece;
use crate::session::{GameSession, SessionPhase};

pub const PANEL_WIDTH: u32 = 200;
/// Full window frame: the board surface plus the side panel.
pub const FRAME_SIZE: SurfaceSize =
    SurfaceSize::new(BOARD_SURFACE.width + PANEL_WIDTH, BOARD_SURFACE.height);

pub const EMPTY_COLOR: Color = WHITE;
pub const BLOCK_BORDER: Color = BLACK;
const PANEL_BG: Color = [24, 24, 32, 255];
const LABEL_COLOR: Color = [150, 150, 170, 255];
const TEXT_SCALE: u32 = 2;
const TITLE_SCALE: u32 = 3;
const LINE_GAP: u32 = 4;

pub fn board_rect() -> Rect {
    Rect::from_size(BOARD_SURFACE.width, BOARD_SURFACE.height)
}

pub fn panel_rect() -> Rect {
    Rect::new(BOARD_SURFACE.width, 0, PANEL_WIDTH, FRAME_SIZE.height)
}

/// The black band across the middle third of the well.
pub fn banner_rect() -> Rect {
    let area = board_rect();
    Rect::new(area.x, area.h / 3, area.w, area.h / 3)
}

pub fn draw_session(gfx: &mut dyn Renderer2d, session: &GameSession) {
    let state = session.controller().state();
    let area = board_rect();

    gfx.clear(BLACK);
    draw_board(gfx, area, &state.board);
    if !state.is_over() {
        draw_piece(gfx, area, &state.piece);
    }
    draw_panel(gfx, session);

    match session.phase() {
        SessionPhase::Playing => {}
        SessionPhase::NamePrompt(prompt) => {
            let banner = draw_game_over_banner(gfx);
            let entry = format!("NAME: {}_", prompt.text());
            draw_banner_lines(gfx, banner, &[entry.as_str(), "ENTER / ESC"]);
        }
        SessionPhase::Finished => {
            let banner = draw_game_over_banner(gfx);
            draw_banner_lines(gfx, banner, &["ENTER: NEW GAME"]);
        }
    }
}

fn draw_block(gfx: &mut dyn Renderer2d, area: Rect, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let rect = Rect::new(
        area.x + x as u32 * BLOCK_SIZE,
        area.y + y as u32 * BLOCK_SIZE,
        BLOCK_SIZE,
        BLOCK_SIZE,
    );
    if rect.right() > area.right() || rect.bottom() > area.bottom() {
        return;
    }
    gfx.fill_rect(rect, color);
    gfx.rect_outline(rect, BLOCK_BORDER);
}

pub fn draw_board(gfx: &mut dyn Renderer2d, area: Rect, board: &Board) {
    for (y, row) in board.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let color = match cell {
                Cell::Empty => EMPTY_COLOR,
                Cell::Filled(color) => *color,
            };
            draw_block(gfx, area, x as i32, y as i32, color);
        }
    }
}

pub fn draw_piece(gfx: &mut dyn Renderer2d, area: Rect, piece: &ActivePiece) {
    for cell in piece.board_cells() {
        draw_block(gfx, area, cell.x, cell.y, piece.color);
    }
}

fn draw_panel(gfx: &mut dyn Renderer2d, session: &GameSession) {
    let panel = panel_rect();
    gfx.fill_rect(panel, PANEL_BG);

    let score = &session.controller().state().score;
    let mut column = TextColumn::new(panel.inset(8));
    column.line(gfx, "SCORE", LABEL_COLOR);
    column.line(gfx, &score.score.to_string(), WHITE);
    column.line(gfx, "LINES", LABEL_COLOR);
    column.line(gfx, &score.lines_total.to_string(), WHITE);
    column.line(gfx, "", WHITE);
    column.line(gfx, "RANKINGS", LABEL_COLOR);
    for record in session.rankings().records() {
        column.line(gfx, &format!("{}: {}", record.name, record.score), WHITE);
    }
}

/// Left-aligned text lines stacked top-down; lines past the bottom are dropped.
struct TextColumn {
    area: Rect,
    y: u32,
}

impl TextColumn {
    fn new(area: Rect) -> Self {
        Self { area, y: area.y }
    }

    fn line(&mut self, gfx: &mut dyn Renderer2d, text: &str, color: Color) {
        let line_h = text_height(TEXT_SCALE) + LINE_GAP;
        if self.y + line_h <= self.area.bottom() {
            gfx.draw_text_scaled(self.area.x, self.y, text, color, TEXT_SCALE);
        }
        self.y += line_h;
    }
}

/// Paints the banner and its title, returning the banner rect.
pub fn draw_game_over_banner(gfx: &mut dyn Renderer2d) -> Rect {
    let banner = banner_rect();
    gfx.fill_rect(banner, BLACK);

    let title = "GAME OVER";
    let at = banner.centered(text_width(title, TITLE_SCALE), text_height(TITLE_SCALE));
    gfx.draw_text_scaled(at.x, at.y, title, WHITE, TITLE_SCALE);
    banner
}

fn draw_banner_lines(gfx: &mut dyn Renderer2d, banner: Rect, lines: &[&str]) {
    let title_bottom = banner.y + (banner.h + text_height(TITLE_SCALE)) / 2;
    let mut y = title_bottom + 2 * LINE_GAP;
    for text in lines {
        let line_h = text_height(TEXT_SCALE);
        let row = Rect::new(banner.x, y, banner.w, line_h);
        let at = row.top_centered(text_width(text, TEXT_SCALE), line_h);
        gfx.draw_text_scaled(at.x, at.y, text, WHITE, TEXT_SCALE);
        y += line_h + LINE_GAP;
    }
}
