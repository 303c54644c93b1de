//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom: title, HUD (moves / time / pairs), the framed tile
//! grid, and a footer with the key help and the reset label. The win banner is
//! drawn over the middle of the grid.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Tile, DEFAULT_COLUMNS};

pub const TITLE: &str = "SPACE MATCHER";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Rows above the grid frame: title, HUD, spacer.
const HEADER_ROWS: u16 = 3;
/// Rows below the grid frame: reset label, key help.
const FOOTER_ROWS: u16 = 2;

const BACKDROP: Rgb = Rgb::new(18, 18, 30);
const HIDDEN_BG: Rgb = Rgb::new(75, 40, 160);
const REVEALED_BG: Rgb = Rgb::new(235, 235, 240);
const MATCHED_BG: Rgb = Rgb::new(30, 120, 60);
const ACCENT: Rgb = Rgb::new(250, 210, 60);

/// Screen rectangle of the framed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub rows: u16,
}

/// A lightweight terminal renderer for the memory game.
#[derive(Debug, Clone)]
pub struct GameView {
    columns: u16,
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 5x3 keeps tiles roughly square with typical glyph aspect ratio.
        Self {
            columns: DEFAULT_COLUMNS,
            tile_w: 5,
            tile_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(columns: u16) -> Self {
        Self {
            columns: columns.max(1),
            ..Self::default()
        }
    }

    pub fn with_tile_size(mut self, tile_w: u16, tile_h: u16) -> Self {
        self.tile_w = tile_w.max(3);
        self.tile_h = tile_h.max(1);
        self
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Where the grid frame lands for a board of `tiles` tiles.
    pub fn layout(&self, tiles: usize, viewport: Viewport) -> GridLayout {
        let cols = self.columns;
        let rows = u16::try_from(tiles.div_ceil(cols as usize).max(1)).unwrap_or(u16::MAX);
        // One column / row of gap around every tile, plus the border.
        // Oversized boards saturate and get clipped by the framebuffer.
        let frame_w = cols.saturating_mul(self.tile_w.saturating_add(1)).saturating_add(3);
        let frame_h = rows.saturating_mul(self.tile_h.saturating_add(1)).saturating_add(3);
        let total_h = frame_h.saturating_add(HEADER_ROWS + FOOTER_ROWS);

        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let top = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };

        GridLayout {
            frame_x,
            frame_y: top.saturating_add(HEADER_ROWS),
            frame_w,
            frame_h,
            rows,
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// `cursor` is the highlighted board position, if any. Callers can reuse
    /// a framebuffer across frames.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<usize>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap.tiles.len(), viewport);
        // Center text on the visible part of the frame.
        let visible_w = layout.frame_w.min(viewport.width.saturating_sub(layout.frame_x));
        let center_x = layout.frame_x.saturating_add(visible_w / 2);

        self.draw_header(fb, snap, &layout, center_x);

        let backdrop = CellStyle::new(Rgb::new(90, 90, 110), BACKDROP);
        let border = CellStyle::new(Rgb::new(120, 110, 230), Rgb::new(0, 0, 0));
        fb.fill_rect(
            layout.frame_x.saturating_add(1),
            layout.frame_y.saturating_add(1),
            layout.frame_w.saturating_sub(2),
            layout.frame_h.saturating_sub(2),
            ' ',
            backdrop,
        );
        self.draw_border(fb, layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h, border);

        for (pos, tile) in snap.tiles.iter().enumerate() {
            self.draw_tile(fb, &layout, pos, tile, cursor == Some(pos));
        }

        self.draw_footer(fb, snap, &layout, center_x);

        if snap.is_won {
            self.draw_win_banner(fb, snap, &layout, center_x);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, cursor: Option<usize>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    /// Top-left corner of the tile at board position `pos`.
    pub fn tile_origin(&self, layout: &GridLayout, pos: usize) -> (u16, u16) {
        let cols = self.columns as usize;
        let col = (pos % cols) as u16;
        let row = u16::try_from(pos / cols).unwrap_or(u16::MAX);
        let x = layout
            .frame_x
            .saturating_add(2)
            .saturating_add(col.saturating_mul(self.tile_w.saturating_add(1)));
        let y = layout
            .frame_y
            .saturating_add(2)
            .saturating_add(row.saturating_mul(self.tile_h.saturating_add(1)));
        (x, y)
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &GridLayout, center_x: u16) {
        let top = layout.frame_y.saturating_sub(HEADER_ROWS);
        let title = CellStyle::new(Rgb::new(240, 120, 200), Rgb::new(0, 0, 0)).bold();
        fb.put_str_centered(center_x, top, TITLE, title);

        let label = CellStyle::new(ACCENT, Rgb::new(0, 0, 0));
        let value = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

        // "MOVES 12  TIME 01:05  PAIRS 3/8"
        let time_w = digits(snap.elapsed_seconds / 60).max(2) + 3;
        let width = 6 + digits(snap.move_count) + 2 + 5 + time_w + 2 + 6
            + digits(snap.matches_found)
            + 1
            + digits(snap.total_pairs);
        let y = top + 1;
        let mut x = center_x.saturating_sub(width / 2);
        x = fb.put_str(x, y, "MOVES ", label);
        x = fb.put_u32(x, y, snap.move_count, value);
        x = fb.put_str(x, y, "  TIME ", label);
        x = put_time(fb, x, y, snap.elapsed_seconds, value);
        x = fb.put_str(x, y, "  PAIRS ", label);
        x = fb.put_u32(x, y, snap.matches_found, value);
        x = fb.put_str(x, y, "/", label);
        fb.put_u32(x, y, snap.total_pairs, value);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, layout: &GridLayout, pos: usize, tile: &Tile, selected: bool) {
        let (x, y) = self.tile_origin(layout, pos);

        let (style, face) = if tile.is_matched {
            (CellStyle::new(Rgb::new(255, 255, 255), MATCHED_BG).bold(), tile.symbol.as_char())
        } else if tile.is_flipped {
            (CellStyle::new(Rgb::new(20, 20, 30), REVEALED_BG).bold(), tile.symbol.as_char())
        } else {
            (CellStyle::new(ACCENT, HIDDEN_BG), '?')
        };

        fb.fill_rect(x, y, self.tile_w, self.tile_h, ' ', style);
        let mid = y.saturating_add(self.tile_h / 2);
        fb.put_char(x.saturating_add(self.tile_w / 2), mid, face, style);

        if selected {
            let marker = CellStyle::new(ACCENT, BACKDROP).bold();
            fb.put_char(x.saturating_sub(1), mid, '▶', marker);
            fb.put_char(x.saturating_add(self.tile_w), mid, '◀', marker);
        }
    }

    fn draw_footer(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &GridLayout, center_x: u16) {
        let y = layout.frame_y.saturating_add(layout.frame_h);
        let mut reset = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(70, 60, 200)).bold();
        if !snap.can_reset {
            reset = CellStyle::new(Rgb::new(160, 160, 160), Rgb::new(70, 70, 70)).dim();
        }
        fb.put_str_centered(center_x, y, reset_label(snap), reset);

        let help = CellStyle::new(Rgb::new(150, 150, 160), Rgb::new(0, 0, 0)).dim();
        fb.put_str_centered(center_x, y.saturating_add(1), "ARROWS MOVE  ENTER FLIP  Q QUIT", help);
    }

    fn draw_win_banner(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &GridLayout, center_x: u16) {
        let text = win_message(snap.move_count, snap.elapsed_seconds);
        let style = CellStyle::new(Rgb::new(255, 255, 255), MATCHED_BG).bold();
        let w = text.chars().count() as u16 + 2;
        let x = center_x.saturating_sub(w / 2);
        let mid = layout.frame_y.saturating_add(layout.frame_h / 2);
        fb.fill_rect(x, mid.saturating_sub(1), w, 3, ' ', style);
        fb.put_str(x + 1, mid, &text, style);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        fb.put_char(x, y, '╭', style);
        fb.put_char(right, y, '╮', style);
        fb.put_char(x, bottom, '╰', style);
        fb.put_char(right, bottom, '╯', style);

        // Edges past the buffer are clipped anyway; stop at its bounds.
        for cx in x.saturating_add(1)..right.min(fb.width()) {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, bottom, '─', style);
        }
        for cy in y.saturating_add(1)..bottom.min(fb.height()) {
            fb.put_char(x, cy, '│', style);
            fb.put_char(right, cy, '│', style);
        }
    }
}

/// Format seconds as `mm:ss`. Minutes keep growing past 99.
pub fn format_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn win_message(moves: u32, elapsed_seconds: u32) -> String {
    format!("YOU WON IN {} MOVES AND {}!", moves, format_time(elapsed_seconds))
}

pub fn reset_label(snap: &GameSnapshot) -> &'static str {
    if snap.is_won {
        "[R] PLAY AGAIN"
    } else {
        "[R] NEW GAME"
    }
}

/// `format_time` without the allocation, for the per-frame HUD.
fn put_time(fb: &mut FrameBuffer, x: u16, y: u16, total_seconds: u32, style: CellStyle) -> u16 {
    let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);
    let mut x = x;
    if minutes < 10 {
        x = fb.put_str(x, y, "0", style);
    }
    x = fb.put_u32(x, y, minutes, style);
    x = fb.put_str(x, y, ":", style);
    if seconds < 10 {
        x = fb.put_str(x, y, "0", style);
    }
    fb.put_u32(x, y, seconds, style)
}

fn digits(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
