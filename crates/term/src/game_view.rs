//! GameView: maps an engine [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::engine::{Evaluation, HistoryEntry, Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

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

/// Board plus side panel: score, autoplay state, plan metrics and history chart.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = 1;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle::plain(Rgb::new(80, 80, 90), PLAY_BG);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell {
                    Cell::Filled(kind) => self.draw_board_cell(fb, start_x, start_y, x, y, *kind),
                    Cell::Empty => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        if let Some(target) = snap.target.as_ref().filter(|_| !snap.game_over) {
            let ghost = CellStyle {
                dim: true,
                ..CellStyle::plain(piece_color(target.kind), PLAY_BG)
            };
            for &(x, y) in &target.cells {
                if let Some((x, y)) = on_board(x, y) {
                    self.fill_cell_rect(fb, start_x, start_y, x, y, '░', ghost);
                }
            }
        }

        if let Some(active) = &snap.active {
            for &(x, y) in &active.cells {
                if let Some((x, y)) = on_board(x, y) {
                    self.draw_board_cell(fb, start_x, start_y, x, y, active.kind);
                }
            }
        }

        let panel_x = start_x + frame_w + 2;
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        if snap.game_over {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::plain(Rgb::new(90, 90, 100), PLAY_BG)
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(piece_color(kind), PLAY_BG)
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &Snapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }
        let panel_w = viewport.width - panel_x;

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = CellStyle { dim: true, ..value };

        let mut y = start_y;
        let x = fb.put_str(panel_x, y, "SCORE ", label);
        fb.put_u32(x, y, snap.score, value);
        y += 1;
        let x = fb.put_str(panel_x, y, "LINES ", label);
        fb.put_u32(x, y, snap.lines, value);
        y += 1;
        let x = fb.put_str(panel_x, y, "DROP  ", label);
        let x = fb.put_u32(x, y, snap.drop_interval_ms, value);
        fb.put_str(x, y, "ms", dim);
        y += 1;
        let x = fb.put_str(panel_x, y, "NEXT  ", label);
        fb.put_str(x, y, piece_letter(snap.next), CellStyle::plain(piece_color(snap.next), PANEL_BG));
        y += 2;

        let x = fb.put_str(panel_x, y, "AI    ", label);
        let (text, fg) = if snap.autoplay {
            ("ON", Rgb::new(100, 220, 120))
        } else {
            ("OFF", Rgb::new(220, 80, 80))
        };
        let x = fb.put_str(x, y, text, CellStyle { bold: true, ..CellStyle::plain(fg, PANEL_BG) });
        fb.put_str(x + 1, y, "[a]", dim);
        y += 1;

        if let Some(target) = &snap.target {
            let x = fb.put_str(panel_x, y, "PLAN  x", label);
            let x = put_i32(fb, x, y, target.x as i32, value);
            let x = fb.put_str(x, y, " r", label);
            fb.put_u32(x, y, target.rotation as u32, value);
        }
        y += 2;

        if let Some(eval) = &snap.evaluation {
            y = draw_evaluation(fb, panel_x, y, eval, label, value, dim);
            y += 1;
        }

        if !snap.history.is_empty() && y + 4 < viewport.height {
            draw_history_chart(fb, panel_x, y, panel_w, &snap.history, label);
        }
    }
}

fn draw_evaluation(
    fb: &mut FrameBuffer,
    x: u16,
    mut y: u16,
    eval: &Evaluation,
    label: CellStyle,
    value: CellStyle,
    dim: CellStyle,
) -> u16 {
    let m = &eval.metrics;
    let c = &eval.contributions;
    let rows: [(&str, u32, f64); 5] = [
        ("lines ", eval.lines_cleared, c.lines),
        ("height", m.aggregate_height, c.aggregate_height),
        ("holes ", m.holes, c.holes),
        ("bumpy ", m.bumpiness, c.bumpiness),
        ("max   ", m.max_height, c.max_height),
    ];

    let end = fb.put_str(x, y, "EVAL  ", label);
    fb.put_str(end, y, &format!("{:+.2}", eval.score), value);
    y += 1;
    for (name, raw, weighted) in rows {
        let cx = fb.put_str(x, y, name, dim);
        let cx = fb.put_u32(cx + 1, y, raw, value);
        fb.put_str(cx.max(x + 11), y, &format!("{:+.2}", weighted), value);
        y += 1;
    }
    y
}

/// Two sparklines, reward then penalty, scaled to the largest value shown.
fn draw_history_chart(
    fb: &mut FrameBuffer,
    x: u16,
    y: u16,
    width: u16,
    history: &[HistoryEntry],
    label: CellStyle,
) {
    let cols = width.saturating_sub(2) as usize;
    let shown = &history[history.len().saturating_sub(cols)..];
    let peak = shown
        .iter()
        .map(|e| e.reward.max(e.penalty))
        .max()
        .unwrap_or(0)
        .max(1);

    let reward_style = CellStyle::plain(Rgb::new(100, 220, 120), PANEL_BG);
    let penalty_style = CellStyle::plain(Rgb::new(220, 80, 80), PANEL_BG);

    fb.put_str(x, y, "REWARD / PENALTY", label);
    fb.put_char(x, y + 1, '+', reward_style);
    fb.put_char(x, y + 2, '-', penalty_style);
    for (i, entry) in shown.iter().enumerate() {
        let cx = x + 2 + i as u16;
        fb.put_char(cx, y + 1, spark(entry.reward, peak), reward_style);
        fb.put_char(cx, y + 2, spark(entry.penalty, peak), penalty_style);
    }
}

fn spark(value: u32, peak: u32) -> char {
    if value == 0 {
        return ' ';
    }
    let level = ((value as u64 * SPARK.len() as u64).div_ceil(peak as u64)) as usize;
    SPARK[level.clamp(1, SPARK.len()) - 1]
}

fn put_i32(fb: &mut FrameBuffer, x: u16, y: u16, v: i32, style: CellStyle) -> u16 {
    let x = if v < 0 {
        fb.put_char(x, y, '-', style);
        x + 1
    } else {
        x
    };
    fb.put_u32(x, y, v.unsigned_abs(), style)
}

fn on_board(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
    };
    fb.put_str(x, mid_y, text, style);
}
