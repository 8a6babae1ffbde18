//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ [HUD chip]                                               │
//! │        ┌────────────────────────────────────┐            │
//! │        │  inset grid — voxel cells render   │            │
//! │ inset  │  here, shifted by the live drag    │   inset    │
//! │ margin │  offset; pointer glow + hand       │   margin   │
//! │        │  skeleton overlay on top           │            │
//! │        └────────────────────────────────────┘            │
//! │  status bar                                              │
//! │  key legend                                              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The window doubles as the simulation input device: each poll sends the
//! mouse position and the held hand-shape key to the sim frame source.

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};
use std::sync::mpsc::Sender;

use hand_skeleton::{HandFrame, HAND_BONES};
use voxel_grid::GridDims;

use crate::controller::FrameController;
use crate::gesture::{SimInput, SimShape};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 1180;
pub const WIN_H: usize = 700;
const STATUS_Y: i32 = WIN_H as i32 - 44;
const BG_COLOR: u32 = 0xFF0B0F1A;
const GRID_LINE: u32 = 0xFF103842; // dim cyan on the dark backdrop
const VOXEL_COLOR: u32 = 0xFF00E5FF;
const VOXEL_EDGE: u32 = 0xFF00889E;
const POINTER_COLOR: u32 = 0xFF66F2FF;
const SKELETON_COLOR: u32 = 0xFF00C8E0;
const TEXT_BG: u32 = 0xFF101C33;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    sim_tx: Sender<SimInput>,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Gesture Paint — voxel grid",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll the window and forward one simulated detector pose.
    /// Returns false when the app should quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() || self.window.is_key_down(Key::Q) {
            let _ = self.sim_tx.send(SimInput::Quit);
            return false;
        }

        let (mx, my) = self
            .window
            .get_mouse_pos(MouseMode::Clamp)
            .unwrap_or((WIN_W as f32 / 2.0, WIN_H as f32 / 2.0));
        let x = mx / WIN_W as f32;
        let y = my / WIN_H as f32;

        let down = |k: Key| self.window.is_key_down(k);
        let shape = if down(Key::H) {
            SimShape::Hidden
        } else if down(Key::E) {
            SimShape::EraseCombo
        } else if down(Key::F) {
            SimShape::Fist
        } else if down(Key::C) {
            SimShape::Ok
        } else if down(Key::D) {
            SimShape::Point
        } else if down(Key::Space) || self.window.get_mouse_down(MouseButton::Left) {
            SimShape::Pinch
        } else {
            SimShape::Open
        };

        // In hardware mode nobody listens on the sim channel; a dead
        // receiver is not a quit signal.
        let _ = self.sim_tx.send(SimInput::Pose { x, y, shape });
        true
    }

    /// Render one frame from the controller snapshot.
    pub fn render(&mut self, ctl: &FrameController, hands: &[HandFrame], hud: &str, status: &str) {
        self.buf.fill(BG_COLOR);

        let grid = ctl.grid();
        self.draw_grid_lines(grid);
        self.draw_voxels(ctl, grid);
        self.draw_hands(hands);
        self.draw_pointer(ctl);

        // ── HUD chip ──────────────────────────────────────────────────────
        let chip_w = 16 + hud.len() as i32 * 8;
        self.fill_rect(14, 14, chip_w, 24, TEXT_BG);
        self.draw_text(hud, 22, 20, 2, 0xFFEEEEEE);

        // ── Status bar + key legend ───────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W as i32, 24, TEXT_BG);
        self.draw_text(status, 10, STATUS_Y + 7, 2, 0xFFDDDDDD);
        self.draw_text(
            "MOUSE=HAND  SPACE/LMB=PINCH  F=FIST  D=POINT  E=ERASE  C=CLEAR  H=HIDE  Q=QUIT",
            10,
            WIN_H as i32 - 14,
            1,
            0xFF7A8699,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── grid region geometry ──────────────────────────────────────────────

    fn grid_px(grid: GridDims) -> (f32, f32, f32, f32) {
        let x0 = grid.inset_x * WIN_W as f32;
        let y0 = grid.inset_y * WIN_H as f32;
        let w = WIN_W as f32 - 2.0 * x0;
        let h = WIN_H as f32 - 2.0 * y0;
        (x0, y0, w, h)
    }

    fn draw_grid_lines(&mut self, grid: GridDims) {
        let (x0, y0, w, h) = Self::grid_px(grid);
        for i in 0..=grid.width {
            let x = (x0 + i as f32 / grid.width as f32 * w) as i32;
            self.fill_rect(x, y0 as i32, 1, h as i32, GRID_LINE);
        }
        for j in 0..=grid.height {
            let y = (y0 + j as f32 / grid.height as f32 * h) as i32;
            self.fill_rect(x0 as i32, y, w as i32, 1, GRID_LINE);
        }
    }

    fn draw_voxels(&mut self, ctl: &FrameController, grid: GridDims) {
        let (x0, y0, w, h) = Self::grid_px(grid);
        let cell_w = w / grid.width as f32;
        let cell_h = h / grid.height as f32;
        // Live drag preview: grid-relative offset → pixels, applied to every
        // cell until the commit bakes it.
        let (off_x, off_y) = ctl.store().drag_offset();
        let shift_x = off_x * w;
        let shift_y = off_y * h;

        for cell in ctl.store().iter() {
            let px = x0 + cell.x as f32 * cell_w + shift_x;
            let py = y0 + cell.y as f32 * cell_h + shift_y;
            // 90% cell size, centred, like the instanced boxes it mimics
            let m_w = cell_w * 0.05;
            let m_h = cell_h * 0.05;
            self.fill_rect(
                (px + m_w) as i32,
                (py + m_h) as i32,
                (cell_w - 2.0 * m_w) as i32,
                (cell_h - 2.0 * m_h) as i32,
                VOXEL_COLOR,
            );
            self.draw_border(
                (px + m_w) as i32,
                (py + m_h) as i32,
                (cell_w - 2.0 * m_w) as i32,
                (cell_h - 2.0 * m_h) as i32,
                VOXEL_EDGE,
            );
        }
    }

    fn draw_pointer(&mut self, ctl: &FrameController) {
        let (px, py) = ctl.pointer();
        let r = if ctl.flags().pinching { 12 } else { 9 };
        self.draw_disc(
            (px * WIN_W as f32) as i32,
            (py * WIN_H as f32) as i32,
            r,
            POINTER_COLOR,
        );
    }

    fn draw_hands(&mut self, hands: &[HandFrame]) {
        for hand in hands {
            if !hand.is_well_formed() {
                continue;
            }
            for &(a, b) in HAND_BONES.iter() {
                let pa = hand.point(a);
                let pb = hand.point(b);
                self.draw_line(
                    (pa.x * WIN_W as f32) as i32,
                    (pa.y * WIN_H as f32) as i32,
                    (pb.x * WIN_W as f32) as i32,
                    (pb.y * WIN_H as f32) as i32,
                    SKELETON_COLOR,
                );
            }
            for p in hand.points.iter() {
                self.draw_disc(
                    (p.x * WIN_W as f32) as i32,
                    (p.y * WIN_H as f32) as i32,
                    2,
                    SKELETON_COLOR,
                );
            }
        }
    }

    // ── primitive drawing helpers (clipping, signed coords) ───────────────

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x1 = (x + w).clamp(0, WIN_W as i32);
        let y1 = (y + h).clamp(0, WIN_H as i32);
        for row in y.max(0)..y1 {
            for col in x.max(0)..x1 {
                self.buf[row as usize * WIN_W + col as usize] = color;
            }
        }
    }

    fn draw_border(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    fn draw_disc(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Integer DDA line for the skeleton overlay.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
        for s in 0..=steps {
            let x = x0 + (x1 - x0) * s / steps;
            let y = y0 + (y1 - y0) * s / steps;
            self.set_pixel(x, y, color);
        }
    }

    /// Scaled 3×5 bitmap text. Lowercase renders as uppercase; characters
    /// without a glyph show as a midline dash.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let rows = glyph(ch.to_ascii_uppercase());
            for (r, &bits) in rows.iter().enumerate() {
                for c in 0..3 {
                    if bits & (0b100 >> c) != 0 {
                        self.fill_rect(
                            cx + c as i32 * scale,
                            y + r as i32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            cx += 4 * scale;
            if cx >= WIN_W as i32 {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 glyph set for HUD/status text
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> [u8; 5] {
    match c {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b011, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b110, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b010, 0b010, 0b010, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b010, 0b101, 0b101, 0b101, 0b010],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b010],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b110, 0b101, 0b010],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b010, 0b101, 0b010, 0b101, 0b010],
        '9' => [0b010, 0b101, 0b011, 0b001, 0b110],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ' ' => [0b000; 5],
        _ => [0b000, 0b000, 0b111, 0b000, 0b000],
    }
}
