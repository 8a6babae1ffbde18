//! Per-frame orchestration: hands in, store mutations out.
//!
//! [`FrameController::advance`] runs to completion once per detector batch
//! with no overlapping invocations; the store and drag session are mutated
//! only here. [`Session`] wraps the controller with an idempotent
//! start/stop lifetime so the caller owns exactly one explicit session
//! object instead of a module-level "already started" guard.

use tracing::debug;

use hand_skeleton::{classify, ClassifierConfig, GestureFlags, HandFrame, Handedness};
use voxel_grid::{GridDims, VoxelStore};

use crate::gesture::HandBatch;
use crate::rate::{ActionKind, Cooldowns, RateGate};

// ════════════════════════════════════════════════════════════════════════════
// Mode — capability set
// ════════════════════════════════════════════════════════════════════════════

/// Which gesture actions this session supports. One state machine serves
/// both shipped gesture sets; the presets name them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode {
    pub has_drag: bool,
    pub has_erase: bool,
    pub has_clear: bool,
}

impl Mode {
    /// Two-hand variant: fist drags the drawing, left-fist + right-point
    /// erases. No clear gesture.
    pub fn two_hand() -> Self {
        Mode {
            has_drag: true,
            has_erase: true,
            has_clear: false,
        }
    }

    /// Single-hand variant: OK sign clears the drawing. No drag, no erase.
    pub fn one_hand() -> Self {
        Mode {
            has_drag: false,
            has_erase: false,
            has_clear: true,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::two_hand()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionConfig / UiFlags
// ════════════════════════════════════════════════════════════════════════════

/// Everything fixed at construction: grid geometry, capabilities,
/// classifier thresholds and cooldown intervals.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionConfig {
    pub grid: GridDims,
    pub mode: Mode,
    pub classifier: ClassifierConfig,
    pub cooldowns: Cooldowns,
}

/// Discrete status flags for the UI layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiFlags {
    /// Session started and receiving frames.
    pub ready: bool,
    pub pinching: bool,
    pub dragging: bool,
    pub erasing: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// FrameController
// ════════════════════════════════════════════════════════════════════════════

pub struct FrameController {
    grid: GridDims,
    mode: Mode,
    classifier: ClassifierConfig,
    store: VoxelStore,
    gate: RateGate,
    pointer: (f32, f32),
    flags: UiFlags,
}

impl FrameController {
    pub fn new(cfg: SessionConfig) -> Self {
        FrameController {
            grid: cfg.grid,
            mode: cfg.mode,
            classifier: cfg.classifier,
            store: VoxelStore::new(cfg.grid),
            gate: RateGate::new(cfg.cooldowns),
            pointer: (0.5, 0.5),
            flags: UiFlags::default(),
        }
    }

    /// Process one detector batch. Decision order: classify every hand,
    /// pick the primary, arbitrate erase mode, then run single-hand
    /// drag/clear/place; with no hands, abandon any live drag.
    pub fn advance(&mut self, batch: &HandBatch) {
        let hands = &batch.hands;
        let now = batch.timestamp_ms;

        let flags: Vec<GestureFlags> =
            hands.iter().map(|h| classify(h, &self.classifier)).collect();

        // The pointer hand is whichever one the mirrored detector did NOT
        // tag Left (untagged hands count), else the sole hand.
        let primary = hands
            .iter()
            .position(|h| h.handedness != Handedness::Left)
            .or(if hands.is_empty() { None } else { Some(0) });

        if let Some(p) = primary {
            let tip = hands[p].index_tip();
            if tip.is_finite() {
                self.pointer = (tip.x, tip.y);
            }
        }

        // ── erase arbitration: Left fist + non-Left pointing ──────────────
        let erase_pointer = if self.mode.has_erase {
            let left = hands
                .iter()
                .position(|h| h.handedness == Handedness::Left);
            match (left, primary) {
                (Some(l), Some(r))
                    if l != r
                        && hands[r].handedness != Handedness::Left
                        && flags[l].fist
                        && flags[r].pointing =>
                {
                    Some(r)
                }
                _ => None,
            }
        } else {
            None
        };
        self.flags.erasing = erase_pointer.is_some();

        if let Some(r) = erase_pointer {
            // Erase mode suppresses all single-hand handling this frame.
            if self.gate.try_fire(ActionKind::Erase, now) {
                let tip = hands[r].index_tip();
                let cell = self.grid.cell_at(tip.x, tip.y);
                if self.store.remove(cell) {
                    debug!(cell = %cell, "erased");
                }
            }
        } else if let Some(p) = primary {
            self.advance_single_hand(&batch.hands[p], flags[p], now);
        } else {
            // No hands: an interrupted drag is abandoned, not committed,
            // and the transient display flags drop.
            self.flags.pinching = false;
            self.flags.dragging = false;
            if self.store.drag_cancel() {
                debug!("drag abandoned, hand lost");
            }
        }
    }

    fn advance_single_hand(&mut self, hand: &HandFrame, gf: GestureFlags, now: u64) {
        self.flags.pinching = gf.pinching;

        if self.mode.has_drag {
            self.flags.dragging = gf.fist;
            if gf.fist {
                let palm = hand.palm();
                let rel = self.grid.to_relative(palm.x, palm.y);
                if self.store.drag_active() {
                    self.store.drag_update(rel);
                } else {
                    self.store.drag_begin(rel);
                    debug!(x = rel.0, y = rel.1, "drag begin");
                }
            } else if self.store.drag_active() {
                if self.store.is_empty() {
                    // Nothing to commit; just drop the session.
                    self.store.drag_cancel();
                } else {
                    self.store.drag_commit();
                    debug!(voxels = self.store.len(), "drag committed");
                }
            }
        }

        // Fist overrides pinch: a tightly curled fist can satisfy the pinch
        // distance incidentally and must never drop a block. The OK sign
        // implies pinch, so while it holds (gated or not) placement stays
        // suppressed.
        if self.mode.has_clear && gf.ok_sign && !gf.fist {
            if self.gate.try_fire(ActionKind::Clear, now) && self.store.clear() {
                debug!("cleared");
            }
        } else if gf.pinching && !gf.fist {
            if self.gate.try_fire(ActionKind::Place, now) {
                let tip = hand.index_tip();
                let cell = self.grid.cell_at(tip.x, tip.y);
                if self.store.add(cell) {
                    debug!(cell = %cell, "placed");
                }
            }
        }
    }

    // ── snapshot accessors for the render loop ────────────────────────────

    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    /// Primary-hand pointer in normalized display coordinates.
    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    pub fn flags(&self) -> UiFlags {
        self.flags
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn grid(&self) -> GridDims {
        self.grid
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session — explicit start/stop lifetime
// ════════════════════════════════════════════════════════════════════════════

/// Owns one controller between `start()` and `stop()`. Both are idempotent;
/// frames delivered outside the started window are ignored, and `stop()`
/// discards all in-memory state (voxels, drag session, cooldowns) — session
/// state is ephemeral, there is nothing to flush.
pub struct Session {
    cfg: SessionConfig,
    ctl: FrameController,
    started: bool,
}

impl Session {
    pub fn new(cfg: SessionConfig) -> Self {
        Session {
            cfg,
            ctl: FrameController::new(cfg),
            started: false,
        }
    }

    /// Returns true iff this call actually started the session.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.ctl.flags.ready = true;
        debug!(mode = ?self.cfg.mode, "session started");
        true
    }

    /// Returns true iff this call actually stopped the session.
    pub fn stop(&mut self) -> bool {
        if !self.started {
            return false;
        }
        self.started = false;
        self.ctl = FrameController::new(self.cfg);
        debug!("session stopped, state discarded");
        true
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Advance one frame; ignored (false) unless started.
    pub fn frame(&mut self, batch: &HandBatch) -> bool {
        if !self.started {
            return false;
        }
        self.ctl.advance(batch);
        true
    }

    pub fn controller(&self) -> &FrameController {
        &self.ctl
    }

    pub fn store(&self) -> &VoxelStore {
        self.ctl.store()
    }

    pub fn flags(&self) -> UiFlags {
        self.ctl.flags()
    }

    pub fn pointer(&self) -> (f32, f32) {
        self.ctl.pointer()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
