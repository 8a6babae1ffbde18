//! # voxel_grid
//!
//! A bounded sparse voxel grid addressed through a normalized pointer.
//!
//! [`GridDims`] describes the visible grid: cell dimensions plus the
//! fractional inset margins that frame it on screen. It quantizes
//! normalized display coordinates into always-in-range [`GridCoord`]s —
//! pointers outside the visible rectangle clamp to an edge cell rather
//! than being rejected.
//!
//! [`VoxelStore`] is the authoritative drawing state: a set of occupied
//! cells plus the in-progress drag session. Dragging accumulates
//! frame-to-frame palm deltas in grid-relative units and bakes them into
//! integer cell shifts only on commit; cells shifted off the grid are
//! discarded permanently. Every operation is total — there is no failure
//! path, only "changed" / "unchanged" — and every change bumps a revision
//! counter that renderers use as their snapshot version.

use std::collections::HashSet;
use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// GridCoord
// ════════════════════════════════════════════════════════════════════════════

/// One occupied cell. Invariant: `0 ≤ x < width`, `0 ≤ y < height` for the
/// dims of the store that holds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub x: u16,
    pub y: u16,
}

impl GridCoord {
    pub fn new(x: u16, y: u16) -> Self {
        GridCoord { x, y }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GridDims — geometry and pointer quantization
// ════════════════════════════════════════════════════════════════════════════

/// Grid dimensions and the fractional inset margins on each side of the
/// visible grid. Insets live in `(0, 0.5)`; the defaults match a 34×22 grid
/// framed by 18% / 14% margins.
#[derive(Clone, Copy, Debug)]
pub struct GridDims {
    pub width: u16,
    pub height: u16,
    pub inset_x: f32,
    pub inset_y: f32,
}

impl Default for GridDims {
    fn default() -> Self {
        GridDims {
            width: 34,
            height: 22,
            inset_x: 0.18,
            inset_y: 0.14,
        }
    }
}

impl GridDims {
    pub fn new(width: u16, height: u16, inset_x: f32, inset_y: f32) -> Self {
        GridDims { width, height, inset_x, inset_y }
    }

    /// Rescale a normalized display position so the inset sub-rectangle
    /// spans `[0, 1]`. Unclamped: drag deltas need the raw value, and a
    /// pointer outside the visible grid yields coordinates outside `[0, 1]`.
    pub fn to_relative(&self, px: f32, py: f32) -> (f32, f32) {
        let rel_x = (px - self.inset_x) / (1.0 - 2.0 * self.inset_x);
        let rel_y = (py - self.inset_y) / (1.0 - 2.0 * self.inset_y);
        (rel_x, rel_y)
    }

    /// Quantize a normalized display position to a cell. Clamps first, so
    /// the result is always in range; forward-only (no round-trip
    /// guarantee).
    pub fn cell_at(&self, px: f32, py: f32) -> GridCoord {
        let (rel_x, rel_y) = self.to_relative(px, py);
        let rel_x = rel_x.clamp(0.0, 1.0);
        let rel_y = rel_y.clamp(0.0, 1.0);
        let gx = (rel_x * (self.width.saturating_sub(1)) as f32).floor() as u16;
        let gy = (rel_y * (self.height.saturating_sub(1)) as f32).floor() as u16;
        GridCoord::new(gx, gy)
    }

    /// Whether a signed cell position lies on the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width as u32 && y >= 0 && (y as u32) < self.height as u32
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

// ════════════════════════════════════════════════════════════════════════════
// VoxelStore
// ════════════════════════════════════════════════════════════════════════════

/// The persisted drawing: occupied cells, the live drag session (if any)
/// and the revision counter renderers snapshot against.
#[derive(Clone, Debug)]
pub struct VoxelStore {
    dims: GridDims,
    cells: HashSet<GridCoord>,
    /// Last grid-relative palm position while a drag session is live.
    anchor: Option<(f32, f32)>,
    /// Accumulated drag offset in grid-relative units; baked on commit.
    offset: (f32, f32),
    revision: u64,
}

impl VoxelStore {
    pub fn new(dims: GridDims) -> Self {
        VoxelStore {
            dims,
            cells: HashSet::new(),
            anchor: None,
            offset: (0.0, 0.0),
            revision: 0,
        }
    }

    // ── membership ────────────────────────────────────────────────────────

    /// Insert a cell. Returns true iff membership actually changed, so
    /// callers can skip redundant re-render notifications.
    pub fn add(&mut self, coord: GridCoord) -> bool {
        let changed = self.cells.insert(coord);
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Delete a cell; no-op (false) when absent.
    pub fn remove(&mut self, coord: GridCoord) -> bool {
        let changed = self.cells.remove(&coord);
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Empty the set. Changed iff it held anything.
    pub fn clear(&mut self) -> bool {
        if self.cells.is_empty() {
            return false;
        }
        self.cells.clear();
        self.revision += 1;
        true
    }

    // ── drag session ──────────────────────────────────────────────────────

    /// Open a drag session at a grid-relative anchor. Records only; no
    /// mutation, no changed signal. Calling discipline (never while a
    /// session is already live) belongs to the frame controller.
    pub fn drag_begin(&mut self, rel: (f32, f32)) {
        self.anchor = Some(rel);
    }

    /// Advance the live session: the delta from the previous anchor is
    /// added to the accumulated offset and the anchor moves to `rel`, so
    /// each call contributes an incremental frame-to-frame delta rather
    /// than a cumulative-from-origin one. Signals changed on every call
    /// while a session is live, for live-preview rendering. Without a
    /// session this is a no-op.
    pub fn drag_update(&mut self, rel: (f32, f32)) -> bool {
        let anchor = match self.anchor {
            Some(a) => a,
            None => return false,
        };
        self.offset.0 += rel.0 - anchor.0;
        self.offset.1 += rel.1 - anchor.1;
        self.anchor = Some(rel);
        self.revision += 1;
        true
    }

    /// Bake the accumulated offset into the set: grid-relative offset →
    /// integer cell deltas via `round(offset · dim)`; every cell shifts and
    /// anything landing outside the grid is discarded permanently. A
    /// zero-delta commit leaves membership untouched but still signals
    /// changed when a session existed, flushing the preview. Always resets
    /// the session.
    pub fn drag_commit(&mut self) -> bool {
        let had_session = self.anchor.is_some();
        let dx = (self.offset.0 * self.dims.width as f32).round() as i32;
        let dy = (self.offset.1 * self.dims.height as f32).round() as i32;
        self.anchor = None;
        self.offset = (0.0, 0.0);

        if dx == 0 && dy == 0 {
            if had_session {
                self.revision += 1;
            }
            return had_session;
        }

        let shifted: HashSet<GridCoord> = self
            .cells
            .iter()
            .filter_map(|c| {
                let nx = c.x as i32 + dx;
                let ny = c.y as i32 + dy;
                self.dims
                    .contains(nx, ny)
                    .then(|| GridCoord::new(nx as u16, ny as u16))
            })
            .collect();
        self.cells = shifted;
        self.revision += 1;
        true
    }

    /// Abandon the live session without baking: anchor and accumulated
    /// offset both reset. Changed iff a session existed (flushes any
    /// preview translation).
    pub fn drag_cancel(&mut self) -> bool {
        let had_session = self.anchor.is_some();
        self.anchor = None;
        self.offset = (0.0, 0.0);
        if had_session {
            self.revision += 1;
        }
        had_session
    }

    pub fn drag_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Accumulated offset in grid-relative units, for live-preview
    /// translation of rendered cells before commit.
    pub fn drag_offset(&self) -> (f32, f32) {
        self.offset
    }

    // ── snapshot accessors ────────────────────────────────────────────────

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridCoord> {
        self.cells.iter()
    }

    /// Monotonic change counter; bumps exactly when an operation signals
    /// "changed". Renderers re-snapshot when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// One-line summary for menus and status bars.
    pub fn status(&self) -> String {
        format!(
            "{} voxel(s) on {}×{}  rev {}  drag {}",
            self.cells.len(),
            self.dims.width,
            self.dims.height,
            self.revision,
            if self.anchor.is_some() { "live" } else { "idle" },
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> GridDims {
        GridDims::default() // 34×22, insets 0.18 / 0.14
    }

    // ── mapper ────────────────────────────────────────────────────────────

    #[test]
    fn cell_at_reference_points() {
        let d = dims();
        assert_eq!(d.cell_at(0.18, 0.14), GridCoord::new(0, 0));
        assert_eq!(d.cell_at(0.82, 0.86), GridCoord::new(33, 21));
        assert_eq!(d.cell_at(0.5, 0.5), GridCoord::new(16, 10));
    }

    #[test]
    fn cell_at_clamps_outside_inputs() {
        let d = dims();
        assert_eq!(d.cell_at(-0.2, 1.4), GridCoord::new(0, 21));
        assert_eq!(d.cell_at(1.4, -0.2), GridCoord::new(33, 0));
        assert_eq!(d.cell_at(-0.2, -5.0), d.cell_at(0.0, 0.0));
    }

    #[test]
    fn to_relative_is_unclamped() {
        let d = dims();
        let (rx, ry) = d.to_relative(0.0, 0.0);
        assert!(rx < 0.0 && ry < 0.0);
        let (rx, _) = d.to_relative(1.0, 0.5);
        assert!(rx > 1.0);
    }

    #[test]
    fn cell_at_always_in_range() {
        let d = dims();
        for &(px, py) in &[(0.0, 0.0), (1.0, 1.0), (0.18, 0.86), (2.0, -2.0), (0.33, 0.77)] {
            let c = d.cell_at(px, py);
            assert!(c.x < d.width && c.y < d.height, "({px},{py}) → {c}");
        }
    }

    // ── membership ────────────────────────────────────────────────────────

    #[test]
    fn add_is_idempotent_with_changed_contract() {
        let mut s = VoxelStore::new(dims());
        assert!(s.add(GridCoord::new(3, 4)));
        let rev = s.revision();
        assert!(!s.add(GridCoord::new(3, 4)));
        assert_eq!(s.revision(), rev, "redundant add must not bump revision");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut s = VoxelStore::new(dims());
        assert!(!s.remove(GridCoord::new(9, 9)));
        assert_eq!(s.revision(), 0);
        s.add(GridCoord::new(9, 9));
        assert!(s.remove(GridCoord::new(9, 9)));
        assert!(s.is_empty());
    }

    #[test]
    fn clear_signals_only_when_nonempty() {
        let mut s = VoxelStore::new(dims());
        assert!(!s.clear());
        s.add(GridCoord::new(1, 1));
        s.add(GridCoord::new(2, 2));
        assert!(s.clear());
        assert!(s.is_empty());
        assert!(!s.clear());
    }

    // ── drag ──────────────────────────────────────────────────────────────

    #[test]
    fn drag_deltas_telescope_to_net_shift() {
        let mut s = VoxelStore::new(dims());
        s.add(GridCoord::new(5, 5));

        let p0 = (0.30, 0.40);
        let p1 = (0.33, 0.38);
        let p2 = (0.30 + 2.0 / 34.0, 0.40 + 1.0 / 22.0);
        s.drag_begin(p0);
        s.drag_update(p1);
        s.drag_update(p2);
        s.drag_commit();

        // Intermediate deltas cancel: net shift = round((p2 − p0) · dims).
        assert!(s.contains(GridCoord::new(7, 6)));
        assert_eq!(s.len(), 1);
        assert!(!s.drag_active());
        assert_eq!(s.drag_offset(), (0.0, 0.0));
    }

    #[test]
    fn drag_commit_drops_cells_pushed_off_grid() {
        let mut s = VoxelStore::new(dims());
        s.add(GridCoord::new(33, 5));
        s.add(GridCoord::new(2, 5));
        s.drag_begin((0.5, 0.5));
        s.drag_update((0.5 + 2.0 / 34.0, 0.5));
        s.drag_commit();
        // (33,5) shifts to x=35 and is permanently discarded.
        assert_eq!(s.len(), 1);
        assert!(s.contains(GridCoord::new(4, 5)));
    }

    #[test]
    fn zero_delta_commit_flushes_preview() {
        let mut s = VoxelStore::new(dims());
        s.add(GridCoord::new(5, 5));
        s.drag_begin((0.5, 0.5));
        let rev = s.revision();
        assert!(s.drag_commit(), "a live session still signals changed");
        assert_eq!(s.revision(), rev + 1);
        assert!(s.contains(GridCoord::new(5, 5)));
        assert!(!s.drag_commit(), "no session, nothing to flush");
    }

    #[test]
    fn drag_update_signals_every_frame() {
        let mut s = VoxelStore::new(dims());
        s.add(GridCoord::new(5, 5));
        s.drag_begin((0.2, 0.2));
        let rev = s.revision();
        assert!(s.drag_update((0.21, 0.2)));
        assert!(s.drag_update((0.22, 0.2)));
        assert_eq!(s.revision(), rev + 2);
        // Membership untouched until commit.
        assert!(s.contains(GridCoord::new(5, 5)));
    }

    #[test]
    fn drag_update_without_session_is_noop() {
        let mut s = VoxelStore::new(dims());
        assert!(!s.drag_update((0.4, 0.4)));
        assert_eq!(s.revision(), 0);
    }

    #[test]
    fn drag_cancel_discards_offset() {
        let mut s = VoxelStore::new(dims());
        s.add(GridCoord::new(5, 5));
        s.drag_begin((0.2, 0.2));
        s.drag_update((0.6, 0.6));
        assert!(s.drag_cancel());
        assert!(!s.drag_active());
        assert_eq!(s.drag_offset(), (0.0, 0.0));
        assert!(s.contains(GridCoord::new(5, 5)), "cancel never bakes");
        assert!(!s.drag_cancel());
    }

    #[test]
    fn one_cell_drag_scenario() {
        // 34×22 grid, {(5,5)}; palm moves +1/34 grid-relative in x over two
        // fist frames, then the fist ends → {(6,5)}.
        let mut s = VoxelStore::new(dims());
        s.add(GridCoord::new(5, 5));
        s.drag_begin((0.3, 0.3));
        s.drag_update((0.3 + 1.0 / 34.0, 0.3));
        s.drag_commit();
        assert_eq!(s.len(), 1);
        assert!(s.contains(GridCoord::new(6, 5)));
    }

    #[test]
    fn status_mentions_count_and_drag_state() {
        let mut s = VoxelStore::new(dims());
        s.add(GridCoord::new(0, 0));
        assert!(s.status().contains("1 voxel"));
        s.drag_begin((0.5, 0.5));
        assert!(s.status().contains("drag live"));
    }
}
