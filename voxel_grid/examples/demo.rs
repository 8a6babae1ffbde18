//! Demonstrates pointer quantization and the drag lifecycle.

use voxel_grid::{GridCoord, GridDims, VoxelStore};

fn main() {
    println!("\n=== voxel_grid demo ===\n");
    let dims = GridDims::default();

    // ── 1. Pointer → cell quantization ───────────────────────────────────
    println!("1. Inset corners map to grid corners");
    for (px, py) in [(0.18, 0.14), (0.82, 0.86), (0.5, 0.5)] {
        println!("   ({:.2}, {:.2}) → {}", px, py, dims.cell_at(px, py));
    }
    println!("   off-screen (-0.2, 1.4) → {}\n", dims.cell_at(-0.2, 1.4));

    // ── 2. Membership with changed signals ───────────────────────────────
    println!("2. Idempotent placement");
    let mut store = VoxelStore::new(dims);
    println!("   add (5,5) changed={}", store.add(GridCoord::new(5, 5)));
    println!("   add (5,5) changed={}", store.add(GridCoord::new(5, 5)));
    println!("   {}\n", store.status());

    // ── 3. Drag one cell to the right ────────────────────────────────────
    println!("3. Drag by one cell width");
    store.drag_begin((0.3, 0.3));
    store.drag_update((0.3 + 1.0 / 34.0, 0.3));
    store.drag_commit();
    println!("   now contains (6,5): {}\n", store.contains(GridCoord::new(6, 5)));

    // ── 4. Dragging off the edge deletes ─────────────────────────────────
    println!("4. Cells pushed past the edge are dropped");
    store.drag_begin((0.5, 0.5));
    store.drag_update((2.0, 0.5)); // far beyond the right edge
    store.drag_commit();
    println!("   {}\n", store.status());
}
