//! Interactive voxel-grid explorer with pointer mapping and drag commits.

use std::io::{self, Write};
use voxel_grid::{GridCoord, GridDims, VoxelStore};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              Voxel Grid Explorer                         ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let dims = pick_dims();
    let mut store = VoxelStore::new(dims);

    println!("\n  ✓  {}\n", store.status());

    loop {
        print_ops_menu();
        let choice = read_line("Command: ").trim().to_ascii_lowercase();

        match choice.as_str() {
            "1" => {
                let (px, py) = read_pointer();
                let cell = store.dims().cell_at(px, py);
                let changed = store.add(cell);
                println!("  Pointer ({:.3}, {:.3}) → {}  {}", px, py, cell,
                         if changed { "placed" } else { "already occupied" });
            }
            "2" => {
                let (px, py) = read_pointer();
                let cell = store.dims().cell_at(px, py);
                let changed = store.remove(cell);
                println!("  Pointer ({:.3}, {:.3}) → {}  {}", px, py, cell,
                         if changed { "erased" } else { "was empty" });
            }
            "3" => {
                let (px, py) = read_pointer();
                let rel = store.dims().to_relative(px, py);
                if store.drag_active() {
                    store.drag_update(rel);
                    let (ox, oy) = store.drag_offset();
                    println!("  Drag updated — offset ({:.4}, {:.4})", ox, oy);
                } else {
                    store.drag_begin(rel);
                    println!("  Drag session opened at ({:.4}, {:.4})", rel.0, rel.1);
                }
            }
            "4" => {
                if store.drag_commit() {
                    println!("  Committed.  {}", store.status());
                } else {
                    println!("  No drag session to commit.");
                }
            }
            "5" => {
                if store.drag_cancel() {
                    println!("  Drag abandoned, nothing baked.");
                } else {
                    println!("  No drag session live.");
                }
            }
            "6" => {
                if store.clear() {
                    println!("  Cleared.");
                } else {
                    println!("  Already empty.");
                }
            }
            "7" => render_ascii(&store),
            "8" => println!("  {}", store.status()),
            "q" | "quit" => {
                println!("\nGoodbye!\n");
                break;
            }
            _ => println!("  ⚠  Unknown command."),
        }
        println!();
    }
}

fn print_ops_menu() {
    println!("  ┌─────────────────────────────────────────────────────────┐");
    println!("  │  1. Place at pointer          5. Cancel drag            │");
    println!("  │  2. Erase at pointer          6. Clear all              │");
    println!("  │  3. Drag begin/update         7. Render ASCII grid      │");
    println!("  │  4. Commit drag               8. Status    q. Quit      │");
    println!("  └─────────────────────────────────────────────────────────┘");
}

fn render_ascii(store: &VoxelStore) {
    let dims = store.dims();
    for y in 0..dims.height {
        let row: String = (0..dims.width)
            .map(|x| if store.contains(GridCoord::new(x, y)) { '█' } else { '·' })
            .collect();
        println!("  {}", row);
    }
}

fn pick_dims() -> GridDims {
    let w: u16 = read_line("  Grid width (default 34): ").trim().parse().unwrap_or(34);
    let h: u16 = read_line("  Grid height (default 22): ").trim().parse().unwrap_or(22);
    GridDims::new(w.max(1), h.max(1), 0.18, 0.14)
}

fn read_pointer() -> (f32, f32) {
    let px: f32 = read_line("  Pointer x (0–1): ").trim().parse().unwrap_or(0.5);
    let py: f32 = read_line("  Pointer y (0–1): ").trim().parse().unwrap_or(0.5);
    (px, py)
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
