//! gesture_paint — interactive entry point.

use gesture_paint::app::run;
use gesture_paint::controller::{Mode, SessionConfig};
use std::io::{self, Write};
use voxel_grid::GridDims;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gesture_paint=info")),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Gesture Paint — hand-tracked voxel grid writer        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse/keyboard simulation  (use --features leap for hardware)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: two-hand paint, 34×22 grid\n");
        SessionConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> SessionConfig {
    let mode = loop {
        println!("  Gesture set:");
        println!("    1. Two-hand paint  (pinch=draw, fist=drag, L-fist+R-point=erase)");
        println!("    2. One-hand paint  (pinch=draw, OK sign=clear)");
        match read_line("  Choice (1–2, default 1): ").trim() {
            "" | "1" => break Mode::two_hand(),
            "2" => break Mode::one_hand(),
            _ => println!("  ⚠  Please enter 1 or 2.\n"),
        }
    };

    let width: u16 = {
        let w = read_line("  Grid width (4–128, default 34): ")
            .trim().parse().unwrap_or(34);
        w.clamp(4, 128)
    };
    let height: u16 = {
        let h = read_line("  Grid height (4–128, default 22): ")
            .trim().parse().unwrap_or(22);
        h.clamp(4, 128)
    };

    SessionConfig {
        grid: GridDims::new(width, height, 0.18, 0.14),
        mode,
        ..SessionConfig::default()
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
