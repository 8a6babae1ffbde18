//! Classify hand-landmark lines from stdin.
//!
//! Each input line is one hand frame: 21 whitespace-separated `x,y,z`
//! triples in normalized coordinates (the flat layout most detector
//! bindings emit). The tool prints the gesture flags per line, which makes
//! it easy to pipe a recorded landmark log through the classifier.

use hand_skeleton::{classify, ClassifierConfig, HandFrame, HandPoint, Handedness, LANDMARK_COUNT};
use std::io::{self, BufRead};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║        hand_skeleton — landmark line classifier          ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
    println!("  Paste one frame per line: 21 × \"x,y,z\" triples.");
    println!("  Ctrl-D ends input.");
    println!();

    let cfg = ClassifierConfig::default();
    let stdin = io::stdin();

    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_frame(&line) {
            Some(frame) => {
                let flags = classify(&frame, &cfg);
                println!(
                    "  [{:>4}]  pinch={}  fist={}  point={}  ok={}",
                    lineno, flags.pinching, flags.fist, flags.pointing, flags.ok_sign
                );
            }
            None => println!("  [{:>4}]  ⚠  expected 21 x,y,z triples", lineno),
        }
    }
}

/// Parse "x,y,z x,y,z …" into a frame. Returns None on the wrong triple
/// count; non-numeric fields become NaN and classify to no gestures.
fn parse_frame(line: &str) -> Option<HandFrame> {
    let mut points = [HandPoint::default(); LANDMARK_COUNT];
    let mut count = 0;

    for (i, triple) in line.split_whitespace().enumerate() {
        if i >= LANDMARK_COUNT {
            return None;
        }
        let mut coords = triple.split(',');
        let x = coords.next().and_then(|v| v.parse().ok()).unwrap_or(f32::NAN);
        let y = coords.next().and_then(|v| v.parse().ok()).unwrap_or(f32::NAN);
        let z = coords.next().and_then(|v| v.parse().ok()).unwrap_or(0.0);
        points[i] = HandPoint::new(x, y, z);
        count = i + 1;
    }

    if count == LANDMARK_COUNT {
        Some(HandFrame::new(points, Handedness::Unknown))
    } else {
        None
    }
}
