//! Demonstrates the classifier against each synthetic builder.

use hand_skeleton::{classify, synth, ClassifierConfig, HandFrame};

fn show(label: &str, frame: &HandFrame, cfg: &ClassifierConfig) {
    let f = classify(frame, cfg);
    println!(
        "   {:<12} pinch={:<5} fist={:<5} point={:<5} ok={}",
        label, f.pinching, f.fist, f.pointing, f.ok_sign
    );
}

fn main() {
    println!("\n=== hand_skeleton classifier demo ===\n");
    let cfg = ClassifierConfig::default();

    // ── 1. Each builder at screen centre ─────────────────────────────────
    println!("1. Builders at (0.5, 0.5)");
    show("open", &synth::open_hand(0.5, 0.5), &cfg);
    show("pinch", &synth::pinch_hand(0.5, 0.5), &cfg);
    show("fist", &synth::fist_hand(0.5, 0.5), &cfg);
    show("point", &synth::point_hand(0.5, 0.5), &cfg);
    show("ok", &synth::ok_hand(0.5, 0.5), &cfg);
    println!();

    // ── 2. Translation invariance ────────────────────────────────────────
    println!("2. Same shapes near the top-left corner (0.1, 0.1)");
    show("pinch", &synth::pinch_hand(0.1, 0.1), &cfg);
    show("fist", &synth::fist_hand(0.1, 0.1), &cfg);
    println!();

    // ── 3. Corrupt frame degrades to no gestures ─────────────────────────
    println!("3. A NaN landmark silences every predicate");
    let mut broken = synth::fist_hand(0.5, 0.5);
    broken.points[0].x = f32::NAN;
    show("broken fist", &broken, &cfg);
    println!();

    // ── 4. Tighter pinch threshold ───────────────────────────────────────
    println!("4. pinch_dist 0.001 rejects the standard pinch shape");
    let strict = ClassifierConfig {
        pinch_dist: 0.001,
        ..ClassifierConfig::default()
    };
    show("pinch", &synth::pinch_hand(0.5, 0.5), &strict);
    println!();
}
