//! Top-level application loop.
//!
//! `AppState` owns the gesture [`Session`] and the last rendered hand batch,
//! and turns controller flags into the HUD/status strings. [`run`] wires the
//! frame source, visualizer and session together and drives the loop at
//! ~60 fps.

use std::sync::mpsc::{self, TryRecvError};

use tracing::info;

use crate::controller::{Session, SessionConfig};
use crate::gesture::{spawn_frame_source, HandBatch, SimInput};
use crate::visualizer::Visualizer;

#[cfg(not(feature = "leap"))]
use crate::gesture::SimFrameSource;
#[cfg(feature = "leap")]
use crate::gesture::LeapFrameSource;

use hand_skeleton::HandFrame;

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    pub session: Session,
    /// Hands from the most recent batch, for the skeleton overlay.
    last_hands: Vec<HandFrame>,
    pub status: String,
}

impl AppState {
    pub fn new(cfg: SessionConfig) -> Self {
        AppState {
            session: Session::new(cfg),
            last_hands: Vec::new(),
            status: "Waiting for frames".to_string(),
        }
    }

    /// Feed one detector batch through the session and refresh the status
    /// line when the drawing actually changed.
    pub fn apply(&mut self, batch: HandBatch) {
        let before = self.session.store().revision();
        self.session.frame(&batch);
        self.last_hands = batch.hands;
        if self.session.store().revision() != before {
            self.status = self.session.store().status();
        }
    }

    /// HUD chip text, mirroring the gesture currently in effect.
    pub fn hud(&self) -> &'static str {
        let flags = self.session.flags();
        if !flags.ready {
            "STARTING"
        } else if flags.erasing {
            "ERASING"
        } else if flags.dragging {
            "DRAGGING (FIST)"
        } else if flags.pinching {
            "DRAWING (PINCH)"
        } else {
            "READY"
        }
    }

    pub fn last_hands(&self) -> &[HandFrame] {
        &self.last_hands
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the visualizer and the frame source (simulation by default,
/// hardware with `--features leap`), starts the session and drives the
/// event/render loop until the window closes. All session state is
/// discarded on the way out — nothing persists.
pub fn run(cfg: SessionConfig) -> Result<(), String> {
    // ── Sim input channel (visualizer → frame source) ─────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    #[cfg(feature = "leap")]
    let frame_rx = {
        drop(sim_rx);
        spawn_frame_source(LeapFrameSource)
    };
    #[cfg(not(feature = "leap"))]
    let frame_rx = spawn_frame_source(SimFrameSource { rx: sim_rx });

    // ── Visualizer (owns the window and the sim input sender) ─────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── Session ───────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg);
    app.session.start();
    info!(
        width = cfg.grid.width,
        height = cfg.grid.height,
        "gesture session started"
    );

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input → one simulated pose per frame
        if !vis.poll_input() {
            break;
        }

        // 2. Drain detector batches; the controller runs to completion per
        //    batch, so the renderer below always sees settled state.
        loop {
            match frame_rx.try_recv() {
                Ok(batch) => app.apply(batch),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    app.session.stop();
                    return Ok(());
                }
            }
        }

        // 3. Render the snapshot
        let hud = app.hud();
        vis.render(app.session.controller(), app.last_hands(), hud, &app.status);
    }

    app.session.stop();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_skeleton::synth;

    fn batch(hands: Vec<HandFrame>, now: u64) -> HandBatch {
        HandBatch {
            hands,
            timestamp_ms: now,
        }
    }

    fn started_app() -> AppState {
        let mut app = AppState::new(SessionConfig::default());
        app.session.start();
        app
    }

    #[test]
    fn apply_updates_status_on_change() {
        let mut app = started_app();
        app.apply(batch(vec![synth::pinch_hand(0.5, 0.5)], 1_000));
        assert!(app.status.contains("1 voxel"));
    }

    #[test]
    fn status_untouched_without_change() {
        let mut app = started_app();
        let before = app.status.clone();
        app.apply(batch(vec![synth::open_hand(0.5, 0.5)], 1_000));
        assert_eq!(app.status, before);
    }

    #[test]
    fn hud_follows_flags() {
        let mut app = AppState::new(SessionConfig::default());
        assert_eq!(app.hud(), "STARTING");
        app.session.start();
        assert_eq!(app.hud(), "READY");
        app.apply(batch(vec![synth::pinch_hand(0.5, 0.5)], 1_000));
        assert_eq!(app.hud(), "DRAWING (PINCH)");
        app.apply(batch(vec![synth::fist_hand(0.5, 0.5)], 1_040));
        assert_eq!(app.hud(), "DRAGGING (FIST)");
        app.apply(batch(vec![], 1_080));
        assert_eq!(app.hud(), "READY");
    }

    #[test]
    fn last_hands_mirror_latest_batch() {
        let mut app = started_app();
        app.apply(batch(vec![synth::open_hand(0.3, 0.3)], 1_000));
        assert_eq!(app.last_hands().len(), 1);
        app.apply(batch(vec![], 1_040));
        assert!(app.last_hands().is_empty());
    }
}
