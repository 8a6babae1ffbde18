//! Hand-frame acquisition — both from tracking hardware and keyboard/mouse
//! simulation.
//!
//! The public interface is [`HandBatch`] delivered over a `mpsc` channel:
//! one batch per detector frame, carrying 0–2 [`HandFrame`]s and a
//! monotonic timestamp. Consumers don't need to know whether batches came
//! from real hardware or the simulator — the simulator emits full synthetic
//! skeletons, so the real classifier runs either way.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Instant;

use hand_skeleton::{synth, HandFrame, Handedness};

// ════════════════════════════════════════════════════════════════════════════
// HandBatch
// ════════════════════════════════════════════════════════════════════════════

/// One detector callback's payload.
#[derive(Clone, Debug)]
pub struct HandBatch {
    /// Detected hands, at most two, each optionally handedness-tagged.
    pub hands: Vec<HandFrame>,
    /// Monotonic milliseconds since the source started.
    pub timestamp_ms: u64,
}

// ════════════════════════════════════════════════════════════════════════════
// FrameSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandBatch`]es over a channel.
pub trait FrameSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandBatch>);
}

/// Spawn a frame source on its own thread and return the receiving end.
pub fn spawn_frame_source<S: FrameSource>(source: S) -> Receiver<HandBatch> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimFrameSource — keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug)]
pub enum SimInput {
    /// Pointer position plus the hand shape currently held.
    Pose { x: f32, y: f32, shape: SimShape },
    /// Close the source.
    Quit,
}

/// Hand shape selected by the held key (mapped from minifb keys).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimShape {
    Open,       // no key — idle hand at the mouse
    Pinch,      // Space / left mouse button
    Fist,       // F
    Point,      // D
    Ok,         // C
    EraseCombo, // E — left fist parked + right pointing at the mouse
    Hidden,     // H — simulate lost tracking
}

/// Frame source driven by [`SimInput`] events from the visualizer's window.
///
/// Each `Pose` becomes a full synthetic skeleton batch, so classification,
/// mapping and rate gating all run exactly as they would on detector
/// output. This decouples the window event loop from gesture logic.
pub struct SimFrameSource {
    pub rx: Receiver<SimInput>,
}

impl FrameSource for SimFrameSource {
    fn run(self: Box<Self>, tx: Sender<HandBatch>) {
        let origin = Instant::now();

        for input in self.rx {
            let (x, y, shape) = match input {
                SimInput::Pose { x, y, shape } => (x, y, shape),
                SimInput::Quit => return,
            };

            let hands = match shape {
                SimShape::Open => vec![synth::open_hand(x, y)],
                SimShape::Pinch => vec![synth::pinch_hand(x, y)],
                SimShape::Fist => vec![synth::fist_hand(x, y)],
                SimShape::Point => vec![synth::point_hand(x, y)],
                SimShape::Ok => vec![synth::ok_hand(x, y)],
                SimShape::EraseCombo => vec![
                    // The off-hand fist parks on the left of the frame.
                    synth::fist_hand(0.22, 0.55).tagged(Handedness::Left),
                    synth::point_hand(x, y).tagged(Handedness::Right),
                ],
                SimShape::Hidden => Vec::new(),
            };

            let batch = HandBatch {
                hands,
                timestamp_ms: origin.elapsed().as_millis() as u64,
            };
            if tx.send(batch).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapFrameSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Frame source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Palm-up tracking coordinates (millimetres, y up) are squeezed into the
/// mirrored top-left-origin display square the classifier expects; the
/// grid mapper clamps anything that lands outside it.
#[cfg(feature = "leap")]
pub struct LeapFrameSource;

#[cfg(feature = "leap")]
impl FrameSource for LeapFrameSource {
    fn run(self: Box<Self>, tx: Sender<HandBatch>) {
        use leaprs::*;

        // Tracking volume mapped onto the display square (empirically tuned)
        const SPAN_X_MM: f32 = 400.0; // ±200mm around the device centre
        const MIN_Y_MM: f32 = 80.0;
        const SPAN_Y_MM: f32 = 320.0;

        let mut connection = Connection::create(ConnectionConfig::default())
            .expect("Failed to open LeapC connection");
        connection.open().expect("Failed to open LeapMotion device");

        let origin = Instant::now();

        loop {
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<HandFrame> = frame
                    .hands()
                    .take(2)
                    .map(|h| leap_hand_frame(&h, SPAN_X_MM, MIN_Y_MM, SPAN_Y_MM))
                    .collect();

                let batch = HandBatch {
                    hands,
                    timestamp_ms: origin.elapsed().as_millis() as u64,
                };
                if tx.send(batch).is_err() {
                    return;
                }
            }
        }
    }
}

/// Convert one tracked hand into the 21-landmark normalized frame:
/// wrist + (MCP, PIP, DIP, TIP) per digit, mirrored to display orientation.
#[cfg(feature = "leap")]
fn leap_hand_frame(
    hand: &leaprs::Hand,
    span_x: f32,
    min_y: f32,
    span_y: f32,
) -> HandFrame {
    use hand_skeleton::{HandPoint, LANDMARK_COUNT, WRIST};

    // mirror to selfie orientation, device y-up → image y-down
    let norm = |p| {
        HandPoint::new(
            0.5 - p.x / span_x,
            1.0 - (p.y - min_y) / span_y,
            p.z / span_x,
        )
    };

    let mut points = [HandPoint::default(); LANDMARK_COUNT];
    // The palm centre stands in for the wrist landmark; it anchors drags
    // just as well and LeapC reports it directly.
    points[WRIST] = norm(hand.palm().position());

    for (d, digit) in hand.digits().take(5).enumerate() {
        let base = 1 + d * 4; // thumb CMC / finger MCP slot
        points[base] = norm(digit.proximal().prev_joint());
        points[base + 1] = norm(digit.intermediate().prev_joint());
        points[base + 2] = norm(digit.distal().prev_joint());
        points[base + 3] = norm(digit.distal().next_joint());
    }

    let handedness = match hand.hand_type() {
        leaprs::HandType::Left => Handedness::Left,
        leaprs::HandType::Right => Handedness::Right,
    };
    HandFrame::new(points, handedness)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_skeleton::{classify, ClassifierConfig};

    fn collect_batches(inputs: Vec<SimInput>) -> Vec<HandBatch> {
        let (in_tx, in_rx) = mpsc::channel();
        for i in inputs {
            in_tx.send(i).unwrap();
        }
        in_tx.send(SimInput::Quit).unwrap();
        let rx = spawn_frame_source(SimFrameSource { rx: in_rx });
        rx.iter().collect()
    }

    #[test]
    fn sim_pose_becomes_one_batch() {
        let batches = collect_batches(vec![SimInput::Pose {
            x: 0.4,
            y: 0.6,
            shape: SimShape::Pinch,
        }]);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].hands.len(), 1);
        let flags = classify(&batches[0].hands[0], &ClassifierConfig::default());
        assert!(flags.pinching);
    }

    #[test]
    fn sim_erase_combo_emits_tagged_pair() {
        let batches = collect_batches(vec![SimInput::Pose {
            x: 0.7,
            y: 0.3,
            shape: SimShape::EraseCombo,
        }]);
        let hands = &batches[0].hands;
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].handedness, Handedness::Left);
        assert_eq!(hands[1].handedness, Handedness::Right);
        let cfg = ClassifierConfig::default();
        assert!(classify(&hands[0], &cfg).fist);
        assert!(classify(&hands[1], &cfg).pointing);
    }

    #[test]
    fn sim_hidden_emits_empty_batch() {
        let batches = collect_batches(vec![SimInput::Pose {
            x: 0.5,
            y: 0.5,
            shape: SimShape::Hidden,
        }]);
        assert_eq!(batches.len(), 1);
        assert!(batches[0].hands.is_empty());
    }

    #[test]
    fn timestamps_are_monotonic() {
        let batches = collect_batches(
            (0..5)
                .map(|i| SimInput::Pose {
                    x: 0.1 * i as f32,
                    y: 0.5,
                    shape: SimShape::Open,
                })
                .collect(),
        );
        assert_eq!(batches.len(), 5);
        for pair in batches.windows(2) {
            assert!(pair[0].timestamp_ms <= pair[1].timestamp_ms);
        }
    }

    #[test]
    fn quit_ends_the_stream() {
        let batches = collect_batches(vec![]);
        assert!(batches.is_empty());
    }
}
