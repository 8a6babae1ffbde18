//! Synthetic hand skeletons.
//!
//! Builders for geometrically plausible 21-point frames that satisfy a
//! chosen gesture predicate set. Simulation mode uses them to turn mouse
//! position + held key into detector-shaped input, so the real classifier
//! runs end-to-end without a camera; tests use them as fixtures.
//!
//! Every builder takes the normalized position the gesture acts at: the
//! index fingertip for [`pinch_hand`], [`point_hand`] and [`ok_hand`], the
//! wrist (the drag anchor) for [`fist_hand`], the palm centre for
//! [`open_hand`]. Handedness defaults to `Unknown`; retag with
//! [`HandFrame::tagged`].

use crate::{
    HandFrame, HandPoint, Handedness, INDEX_MCP, LANDMARK_COUNT, THUMB_CMC, THUMB_IP, THUMB_MCP,
    THUMB_TIP, WRIST,
};

#[derive(Clone, Copy)]
enum Curl {
    Extended,
    Curled,
}

/// Lay out one finger column (MCP, PIP, DIP, TIP are consecutive indices).
/// Extended tips rise well above the PIP; curled tips fold just below it.
fn lay_finger(points: &mut [HandPoint; LANDMARK_COUNT], mcp: usize, x: f32, mcp_y: f32, curl: Curl) {
    let ys = match curl {
        Curl::Extended => [mcp_y, mcp_y - 0.040, mcp_y - 0.070, mcp_y - 0.100],
        Curl::Curled => [mcp_y, mcp_y - 0.030, mcp_y - 0.010, mcp_y + 0.010],
    };
    for (step, &y) in ys.iter().enumerate() {
        points[mcp + step] = HandPoint::new(x, y, 0.0);
    }
}

fn lay_thumb(points: &mut [HandPoint; LANDMARK_COUNT], cmc: HandPoint, mcp: HandPoint, ip: HandPoint, tip: HandPoint) {
    points[THUMB_CMC] = cmc;
    points[THUMB_MCP] = mcp;
    points[THUMB_IP] = ip;
    points[THUMB_TIP] = tip;
}

fn blank() -> [HandPoint; LANDMARK_COUNT] {
    [HandPoint::default(); LANDMARK_COUNT]
}

/// Relaxed open hand centred on `(cx, cy)`: all fingers extended, thumb out
/// to the side. Satisfies no predicate — the idle "hand present" shape.
pub fn open_hand(cx: f32, cy: f32) -> HandFrame {
    let mut p = blank();
    p[WRIST] = HandPoint::new(cx, cy + 0.16, 0.0);
    lay_finger(&mut p, INDEX_MCP, cx - 0.03, cy + 0.08, Curl::Extended);
    lay_finger(&mut p, crate::MIDDLE_MCP, cx, cy + 0.08, Curl::Extended);
    lay_finger(&mut p, crate::RING_MCP, cx + 0.03, cy + 0.08, Curl::Extended);
    lay_finger(&mut p, crate::PINKY_MCP, cx + 0.06, cy + 0.09, Curl::Extended);
    lay_thumb(
        &mut p,
        HandPoint::new(cx - 0.07, cy + 0.13, 0.0),
        HandPoint::new(cx - 0.09, cy + 0.10, 0.0),
        HandPoint::new(cx - 0.10, cy + 0.07, 0.0),
        HandPoint::new(cx - 0.11, cy + 0.04, 0.0),
    );
    HandFrame::new(p, Handedness::Unknown)
}

/// Draw-pinch with the pinched tips at `(cx, cy)`. Index stays extended (so
/// this is never a fist) and the middle finger stays extended while ring and
/// pinky curl, which rules out both `pointing` and `ok_sign`.
pub fn pinch_hand(cx: f32, cy: f32) -> HandFrame {
    let mut p = blank();
    p[WRIST] = HandPoint::new(cx + 0.01, cy + 0.18, 0.0);
    lay_finger(&mut p, INDEX_MCP, cx - 0.01, cy + 0.10, Curl::Extended);
    lay_finger(&mut p, crate::MIDDLE_MCP, cx + 0.02, cy + 0.10, Curl::Extended);
    lay_finger(&mut p, crate::RING_MCP, cx + 0.05, cy + 0.10, Curl::Curled);
    lay_finger(&mut p, crate::PINKY_MCP, cx + 0.08, cy + 0.11, Curl::Curled);
    // Bring the index tip to the pinch point.
    p[crate::INDEX_DIP] = HandPoint::new(cx - 0.002, cy + 0.030, 0.0);
    p[crate::INDEX_TIP] = HandPoint::new(cx, cy, 0.0);
    lay_thumb(
        &mut p,
        HandPoint::new(cx - 0.06, cy + 0.13, 0.0),
        HandPoint::new(cx - 0.05, cy + 0.09, 0.0),
        HandPoint::new(cx - 0.03, cy + 0.04, 0.0),
        HandPoint::new(cx + 0.002, cy + 0.002, 0.0),
    );
    HandFrame::new(p, Handedness::Unknown)
}

/// Closed fist with the wrist (drag anchor) at `(cx, cy)`: all four fingers
/// curled over MCPs above the wrist, thumb tucked alongside the palm. The
/// thumb tip is kept outside the pinch radius of the index tip.
pub fn fist_hand(cx: f32, cy: f32) -> HandFrame {
    let mut p = blank();
    p[WRIST] = HandPoint::new(cx, cy, 0.0);
    lay_finger(&mut p, INDEX_MCP, cx - 0.03, cy - 0.08, Curl::Curled);
    lay_finger(&mut p, crate::MIDDLE_MCP, cx, cy - 0.08, Curl::Curled);
    lay_finger(&mut p, crate::RING_MCP, cx + 0.03, cy - 0.08, Curl::Curled);
    lay_finger(&mut p, crate::PINKY_MCP, cx + 0.06, cy - 0.07, Curl::Curled);
    lay_thumb(
        &mut p,
        HandPoint::new(cx - 0.06, cy - 0.01, 0.0),
        HandPoint::new(cx - 0.08, cy - 0.02, 0.0),
        HandPoint::new(cx - 0.09, cy - 0.03, 0.0),
        HandPoint::new(cx - 0.085, cy - 0.045, 0.0),
    );
    HandFrame::new(p, Handedness::Unknown)
}

/// Index finger pointing with its tip at `(cx, cy)`; other fingers curled,
/// thumb away from the index tip so no pinch registers.
pub fn point_hand(cx: f32, cy: f32) -> HandFrame {
    let mut p = blank();
    p[WRIST] = HandPoint::new(cx + 0.02, cy + 0.18, 0.0);
    lay_finger(&mut p, INDEX_MCP, cx, cy + 0.10, Curl::Extended);
    p[crate::INDEX_TIP] = HandPoint::new(cx, cy, 0.0);
    lay_finger(&mut p, crate::MIDDLE_MCP, cx + 0.03, cy + 0.11, Curl::Curled);
    lay_finger(&mut p, crate::RING_MCP, cx + 0.06, cy + 0.11, Curl::Curled);
    lay_finger(&mut p, crate::PINKY_MCP, cx + 0.08, cy + 0.12, Curl::Curled);
    lay_thumb(
        &mut p,
        HandPoint::new(cx - 0.04, cy + 0.15, 0.0),
        HandPoint::new(cx - 0.05, cy + 0.12, 0.0),
        HandPoint::new(cx - 0.06, cy + 0.10, 0.0),
        HandPoint::new(cx - 0.07, cy + 0.08, 0.0),
    );
    HandFrame::new(p, Handedness::Unknown)
}

/// "OK" sign with the pinched tips at `(cx, cy)` and middle, ring and pinky
/// all extended.
pub fn ok_hand(cx: f32, cy: f32) -> HandFrame {
    let mut p = blank();
    p[WRIST] = HandPoint::new(cx + 0.02, cy + 0.18, 0.0);
    lay_finger(&mut p, INDEX_MCP, cx - 0.01, cy + 0.10, Curl::Extended);
    p[crate::INDEX_DIP] = HandPoint::new(cx - 0.002, cy + 0.030, 0.0);
    p[crate::INDEX_TIP] = HandPoint::new(cx, cy, 0.0);
    lay_finger(&mut p, crate::MIDDLE_MCP, cx + 0.02, cy + 0.09, Curl::Extended);
    lay_finger(&mut p, crate::RING_MCP, cx + 0.05, cy + 0.09, Curl::Extended);
    lay_finger(&mut p, crate::PINKY_MCP, cx + 0.08, cy + 0.10, Curl::Extended);
    lay_thumb(
        &mut p,
        HandPoint::new(cx - 0.06, cy + 0.13, 0.0),
        HandPoint::new(cx - 0.05, cy + 0.09, 0.0),
        HandPoint::new(cx - 0.03, cy + 0.04, 0.0),
        HandPoint::new(cx + 0.002, cy + 0.002, 0.0),
    );
    HandFrame::new(p, Handedness::Unknown)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, ClassifierConfig};
    use crate::INDEX_TIP;

    fn flags(frame: &HandFrame) -> (bool, bool, bool, bool) {
        let f = classify(frame, &ClassifierConfig::default());
        (f.pinching, f.fist, f.pointing, f.ok_sign)
    }

    #[test]
    fn builders_hit_their_target_predicates() {
        assert_eq!(flags(&open_hand(0.5, 0.5)), (false, false, false, false));
        assert_eq!(flags(&pinch_hand(0.5, 0.5)), (true, false, false, false));
        assert_eq!(flags(&point_hand(0.5, 0.5)), (false, false, true, false));
        assert_eq!(flags(&ok_hand(0.5, 0.5)), (true, false, false, true));
        let (pinch, fist, pointing, ok) = flags(&fist_hand(0.5, 0.5));
        assert!(fist && !pointing && !ok && !pinch);
    }

    #[test]
    fn builders_hold_away_from_centre() {
        // Predicates are relative, so translation must not break them.
        for (cx, cy) in [(0.05, 0.05), (0.95, 0.1), (0.2, 0.9), (0.8, 0.85)] {
            assert!(flags(&pinch_hand(cx, cy)).0, "pinch at ({cx},{cy})");
            assert!(flags(&fist_hand(cx, cy)).1, "fist at ({cx},{cy})");
            assert!(flags(&point_hand(cx, cy)).2, "point at ({cx},{cy})");
            assert!(flags(&ok_hand(cx, cy)).3, "ok at ({cx},{cy})");
        }
    }

    #[test]
    fn action_point_lands_on_index_tip() {
        let frame = pinch_hand(0.31, 0.62);
        assert!((frame.points[INDEX_TIP].x - 0.31).abs() < 1e-6);
        assert!((frame.points[INDEX_TIP].y - 0.62).abs() < 1e-6);
        let frame = fist_hand(0.4, 0.7);
        assert!((frame.palm().x - 0.4).abs() < 1e-6);
        assert!((frame.palm().y - 0.7).abs() < 1e-6);
    }

    #[test]
    fn builders_are_well_formed() {
        assert!(open_hand(0.5, 0.5).is_well_formed());
        assert!(fist_hand(0.0, 0.0).is_well_formed());
        assert!(ok_hand(1.0, 1.0).is_well_formed());
    }
}
