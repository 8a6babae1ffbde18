//! Frame-local gesture classification.
//!
//! Every predicate looks at exactly one [`HandFrame`] — no temporal
//! smoothing, no memory. All tests are relative y/x comparisons or a single
//! planar distance, which keeps them resolution-independent (inputs are
//! pre-normalized to `[0, 1]`) and tolerant of camera jitter.

use crate::{
    HandFrame, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP,
    RING_PIP, RING_TIP, THUMB_IP, THUMB_TIP,
};

// ════════════════════════════════════════════════════════════════════════════
// ClassifierConfig
// ════════════════════════════════════════════════════════════════════════════

/// Distance thresholds, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct ClassifierConfig {
    /// Maximum thumb-tip ↔ index-tip planar distance for a pinch.
    pub pinch_dist: f32,
    /// Maximum thumb-tip ↔ index-MCP distance for the "thumb alongside the
    /// palm" half of the fist test.
    pub thumb_tuck_dist: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            pinch_dist: 0.045,
            thumb_tuck_dist: 0.08,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureFlags
// ════════════════════════════════════════════════════════════════════════════

/// Per-hand gesture predicates for one frame.
///
/// `pinching` is evaluated from fingertip distance alone, so it can hold
/// together with `fist` (a tightly curled fist may bring the tips within the
/// pinch threshold) — consumers decide precedence. `fist` and `pointing`
/// are mutually exclusive by construction: they demand opposite index curls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureFlags {
    pub pinching: bool,
    pub fist: bool,
    pub pointing: bool,
    pub ok_sign: bool,
}

impl GestureFlags {
    pub const NONE: GestureFlags = GestureFlags {
        pinching: false,
        fist: false,
        pointing: false,
        ok_sign: false,
    };

    pub fn any(&self) -> bool {
        self.pinching || self.fist || self.pointing || self.ok_sign
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Predicates
// ════════════════════════════════════════════════════════════════════════════

/// Thumb tip and index tip close together.
pub fn is_pinch(frame: &HandFrame, cfg: &ClassifierConfig) -> bool {
    frame.points[THUMB_TIP].planar_dist(&frame.points[INDEX_TIP]) < cfg.pinch_dist
}

/// Extended fingers point "up" in image space: tip above (numerically less
/// than) the proximal-interphalangeal joint.
pub fn finger_extended(frame: &HandFrame, tip: usize, pip: usize) -> bool {
    frame.points[tip].y < frame.points[pip].y
}

fn finger_curled(frame: &HandFrame, tip: usize, pip: usize) -> bool {
    frame.points[tip].y > frame.points[pip].y
}

/// Index, middle, ring and pinky all curled, thumb tucked. The thumb counts
/// as tucked either across the palm (tip x past the IP joint) or alongside
/// it (tip within `thumb_tuck_dist` of the index MCP), so a fist registers
/// with either thumb placement.
pub fn is_fist(frame: &HandFrame, cfg: &ClassifierConfig) -> bool {
    let curled = finger_curled(frame, INDEX_TIP, INDEX_PIP)
        && finger_curled(frame, MIDDLE_TIP, MIDDLE_PIP)
        && finger_curled(frame, RING_TIP, RING_PIP)
        && finger_curled(frame, PINKY_TIP, PINKY_PIP);
    let thumb_tucked = frame.points[THUMB_TIP].x > frame.points[THUMB_IP].x
        || frame.points[THUMB_TIP].planar_dist(&frame.points[INDEX_MCP]) < cfg.thumb_tuck_dist;
    curled && thumb_tucked
}

/// Index extended, middle/ring/pinky curled. No thumb constraint.
pub fn is_pointing(frame: &HandFrame) -> bool {
    finger_extended(frame, INDEX_TIP, INDEX_PIP)
        && finger_curled(frame, MIDDLE_TIP, MIDDLE_PIP)
        && finger_curled(frame, RING_TIP, RING_PIP)
        && finger_curled(frame, PINKY_TIP, PINKY_PIP)
}

/// Pinch plus middle, ring and pinky extended — distinguishes a deliberate
/// "OK" from an ordinary draw-pinch, which has no extension requirement.
pub fn is_ok_sign(frame: &HandFrame, cfg: &ClassifierConfig) -> bool {
    is_pinch(frame, cfg)
        && finger_extended(frame, MIDDLE_TIP, MIDDLE_PIP)
        && finger_extended(frame, RING_TIP, RING_PIP)
        && finger_extended(frame, PINKY_TIP, PINKY_PIP)
}

/// Classify one hand. A malformed frame (any non-finite coordinate) yields
/// [`GestureFlags::NONE`] — a momentarily corrupt detector frame degrades to
/// inaction instead of faulting the session.
pub fn classify(frame: &HandFrame, cfg: &ClassifierConfig) -> GestureFlags {
    if !frame.is_well_formed() {
        return GestureFlags::NONE;
    }
    GestureFlags {
        pinching: is_pinch(frame, cfg),
        fist: is_fist(frame, cfg),
        pointing: is_pointing(frame),
        ok_sign: is_ok_sign(frame, cfg),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth;
    use crate::{INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, THUMB_IP, THUMB_TIP};

    const CFG: ClassifierConfig = ClassifierConfig {
        pinch_dist: 0.045,
        thumb_tuck_dist: 0.08,
    };

    #[test]
    fn open_hand_has_no_gestures() {
        let flags = classify(&synth::open_hand(0.5, 0.5), &CFG);
        assert_eq!(flags, GestureFlags::NONE);
    }

    #[test]
    fn pinch_hand_pinches_only() {
        let flags = classify(&synth::pinch_hand(0.5, 0.5), &CFG);
        assert!(flags.pinching);
        assert!(!flags.fist);
        assert!(!flags.pointing);
        assert!(!flags.ok_sign);
    }

    #[test]
    fn pinch_respects_threshold() {
        let mut frame = synth::open_hand(0.5, 0.5);
        let index = frame.points[INDEX_TIP];
        frame.points[THUMB_TIP].x = index.x + 0.044;
        frame.points[THUMB_TIP].y = index.y;
        assert!(is_pinch(&frame, &CFG));
        frame.points[THUMB_TIP].x = index.x + 0.046;
        assert!(!is_pinch(&frame, &CFG));
    }

    #[test]
    fn fist_hand_is_fist() {
        let flags = classify(&synth::fist_hand(0.5, 0.5), &CFG);
        assert!(flags.fist);
        assert!(!flags.pointing);
        assert!(!flags.ok_sign);
    }

    #[test]
    fn fist_requires_every_curl() {
        // Extending any one of the four fingers must break the fist.
        for (tip, pip) in [
            (INDEX_TIP, INDEX_PIP),
            (MIDDLE_TIP, MIDDLE_PIP),
            (crate::RING_TIP, crate::RING_PIP),
            (crate::PINKY_TIP, crate::PINKY_PIP),
        ] {
            let mut frame = synth::fist_hand(0.5, 0.5);
            frame.points[tip].y = frame.points[pip].y - 0.05;
            assert!(!is_fist(&frame, &CFG), "extended finger {} still fist", tip);
        }
    }

    #[test]
    fn fist_requires_thumb_tuck() {
        let mut frame = synth::fist_hand(0.5, 0.5);
        // Move the thumb tip left of the IP joint and far from the index MCP.
        frame.points[THUMB_TIP].x = frame.points[THUMB_IP].x - 0.02;
        frame.points[THUMB_TIP].y = frame.points[crate::INDEX_MCP].y - 0.2;
        assert!(!is_fist(&frame, &CFG));
    }

    #[test]
    fn fist_accepts_thumb_across_palm() {
        let mut frame = synth::fist_hand(0.5, 0.5);
        // Far from the index MCP, but x past the IP joint still counts.
        frame.points[THUMB_TIP].x = frame.points[THUMB_IP].x + 0.03;
        frame.points[THUMB_TIP].y = frame.points[crate::INDEX_MCP].y + 0.2;
        assert!(is_fist(&frame, &CFG));
    }

    #[test]
    fn point_hand_points_only() {
        let flags = classify(&synth::point_hand(0.5, 0.5), &CFG);
        assert!(flags.pointing);
        assert!(!flags.fist);
        assert!(!flags.pinching);
    }

    #[test]
    fn pointing_and_fist_are_disjoint() {
        // The two predicates demand opposite index curls, so no frame can
        // satisfy both.
        for frame in [
            synth::open_hand(0.3, 0.6),
            synth::pinch_hand(0.7, 0.2),
            synth::fist_hand(0.5, 0.5),
            synth::point_hand(0.4, 0.4),
            synth::ok_hand(0.6, 0.8),
        ] {
            let flags = classify(&frame, &CFG);
            assert!(!(flags.pointing && flags.fist));
        }
    }

    #[test]
    fn ok_hand_is_ok_and_pinch() {
        let flags = classify(&synth::ok_hand(0.5, 0.5), &CFG);
        assert!(flags.ok_sign);
        assert!(flags.pinching, "OK sign implies pinch");
        assert!(!flags.fist);
    }

    #[test]
    fn curling_a_finger_downgrades_ok_to_plain_pinch() {
        let mut frame = synth::ok_hand(0.5, 0.5);
        frame.points[MIDDLE_TIP].y = frame.points[MIDDLE_PIP].y + 0.04;
        let flags = classify(&frame, &CFG);
        assert!(flags.pinching);
        assert!(!flags.ok_sign);
    }

    #[test]
    fn malformed_frame_yields_no_flags() {
        let mut frame = synth::fist_hand(0.5, 0.5);
        frame.points[0].x = f32::NAN;
        assert_eq!(classify(&frame, &CFG), GestureFlags::NONE);

        let mut frame = synth::pinch_hand(0.5, 0.5);
        frame.points[INDEX_TIP].y = f32::INFINITY;
        assert_eq!(classify(&frame, &CFG), GestureFlags::NONE);
    }
}
