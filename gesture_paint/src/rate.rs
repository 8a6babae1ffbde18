//! Per-action cooldown gating.
//!
//! Each rate-limited action keeps one last-fire timestamp. Time is supplied
//! by the caller as monotonic milliseconds (the detector stamps every
//! frame), so tests drive synthetic clocks instead of real elapsed time.

// ════════════════════════════════════════════════════════════════════════════
// ActionKind / Cooldowns
// ════════════════════════════════════════════════════════════════════════════

/// The rate-limited actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Place,
    Erase,
    Clear,
}

/// Minimum interval per action, in milliseconds. Erase is deliberately
/// coarser than place; clear is a destructive one-shot that should require
/// a deliberate hold.
#[derive(Clone, Copy, Debug)]
pub struct Cooldowns {
    pub place_ms: u64,
    pub erase_ms: u64,
    pub clear_ms: u64,
}

impl Default for Cooldowns {
    fn default() -> Self {
        Cooldowns {
            place_ms: 35,
            erase_ms: 50,
            clear_ms: 900,
        }
    }
}

impl Cooldowns {
    fn interval(&self, action: ActionKind) -> u64 {
        match action {
            ActionKind::Place => self.place_ms,
            ActionKind::Erase => self.erase_ms,
            ActionKind::Clear => self.clear_ms,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RateGate
// ════════════════════════════════════════════════════════════════════════════

/// One last-fire timestamp per action. The gate never blocks; it answers
/// "may this action fire now" and records the fire when it says yes.
#[derive(Clone, Debug)]
pub struct RateGate {
    cooldowns: Cooldowns,
    last_place: Option<u64>,
    last_erase: Option<u64>,
    last_clear: Option<u64>,
}

impl RateGate {
    pub fn new(cooldowns: Cooldowns) -> Self {
        RateGate {
            cooldowns,
            last_place: None,
            last_erase: None,
            last_clear: None,
        }
    }

    fn slot(&mut self, action: ActionKind) -> &mut Option<u64> {
        match action {
            ActionKind::Place => &mut self.last_place,
            ActionKind::Erase => &mut self.last_erase,
            ActionKind::Clear => &mut self.last_clear,
        }
    }

    /// Fire iff the action has never fired or at least its interval has
    /// passed since the last fire. On a denied fire the stored timestamp is
    /// left untouched.
    pub fn try_fire(&mut self, action: ActionKind, now_ms: u64) -> bool {
        let interval = self.cooldowns.interval(action);
        let slot = self.slot(action);
        let allowed = match *slot {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= interval,
        };
        if allowed {
            *slot = Some(now_ms);
        }
        allowed
    }

    /// Forget all fire history (session teardown).
    pub fn reset(&mut self) {
        self.last_place = None;
        self.last_erase = None;
        self.last_clear = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> RateGate {
        RateGate::new(Cooldowns::default())
    }

    #[test]
    fn first_fire_always_allowed() {
        let mut g = gate();
        assert!(g.try_fire(ActionKind::Place, 0));
        assert!(g.try_fire(ActionKind::Erase, 0));
        assert!(g.try_fire(ActionKind::Clear, 0));
    }

    #[test]
    fn fires_within_interval_are_denied() {
        let mut g = gate();
        assert!(g.try_fire(ActionKind::Place, 1_000));
        assert!(!g.try_fire(ActionKind::Place, 1_034));
        assert!(g.try_fire(ActionKind::Place, 1_035));
    }

    #[test]
    fn denied_fire_leaves_timestamp_untouched() {
        let mut g = gate();
        assert!(g.try_fire(ActionKind::Erase, 1_000));
        assert!(!g.try_fire(ActionKind::Erase, 1_040));
        // Still measured from 1000, not 1040.
        assert!(g.try_fire(ActionKind::Erase, 1_050));
    }

    #[test]
    fn actions_cool_down_independently() {
        let mut g = gate();
        assert!(g.try_fire(ActionKind::Place, 1_000));
        assert!(g.try_fire(ActionKind::Erase, 1_000));
        assert!(!g.try_fire(ActionKind::Place, 1_010));
        assert!(g.try_fire(ActionKind::Place, 1_100));
        assert!(!g.try_fire(ActionKind::Erase, 1_040));
    }

    #[test]
    fn clear_requires_long_hold() {
        let mut g = gate();
        assert!(g.try_fire(ActionKind::Clear, 0));
        assert!(!g.try_fire(ActionKind::Clear, 899));
        assert!(g.try_fire(ActionKind::Clear, 900));
    }

    #[test]
    fn reset_forgets_history() {
        let mut g = gate();
        assert!(g.try_fire(ActionKind::Place, 1_000));
        g.reset();
        assert!(g.try_fire(ActionKind::Place, 1_001));
    }
}
