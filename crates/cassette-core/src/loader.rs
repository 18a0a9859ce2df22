//! Load bookkeeping: per-slot outcomes and the all-settled barrier.

use crate::constants::SLOT_SPACING_Z;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Loaded,
    Failed,
}

/// Join point for a fixed number of independent loads.
///
/// Fires exactly once, when every slot has either loaded or failed. There is
/// no timeout: a load that never settles holds the barrier closed.
#[derive(Clone, Debug)]
pub struct LoadBarrier {
    slots: Vec<SlotState>,
    fired: bool,
}

impl LoadBarrier {
    pub fn new(expected: usize) -> Self {
        Self {
            slots: vec![SlotState::Pending; expected],
            fired: false,
        }
    }

    pub fn state(&self, slot: usize) -> Option<SlotState> {
        self.slots.get(slot).copied()
    }

    /// Record the outcome of `slot`. Returns `true` only on the call that
    /// settles the last pending slot. Repeat reports for a slot are ignored.
    pub fn record(&mut self, slot: usize, loaded: bool) -> bool {
        let Some(state) = self.slots.get_mut(slot) else {
            log::warn!("[loader] unknown slot {}", slot);
            return false;
        };
        if *state != SlotState::Pending {
            log::warn!("[loader] slot {} reported twice", slot);
            return false;
        }
        *state = if loaded {
            SlotState::Loaded
        } else {
            SlotState::Failed
        };
        self.try_fire()
    }

    /// Fire if everything has settled and the barrier has not fired yet.
    pub fn try_fire(&mut self) -> bool {
        if self.fired || self.pending() > 0 {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn pending(&self) -> usize {
        self.count(SlotState::Pending)
    }

    pub fn loaded(&self) -> usize {
        self.count(SlotState::Loaded)
    }

    pub fn failed(&self) -> usize {
        self.count(SlotState::Failed)
    }

    fn count(&self, state: SlotState) -> usize {
        self.slots.iter().filter(|s| **s == state).count()
    }
}

/// Resting position of the model in registry slot `slot`, in group space.
#[inline]
pub fn slot_position(slot: usize) -> Vec3 {
    Vec3::new(0.0, 0.0, slot as f32 * SLOT_SPACING_Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_mixed_outcomes() {
        let mut b = LoadBarrier::new(3);
        assert!(!b.record(2, true));
        assert!(!b.record(0, false));
        assert!(b.record(1, true));
        assert!(!b.try_fire());
        assert_eq!((b.loaded(), b.failed(), b.pending()), (2, 1, 0));
    }

    #[test]
    fn duplicate_and_unknown_reports_are_ignored() {
        let mut b = LoadBarrier::new(2);
        assert!(!b.record(0, true));
        assert!(!b.record(0, true));
        assert!(!b.record(7, true));
        assert_eq!(b.pending(), 1);
        assert!(b.record(1, false));
    }

    #[test]
    fn empty_barrier_fires_on_first_poll() {
        let mut b = LoadBarrier::new(0);
        assert!(b.try_fire());
        assert!(!b.try_fire());
    }
}
