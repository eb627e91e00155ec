//! Per-slot request tokens.
//!
//! Each UI slot has a generation counter. Issuing a request bumps the
//! counter and hands out a token; when the result comes back it is only
//! applied if its token still matches the slot's latest generation.

/// A UI region whose content is produced by one kind of request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Shifts,
    Upload,
    Logs,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Shifts, Slot::Upload, Slot::Logs];

    fn index(self) -> usize {
        match self {
            Slot::Shifts => 0,
            Slot::Upload => 1,
            Slot::Logs => 2,
        }
    }
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub slot: Slot,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: [u64; 3],
    pending: [bool; 3],
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request for `slot`, superseding any earlier one
    pub fn issue(&mut self, slot: Slot) -> RequestToken {
        let i = slot.index();
        self.issued[i] = self.issued[i].wrapping_add(1);
        self.pending[i] = true;
        RequestToken {
            slot,
            generation: self.issued[i],
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.issued[token.slot.index()] == token.generation
    }

    /// Mark `token` finished. Returns false for a stale token, whose result
    /// should be dropped.
    pub fn complete(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.pending[token.slot.index()] = false;
        true
    }

    /// Invalidate every outstanding request so late results are dropped
    pub fn cancel_all(&mut self) {
        for slot in Slot::ALL {
            let i = slot.index();
            self.issued[i] = self.issued[i].wrapping_add(1);
            self.pending[i] = false;
        }
    }

    /// Whether the latest request for `slot` has not completed yet
    pub fn in_flight(&self, slot: Slot) -> bool {
        self.pending[slot.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_token_is_current() {
        let mut tracker = RequestTracker::new();
        let token = tracker.issue(Slot::Shifts);
        assert!(tracker.is_current(token));
        assert!(tracker.in_flight(Slot::Shifts));
        assert!(tracker.complete(token));
        assert!(!tracker.in_flight(Slot::Shifts));
    }

    #[test]
    fn test_superseded_token_is_stale() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue(Slot::Logs);
        let second = tracker.issue(Slot::Logs);

        assert!(!tracker.is_current(first));
        assert!(!tracker.complete(first));
        // The stale completion must not clear the newer request
        assert!(tracker.in_flight(Slot::Logs));
        assert!(tracker.complete(second));
    }

    #[test]
    fn test_slots_are_independent() {
        let mut tracker = RequestTracker::new();
        let shifts = tracker.issue(Slot::Shifts);
        let _upload = tracker.issue(Slot::Upload);
        assert!(tracker.is_current(shifts));
        assert!(!tracker.in_flight(Slot::Logs));
    }

    #[test]
    fn test_cancel_all_invalidates_outstanding() {
        let mut tracker = RequestTracker::new();
        let shifts = tracker.issue(Slot::Shifts);
        let logs = tracker.issue(Slot::Logs);
        tracker.cancel_all();

        assert!(!tracker.complete(shifts));
        assert!(!tracker.complete(logs));
        assert!(Slot::ALL.iter().all(|slot| !tracker.in_flight(*slot)));
    }

    #[test]
    fn test_completed_token_stays_current_until_reissue() {
        let mut tracker = RequestTracker::new();
        let token = tracker.issue(Slot::Upload);
        assert!(tracker.complete(token));
        assert!(tracker.is_current(token));
        tracker.issue(Slot::Upload);
        assert!(!tracker.is_current(token));
    }
}
