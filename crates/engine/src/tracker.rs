//! Per-address balance state machine.

use std::collections::HashMap;
use tracing::debug;
use watcher_core::{Balance, BalanceDelta};
use watcher_feeds::FetchResult;

/// Last observed balance of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceState {
    /// No successful fetch since the process started.
    #[default]
    Unknown,
    Known(Balance),
}

/// Direction of a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// A detected transition between two different balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    pub old: Balance,
    pub new: Balance,
    /// `new - old` in base units.
    pub delta: BalanceDelta,
    pub direction: Direction,
}

impl BalanceChange {
    /// Returns None when the balances are equal.
    pub fn between(old: Balance, new: Balance) -> Option<Self> {
        let delta = new - old;
        let direction = if delta.is_positive() {
            Direction::Increase
        } else if delta.is_negative() {
            Direction::Decrease
        } else {
            return None;
        };
        Some(Self {
            old,
            new,
            delta,
            direction,
        })
    }
}

/// What the tracker decided for one fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Fetch failed; state left untouched.
    Skipped,
    /// First successful fetch; recorded silently.
    Baseline(Balance),
    Unchanged(Balance),
    /// Balance moved; the only outcome that should be notified.
    Changed(BalanceChange),
}

impl Observation {
    pub fn change(&self) -> Option<&BalanceChange> {
        match self {
            Observation::Changed(change) => Some(change),
            _ => None,
        }
    }
}

/// Owns the address -> last balance mapping for the lifetime of the monitor.
#[derive(Debug, Default)]
pub struct BalanceTracker {
    states: HashMap<String, BalanceState>,
}

impl BalanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with every given address in the `Unknown` state.
    pub fn with_addresses<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let states = addresses
            .into_iter()
            .map(|address| (address.into(), BalanceState::Unknown))
            .collect();
        Self { states }
    }

    /// Current state of an address. Untracked addresses are `Unknown`.
    pub fn state(&self, address: &str) -> BalanceState {
        self.states.get(address).copied().unwrap_or_default()
    }

    /// Number of tracked addresses.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of addresses with an established baseline.
    pub fn known_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| matches!(s, BalanceState::Known(_)))
            .count()
    }

    /// Apply one fetch result to an address and report what happened.
    pub fn observe(&mut self, address: &str, result: FetchResult) -> Observation {
        let FetchResult::Value(new) = result else {
            // A failed fetch never touches recorded state (and never creates an entry).
            return Observation::Skipped;
        };

        let slot = self.states.entry(address.to_string()).or_default();
        let previous = std::mem::replace(slot, BalanceState::Known(new));

        match previous {
            BalanceState::Unknown => {
                debug!(address = address, balance = %new, "Baseline recorded");
                Observation::Baseline(new)
            }
            BalanceState::Known(old) => match BalanceChange::between(old, new) {
                Some(change) => Observation::Changed(change),
                None => Observation::Unchanged(new),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const A: &str = "0xaa";
    const B: &str = "0xbb";

    fn sui(units: u64) -> FetchResult {
        FetchResult::Value(Balance(units))
    }

    #[test]
    fn test_unknown_failed_stays_unknown() {
        let mut tracker = BalanceTracker::with_addresses([A]);
        assert_eq!(tracker.observe(A, FetchResult::Failed), Observation::Skipped);
        assert_eq!(tracker.state(A), BalanceState::Unknown);
    }

    #[test]
    fn test_never_fetched_is_silent() {
        let mut tracker = BalanceTracker::with_addresses([A]);
        for _ in 0..10 {
            let obs = tracker.observe(A, FetchResult::Failed);
            assert!(obs.change().is_none());
        }
        assert_eq!(tracker.known_count(), 0);
    }

    #[test]
    fn test_first_value_is_silent_baseline() {
        let mut tracker = BalanceTracker::new();
        let obs = tracker.observe(A, sui(10_000_000_000));
        assert_eq!(obs, Observation::Baseline(Balance(10_000_000_000)));
        assert!(obs.change().is_none());
        assert_eq!(tracker.state(A), BalanceState::Known(Balance(10_000_000_000)));
    }

    #[test]
    fn test_zero_balance_is_known() {
        let mut tracker = BalanceTracker::with_addresses([A]);
        assert_eq!(tracker.observe(A, sui(0)), Observation::Baseline(Balance::ZERO));
        assert_eq!(tracker.state(A), BalanceState::Known(Balance::ZERO));

        // A later deposit onto a zero balance is a change, not a second baseline.
        let obs = tracker.observe(A, sui(1_000_000_000));
        assert_eq!(obs.change().map(|c| c.direction), Some(Direction::Increase));
    }

    #[test]
    fn test_failure_before_baseline_then_success() {
        let mut tracker = BalanceTracker::with_addresses([A]);
        tracker.observe(A, FetchResult::Failed);
        assert_eq!(
            tracker.observe(A, sui(5)),
            Observation::Baseline(Balance(5))
        );
    }

    #[test]
    fn test_known_failed_retains_value() {
        let mut tracker = BalanceTracker::new();
        tracker.observe(A, sui(10_000_000_000));
        assert_eq!(tracker.observe(A, FetchResult::Failed), Observation::Skipped);
        assert_eq!(tracker.state(A), BalanceState::Known(Balance(10_000_000_000)));
    }

    #[test]
    fn test_equal_values_unchanged() {
        let mut tracker = BalanceTracker::new();
        tracker.observe(A, sui(7));
        assert_eq!(tracker.observe(A, sui(7)), Observation::Unchanged(Balance(7)));
        assert_eq!(tracker.observe(A, sui(7)), Observation::Unchanged(Balance(7)));
    }

    #[test]
    fn test_increase_then_decrease() {
        let mut tracker = BalanceTracker::new();
        tracker.observe(A, sui(10_000_000_000));
        tracker.observe(A, FetchResult::Failed);

        let up = tracker.observe(A, sui(12_500_000_000));
        let change = up.change().copied().unwrap();
        assert_eq!(change.old, Balance(10_000_000_000));
        assert_eq!(change.new, Balance(12_500_000_000));
        assert_eq!(change.delta, BalanceDelta(2_500_000_000));
        assert_eq!(change.direction, Direction::Increase);
        assert_eq!(change.delta.to_string(), "+2.500000");

        let down = tracker.observe(A, sui(12_000_000_000));
        let change = down.change().copied().unwrap();
        assert_eq!(change.delta, BalanceDelta(-500_000_000));
        assert_eq!(change.direction, Direction::Decrease);
        assert_eq!(tracker.state(A), BalanceState::Known(Balance(12_000_000_000)));
    }

    #[test]
    fn test_single_base_unit_change_detected() {
        let mut tracker = BalanceTracker::new();
        tracker.observe(A, sui(1_000_000_000));
        let obs = tracker.observe(A, sui(1_000_000_001));
        assert_eq!(obs.change().map(|c| c.delta), Some(BalanceDelta(1)));
    }

    #[test]
    fn test_addresses_are_independent() {
        let mut tracker = BalanceTracker::with_addresses([A, B]);
        tracker.observe(A, sui(1));
        tracker.observe(B, FetchResult::Failed);
        assert_eq!(tracker.state(A), BalanceState::Known(Balance(1)));
        assert_eq!(tracker.state(B), BalanceState::Unknown);
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.known_count(), 1);
    }

    #[test]
    fn test_failed_fetch_on_untracked_address_adds_no_entry() {
        let mut tracker = BalanceTracker::new();
        tracker.observe(A, FetchResult::Failed);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_change_count_matches_transitions() {
        // Sequence of fetches: failures interleaved with values.
        let sequence = [
            FetchResult::Failed,
            sui(3),
            sui(3),
            FetchResult::Failed,
            sui(4),
            sui(4),
            sui(2),
            FetchResult::Failed,
            sui(2),
            sui(9),
        ];
        let mut tracker = BalanceTracker::new();
        let changes: Vec<BalanceChange> = sequence
            .iter()
            .filter_map(|r| tracker.observe(A, *r).change().copied())
            .collect();

        let deltas: Vec<i128> = changes.iter().map(|c| c.delta.0).collect();
        assert_eq!(deltas, vec![1, -2, 7]);
        for change in &changes {
            assert_eq!(change.new - change.old, change.delta);
        }
    }

    #[test]
    fn test_balance_change_between_equal_is_none() {
        assert!(BalanceChange::between(Balance(5), Balance(5)).is_none());
    }
}
