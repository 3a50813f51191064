//! # Product Id Generation
//!
//! Product ids are time-derived: the wall clock in milliseconds, bumped by
//! one whenever two scans land in the same millisecond (or the clock steps
//! backwards). Ids handed out by one source are therefore strictly
//! increasing and never reused.
//!
//! ```text
//!   clock:   1700000000000  1700000000000  1699999999990  1700000000050
//!   id:      1700000000000  1700000000001  1700000000002  1700000000050
//!                           (same ms, +1)  (clock went back, +1)
//! ```

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::types::ProductId;

/// A source of fresh product ids.
pub trait IdSource {
    /// Returns an id that this source has never returned before.
    fn next_id(&mut self) -> CoreResult<ProductId>;
}

// =============================================================================
// Clock Id Source
// =============================================================================

/// Time-derived, strictly increasing ids.
#[derive(Debug, Clone)]
pub struct ClockIdSource {
    clock: fn() -> i64,
    last: Option<i64>,
}

fn utc_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl ClockIdSource {
    /// Creates a source backed by the UTC wall clock.
    pub fn new() -> Self {
        Self::with_clock(utc_millis)
    }

    /// Creates a source backed by a custom millisecond clock.
    pub fn with_clock(clock: fn() -> i64) -> Self {
        ClockIdSource { clock, last: None }
    }
}

impl Default for ClockIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for ClockIdSource {
    fn next_id(&mut self) -> CoreResult<ProductId> {
        let now = (self.clock)();
        if now <= 0 {
            return Err(CoreError::IdUnavailable {
                reason: format!("clock reads {now} ms, before the Unix epoch"),
            });
        }

        let next = match self.last {
            Some(last) if now <= last => last.checked_add(1).ok_or_else(|| {
                CoreError::IdUnavailable {
                    reason: "id space exhausted".to_string(),
                }
            })?,
            _ => now,
        };

        self.last = Some(next);
        Ok(ProductId::new(next))
    }
}

// =============================================================================
// Sequential Id Source
// =============================================================================

/// Plain counter; deterministic ids for tests and fixtures.
#[derive(Debug, Clone)]
pub struct SequentialIdSource {
    next: Option<i64>,
}

impl SequentialIdSource {
    /// Starts counting at `first`.
    pub fn starting_at(first: i64) -> Self {
        SequentialIdSource { next: Some(first) }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> CoreResult<ProductId> {
        let current = self.next.ok_or_else(|| CoreError::IdUnavailable {
            reason: "id space exhausted".to_string(),
        })?;
        self.next = current.checked_add(1);
        Ok(ProductId::new(current))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_source_uses_wall_clock() {
        let mut ids = ClockIdSource::new();
        let id = ids.next_id().unwrap();
        assert!(id.get() > 1_600_000_000_000);
    }

    #[test]
    fn test_clock_source_is_strictly_increasing_within_one_millisecond() {
        let mut ids = ClockIdSource::with_clock(|| 1_700_000_000_000);
        let a = ids.next_id().unwrap();
        let b = ids.next_id().unwrap();
        let c = ids.next_id().unwrap();
        assert_eq!(a.get(), 1_700_000_000_000);
        assert_eq!(b.get(), 1_700_000_000_001);
        assert_eq!(c.get(), 1_700_000_000_002);
    }

    #[test]
    fn test_clock_source_survives_clock_going_back() {
        use std::sync::atomic::{AtomicI64, Ordering};
        static NOW: AtomicI64 = AtomicI64::new(1_700_000_000_000);

        let mut ids = ClockIdSource::with_clock(|| NOW.load(Ordering::SeqCst));
        let first = ids.next_id().unwrap();
        NOW.store(1_699_999_999_000, Ordering::SeqCst);
        let second = ids.next_id().unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_clock_source_rejects_pre_epoch_clock() {
        let mut ids = ClockIdSource::with_clock(|| -5);
        let err = ids.next_id().unwrap_err();
        assert!(matches!(err, CoreError::IdUnavailable { .. }));
    }

    #[test]
    fn test_clock_source_overflow() {
        let mut ids = ClockIdSource::with_clock(|| i64::MAX);
        assert_eq!(ids.next_id().unwrap().get(), i64::MAX);
        assert!(ids.next_id().is_err());
    }

    #[test]
    fn test_sequential_source() {
        let mut ids = SequentialIdSource::starting_at(10);
        assert_eq!(ids.next_id().unwrap(), ProductId::new(10));
        assert_eq!(ids.next_id().unwrap(), ProductId::new(11));

        let mut ids = SequentialIdSource::starting_at(i64::MAX);
        assert!(ids.next_id().is_ok());
        assert!(ids.next_id().is_err());
    }
}
