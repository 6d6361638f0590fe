//! Monotonic time sources and the instants they produce.

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

/// Anchor for [`SystemClock`] readings, captured on first use.
static PROCESS_ANCHOR: Lazy<Instant> = Lazy::new(Instant::now);

/// A point in time read from a [`MonotonicClock`].
///
/// Stored as signed nanoseconds relative to the clock's epoch, so the
/// default value, the reset sentinel and real readings share one
/// representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockInstant {
    nanos: i64,
}

impl ClockInstant {
    /// Zero point of the clock. Fresh stopwatches hold this value.
    pub const EPOCH: Self = Self { nanos: 0 };

    /// Smallest representable instant, used as the reset sentinel.
    pub const MIN: Self = Self { nanos: i64::MIN };

    /// Largest representable instant.
    pub const MAX: Self = Self { nanos: i64::MAX };

    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Signed distance from `earlier` to `self` in nanoseconds.
    ///
    /// Computed in 128 bits, so it is defined for every pair of instants,
    /// including `MIN` and `MAX`.
    pub const fn nanos_since(self, earlier: Self) -> i128 {
        self.nanos as i128 - earlier.nanos as i128
    }

    /// Instant `duration` after `self`, saturating at [`ClockInstant::MAX`].
    pub fn saturating_add(self, duration: Duration) -> Self {
        let delta = i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX);
        Self {
            nanos: self.nanos.saturating_add(delta),
        }
    }

    /// Instant `duration` before `self`, saturating at [`ClockInstant::MIN`].
    pub fn saturating_sub(self, duration: Duration) -> Self {
        let delta = i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX);
        Self {
            nanos: self.nanos.saturating_sub(delta),
        }
    }
}

impl fmt::Display for ClockInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MIN => write!(f, "min"),
            Self::MAX => write!(f, "max"),
            _ => write!(f, "{}ns", self.nanos),
        }
    }
}

/// A source of non-decreasing time readings.
pub trait MonotonicClock {
    /// Current reading of the clock.
    fn now(&self) -> ClockInstant;
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now(&self) -> ClockInstant {
        (**self).now()
    }
}

/// The host's monotonic clock, backed by [`std::time::Instant`].
///
/// Readings are offsets from a process-wide anchor taken the first time any
/// `SystemClock` is read. They are unrelated to calendar time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl MonotonicClock for SystemClock {
    fn now(&self) -> ClockInstant {
        let anchor = *PROCESS_ANCHOR;
        let offset = Instant::now().saturating_duration_since(anchor);
        ClockInstant::from_nanos(i64::try_from(offset.as_nanos()).unwrap_or(i64::MAX))
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle while a
/// stopwatch owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock whose current reading is `instant`.
    pub fn starting_at(instant: ClockInstant) -> Self {
        Self {
            nanos: Arc::new(AtomicI64::new(instant.as_nanos())),
        }
    }

    pub fn set(&self, instant: ClockInstant) {
        self.nanos.store(instant.as_nanos(), Ordering::Relaxed);
    }

    pub fn advance(&self, duration: Duration) {
        self.set(self.now().saturating_add(duration));
    }

    /// Moves the reading backwards. Real monotonic clocks never do this; it
    /// exists to build stop-before-start scenarios.
    pub fn rewind(&self, duration: Duration) {
        self.set(self.now().saturating_sub(duration));
    }
}

impl MonotonicClock for ManualClock {
    fn now(&self) -> ClockInstant {
        ClockInstant::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}
