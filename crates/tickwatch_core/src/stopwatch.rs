//! Start/stop stopwatch over a monotonic clock.

use std::marker::PhantomData;
use std::time::Duration;

use tracing::trace;

use crate::clock::{ClockInstant, MonotonicClock, SystemClock};
use crate::error::StopwatchError;
use crate::scalar::Scalar;

/// Records a start and a stop instant and reports the time between them in
/// seconds as `S`.
///
/// The two instants are independent: either may be taken any number of
/// times in any order, each call overwriting the previous reading. A fresh
/// stopwatch holds [`ClockInstant::EPOCH`] in both slots and
/// [`reset`](Stopwatch::reset) puts [`ClockInstant::MIN`] in both.
///
/// Not synchronised. Share across threads only behind a lock.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch<S = f64, C = SystemClock> {
    start: ClockInstant,
    stop: ClockInstant,
    started: bool,
    stopped: bool,
    clock: C,
    scalar: PhantomData<fn() -> S>,
}

impl<S: Scalar> Stopwatch<S> {
    /// A stopwatch reading the host monotonic clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<S: Scalar> Default for Stopwatch<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar, C: MonotonicClock> Stopwatch<S, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            start: ClockInstant::EPOCH,
            stop: ClockInstant::EPOCH,
            started: false,
            stopped: false,
            clock,
            scalar: PhantomData,
        }
    }

    /// Captures the current instant as the start, replacing any earlier one.
    ///
    /// Can be re-triggered without calling [`stop`](Self::stop) in between.
    pub fn start(&mut self) {
        self.start = self.clock.now();
        self.started = true;
        trace!(instant = %self.start, "stopwatch started");
    }

    /// Captures the current instant as the stop, replacing any earlier one.
    pub fn stop(&mut self) {
        self.stop = self.clock.now();
        self.stopped = true;
        trace!(instant = %self.stop, "stopwatch stopped");
    }

    /// Seconds from the start instant to the stop instant.
    ///
    /// Always defined. The result is negative when the stop instant comes
    /// first, and derives from the default or sentinel instants when
    /// [`start`](Self::start) or [`stop`](Self::stop) have not been called.
    pub fn elapsed_time(&self) -> S {
        S::from_nanos(self.elapsed_nanos())
    }

    /// Like [`elapsed_time`](Self::elapsed_time), but rejects readings that
    /// are not backed by a `start()` followed by a `stop()`.
    pub fn try_elapsed_time(&self) -> Result<S, StopwatchError> {
        if !self.started {
            return Err(StopwatchError::NotStarted);
        }
        if !self.stopped {
            return Err(StopwatchError::NotStopped);
        }
        let nanos = self.elapsed_nanos();
        if nanos < 0 {
            return Err(StopwatchError::StopBeforeStart { by_nanos: -nanos });
        }
        Ok(S::from_nanos(nanos))
    }

    /// Exact signed difference between the stop and start instants.
    pub fn elapsed_nanos(&self) -> i128 {
        self.stop.nanos_since(self.start)
    }

    /// The elapsed time as a [`Duration`], or `None` if it is negative.
    pub fn elapsed(&self) -> Option<Duration> {
        let nanos = u128::try_from(self.elapsed_nanos()).ok()?;
        let secs = u64::try_from(nanos / 1_000_000_000).ok()?;
        // remainder is always below one second
        let subsec = (nanos % 1_000_000_000) as u32;
        Some(Duration::new(secs, subsec))
    }

    /// Puts both instants at [`ClockInstant::MIN`].
    ///
    /// Not needed between measurements; `start()` and `stop()` overwrite
    /// their instants anyway.
    pub fn reset(&mut self) {
        self.start = ClockInstant::MIN;
        self.stop = ClockInstant::MIN;
        self.started = false;
        self.stopped = false;
        trace!("stopwatch reset");
    }

    /// Runs `f` between a `start()` and a `stop()`.
    pub fn measure<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.start();
        let output = f();
        self.stop();
        output
    }

    pub fn start_instant(&self) -> ClockInstant {
        self.start
    }

    pub fn stop_instant(&self) -> ClockInstant {
        self.stop
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
