use thiserror::Error;

/// Misuse reported by [`Stopwatch::try_elapsed_time`](crate::Stopwatch::try_elapsed_time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StopwatchError {
    #[error("stopwatch was never started")]
    NotStarted,

    #[error("stopwatch was never stopped")]
    NotStopped,

    #[error("stop instant precedes start instant by {by_nanos}ns")]
    StopBeforeStart { by_nanos: i128 },
}
