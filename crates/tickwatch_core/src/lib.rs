//! Monotonic stopwatch with a caller-selected scalar precision.
//!
//! ```
//! use tickwatch_core::Stopwatch;
//!
//! let mut watch: Stopwatch = Stopwatch::new();
//! watch.start();
//! watch.stop();
//! assert!(watch.elapsed_time() >= 0.0);
//! ```

pub mod clock;
pub mod error;
pub mod scalar;
pub mod stopwatch;

pub use crate::clock::{ClockInstant, ManualClock, MonotonicClock, SystemClock};
pub use crate::error::StopwatchError;
pub use crate::scalar::Scalar;
pub use crate::stopwatch::Stopwatch;
