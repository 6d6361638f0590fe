use std::fmt::{Debug, Display};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Numeric type a [`Stopwatch`](crate::Stopwatch) reports seconds in.
pub trait Scalar: Copy + PartialOrd + Debug + Display {
    const ZERO: Self;

    /// Converts a signed nanosecond count to fractional seconds.
    fn from_nanos(nanos: i128) -> Self;

    fn to_f64(self) -> f64;
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;

    fn from_nanos(nanos: i128) -> Self {
        nanos as f64 / NANOS_PER_SEC
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;

    fn from_nanos(nanos: i128) -> Self {
        // divide in f64 first, f32 loses sub-microsecond detail past ~16ms
        f64::from_nanos(nanos) as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}
