//! Time source port trait.

/// Supplies "now" as fractional seconds since the Unix epoch.
pub trait Clock {
    fn now(&self) -> f64;
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}
