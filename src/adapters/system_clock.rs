//! Wall-clock time source.

use crate::domain::formulas::epoch_seconds_now;
use crate::ports::clock_port::Clock;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        epoch_seconds_now()
    }
}
