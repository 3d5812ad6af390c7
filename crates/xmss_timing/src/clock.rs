use std::time::{Duration, Instant};

/// Monotonic time source. `now` returns the offset from an arbitrary
/// fixed origin and never goes backwards.
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

pub fn elapsed_ms(start: Duration, stop: Duration) -> f64 {
    let elapsed = stop.saturating_sub(start);
    elapsed.as_secs() as f64 * 1e3 + f64::from(elapsed.subsec_nanos()) / 1e6
}

pub fn measure_time<C, T, F>(clock: &C, operation: F) -> (T, f64)
where
    C: Clock + ?Sized,
    F: FnOnce() -> T,
{
    let start = clock.now();
    let value = operation();
    let stop = clock.now();
    (value, elapsed_ms(start, stop))
}
