use tracing::debug;

use crate::error::{Result, RgbdError};

/// Slack when mapping a time onto a tick, in periods. Keeps `3 * 0.1`
/// and `0.3` on the same tick.
const TICK_TOLERANCE: f64 = 1e-9;

/// Latches an upstream value at `k * period` (k = 0, 1, ...) and holds it
/// until the next tick.
#[derive(Debug, Clone)]
pub struct ZeroOrderHold<T> {
    period: f64,
    value: T,
    last_tick: Option<u64>,
}

impl<T> ZeroOrderHold<T> {
    /// Create a hold stage that outputs `initial` until its first latch
    pub fn new(period: f64, initial: T) -> Result<Self> {
        if !(period > 0.0 && period.is_finite()) {
            return Err(RgbdError::InvalidPeriod(period));
        }
        Ok(Self {
            period,
            value: initial,
            last_tick: None,
        })
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// The held value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Index of the tick last latched, if any
    pub fn last_tick(&self) -> Option<u64> {
        self.last_tick
    }

    /// Index of the most recent tick at or before `time`. None before time zero.
    pub fn tick_index(&self, time: f64) -> Option<u64> {
        let ticks = (time / self.period + TICK_TOLERANCE).floor();
        if ticks.is_finite() && ticks >= 0.0 {
            Some(ticks as u64)
        } else {
            None
        }
    }

    pub fn tick_time(&self, index: u64) -> f64 {
        index as f64 * self.period
    }

    /// First tick strictly after `time`
    pub fn next_update_time(&self, time: f64) -> f64 {
        match self.tick_index(time) {
            Some(k) => self.tick_time(k + 1),
            None => 0.0,
        }
    }

    /// True if a tick at or before `time` has not been latched yet
    pub fn is_due(&self, time: f64) -> bool {
        match (self.tick_index(time), self.last_tick) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(k), Some(last)) => k > last,
        }
    }

    /// Index of the tick `time` lies on, if it lies on one
    pub fn tick_at(&self, time: f64) -> Option<u64> {
        let k = self.tick_index(time)?;
        let offset = time / self.period - k as f64;
        (offset.abs() <= TICK_TOLERANCE).then_some(k)
    }

    /// Tick to latch at `time`: `time` is on a tick that has not been
    /// latched yet. Off-tick times never latch, since the upstream value
    /// there is not the value at the tick.
    pub fn due_tick(&self, time: f64) -> Option<u64> {
        let tick = self.tick_at(time)?;
        match self.last_tick {
            Some(last) if tick <= last => None,
            _ => Some(tick),
        }
    }

    /// Hold `value` as the sample taken at tick `tick`
    pub fn latch(&mut self, tick: u64, value: T) {
        self.value = value;
        self.last_tick = Some(tick);
        debug!(tick, period = self.period, "sample-and-hold latched");
    }

    /// Forget the last latched tick, keeping the held value
    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    /// Latch `sample()` if `time` is on a tick not latched yet.
    ///
    /// `sample` is only called when latching. Returns whether the held value
    /// changed hands.
    pub fn update<E, F>(&mut self, time: f64, sample: F) -> std::result::Result<bool, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let Some(tick) = self.due_tick(time) else {
            return Ok(false);
        };
        self.latch(tick, sample()?);
        Ok(true)
    }

    /// Times of the ticks up to `until` after `last`, the latest tick
    /// already latched
    pub fn ticks_after(&self, last: Option<u64>, until: f64) -> Vec<f64> {
        let Some(end) = self.tick_index(until) else {
            return Vec::new();
        };
        let first = last.map_or(0, |k| k + 1);
        (first..=end).map(|k| self.tick_time(k)).collect()
    }

    /// Times of the ticks up to `until` that have not been latched yet
    pub fn pending_ticks(&self, until: f64) -> Vec<f64> {
        self.ticks_after(self.last_tick, until)
    }
}
