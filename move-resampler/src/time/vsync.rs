//! Vsync Clock
//!
//! Display-refresh-aligned tick source. Input timestamps and vsync times
//! share one microsecond timeline; this clock only decides where on that
//! timeline the refresh ticks fall.

use crate::Error;

const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Highest refresh rate accepted when building a clock from a rate
pub const MAX_REFRESH_HZ: f64 = 1_000.0;

/// Convert microseconds to seconds
#[inline]
pub fn micros_to_secs(micros: i64) -> f64 {
    micros as f64 / MICROS_PER_SEC
}

/// Periodic tick source
///
/// Ticks fall at `phase_us + k * period_us` for every integer `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VsyncClock {
    period_us: i64,
    phase_us: i64,
}

impl VsyncClock {
    /// Create a clock from a tick period. Periods below 1 µs are raised to 1.
    pub fn new(period_us: i64, phase_us: i64) -> Self {
        let period_us = period_us.max(1);
        Self {
            period_us,
            phase_us: phase_us.rem_euclid(period_us),
        }
    }

    /// Create a clock from a refresh rate in Hz, phase-aligned to zero
    pub fn from_refresh_rate(refresh_hz: f64) -> crate::Result<Self> {
        if !refresh_hz.is_finite() || refresh_hz <= 0.0 || refresh_hz > MAX_REFRESH_HZ {
            return Err(Error::Config(format!(
                "refresh rate must be in (0, {}] Hz, got {}",
                MAX_REFRESH_HZ, refresh_hz
            )));
        }
        let period_us = (MICROS_PER_SEC / refresh_hz).round() as i64;
        Ok(Self::new(period_us, 0))
    }

    /// Same period, ticks shifted so that one falls on `anchor_us`
    pub fn aligned_to(&self, anchor_us: i64) -> Self {
        Self::new(self.period_us, anchor_us)
    }

    pub fn period_us(&self) -> i64 {
        self.period_us
    }

    pub fn phase_us(&self) -> i64 {
        self.phase_us
    }

    /// Refresh rate implied by the period
    pub fn refresh_hz(&self) -> f64 {
        MICROS_PER_SEC / self.period_us as f64
    }

    /// First tick at or after `time_us`, or `None` past the end of the
    /// `i64` timeline
    pub fn next_tick_at_or_after(&self, time_us: i64) -> Option<i64> {
        // Widened so the phase offset cannot overflow near the i64 bounds
        let offset = (i128::from(time_us) - i128::from(self.phase_us))
            .rem_euclid(i128::from(self.period_us)) as i64;
        if offset == 0 {
            Some(time_us)
        } else {
            time_us.checked_add(self.period_us - offset)
        }
    }

    /// Tick times within `[start_us, end_us]`, ascending
    pub fn ticks(&self, start_us: i64, end_us: i64) -> impl Iterator<Item = i64> {
        let period_us = self.period_us;
        let first = self.next_tick_at_or_after(start_us);
        std::iter::successors(first, move |&t| t.checked_add(period_us))
            .take_while(move |&t| t <= end_us)
    }
}

impl Default for VsyncClock {
    /// 60 Hz
    fn default() -> Self {
        Self::new(16_667, 0)
    }
}
