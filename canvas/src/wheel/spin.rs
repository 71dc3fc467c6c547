//! Spin geometry and animation sampling.
//!
//! Convention: sector `i` of an `n`-sector wheel spans `[i·w, (i+1)·w)`
//! degrees measured counter-clockwise from the pointer when the wheel is at
//! rest, with `w = 360 / n`. The wheel turns clockwise, so rotating it by a
//! sector's center angle brings that sector's center under the fixed pointer.
//!
//! Animation is a pure function of elapsed time; whoever drives the frames
//! samples [`SpinAnimation::angle_at`] as often as it likes.

#[cfg(test)]
#[path = "spin_test.rs"]
mod spin_test;

use std::time::Duration;

use super::WheelError;
use crate::consts::FULL_TURN_DEG;

/// Final rotation and run time of one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTarget {
    /// Clockwise rotation in degrees, including the extra full turns.
    pub target_angle: f64,
    pub duration: Duration,
}

/// Angular width of one sector in degrees.
#[must_use]
pub fn sector_width(entry_count: usize) -> f64 {
    if entry_count == 0 {
        return FULL_TURN_DEG;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = entry_count as f64;
    FULL_TURN_DEG / count
}

/// Angle of sector `index`'s center, counter-clockwise from the pointer at rest.
#[must_use]
pub fn sector_center(index: usize, entry_count: usize) -> f64 {
    let width = sector_width(entry_count);
    #[allow(clippy::cast_precision_loss)]
    let index = index as f64;
    index * width + width / 2.0
}

/// Target state for a spin starting from a wheel at rest at 0°.
///
/// # Errors
///
/// Returns `EmptyTable` for a wheel without sectors and `SectorOutOfRange`
/// when `selected_index` does not name a sector.
pub fn compute_spin(
    selected_index: usize,
    entry_count: usize,
    extra_full_turns: u32,
    duration: Duration,
) -> Result<SpinTarget, WheelError> {
    continue_spin(0.0, selected_index, entry_count, extra_full_turns, duration)
}

/// Target state for a spin starting from `rest_angle`.
///
/// The result always lies ahead of `rest_angle` and is congruent to the
/// selected sector's center modulo 360°, so consecutive spins keep turning in
/// the same direction instead of unwinding.
///
/// # Errors
///
/// Same as [`compute_spin`].
pub fn continue_spin(
    rest_angle: f64,
    selected_index: usize,
    entry_count: usize,
    extra_full_turns: u32,
    duration: Duration,
) -> Result<SpinTarget, WheelError> {
    if entry_count == 0 {
        return Err(WheelError::EmptyTable);
    }
    if selected_index >= entry_count {
        return Err(WheelError::SectorOutOfRange { index: selected_index, count: entry_count });
    }

    let rest = if rest_angle.is_finite() { rest_angle } else { 0.0 };
    let base = rest - rest.rem_euclid(FULL_TURN_DEG);
    let mut target = base + f64::from(extra_full_turns) * FULL_TURN_DEG + sector_center(selected_index, entry_count);
    if target <= rest {
        target += FULL_TURN_DEG;
    }
    Ok(SpinTarget { target_angle: target, duration })
}

/// Cubic ease-out: fast start, gentle stop. `t` is clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    1.0 - (1.0 - t).powi(3)
}

/// One running spin: where it starts, where it must stop, and how long it takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    pub start_angle: f64,
    pub target_angle: f64,
    pub duration: Duration,
}

impl SpinAnimation {
    #[must_use]
    pub fn new(start_angle: f64, target: SpinTarget) -> Self {
        Self { start_angle, target_angle: target.target_angle, duration: target.duration }
    }

    /// Fraction of the run completed after `elapsed`, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Wheel angle after `elapsed`. Exactly `target_angle` once finished.
    #[must_use]
    pub fn angle_at(&self, elapsed: Duration) -> f64 {
        if self.is_finished(elapsed) {
            return self.target_angle;
        }
        let eased = ease_out_cubic(self.progress(elapsed));
        self.start_angle + (self.target_angle - self.start_angle) * eased
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}
