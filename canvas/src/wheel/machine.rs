//! Draw lifecycle of a lucky wheel: `Idle → Spinning → Settled → Idle`.
//!
//! A draw picks the prize immediately and then runs a fixed-length,
//! non-cancellable animation toward it. The wheel accepts a new draw only
//! once it is back to idle, so a user cannot abort a spin and redraw.
//! Time only moves through [`LuckyWheel::advance`]; the wheel never reads a
//! clock itself.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use super::WheelError;
use super::spin::{SpinAnimation, continue_spin};
use super::table::{PrizeEntry, select_outcome};
use crate::consts::DEFAULT_SETTLE_DELAY_MS;
use crate::props::LuckyWheelProps;

/// Coarse lifecycle phase, for display and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelPhase {
    Idle,
    Spinning,
    Settled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WheelState {
    Idle,
    Spinning { prize_index: usize, animation: SpinAnimation, elapsed: Duration },
    Settled { prize_index: usize, elapsed: Duration },
}

/// What a successful draw committed to.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub prize_index: usize,
    pub prize: PrizeEntry,
    pub animation: SpinAnimation,
}

/// Transition reported by [`LuckyWheel::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    /// The animation finished and the pre-selected prize is revealed.
    Settled { prize_index: usize, prize: PrizeEntry },
    /// The result was dismissed after the settle delay.
    Dismissed,
}

pub struct LuckyWheel {
    prizes: Vec<PrizeEntry>,
    extra_turns: u32,
    duration: Duration,
    settle_delay: Duration,
    rest_angle: f64,
    state: WheelState,
}

impl LuckyWheel {
    #[must_use]
    pub fn new(prizes: Vec<PrizeEntry>, extra_turns: u32, duration: Duration, settle_delay: Duration) -> Self {
        Self { prizes, extra_turns, duration, settle_delay, rest_angle: 0.0, state: WheelState::Idle }
    }

    /// Build a wheel from a placed component's properties.
    #[must_use]
    pub fn from_props(props: &LuckyWheelProps) -> Self {
        Self::new(
            props.prizes.clone(),
            props.extra_turns,
            Duration::from_millis(props.duration_ms),
            Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
        )
    }

    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn prizes(&self) -> &[PrizeEntry] {
        &self.prizes
    }

    #[must_use]
    pub fn state(&self) -> &WheelState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> WheelPhase {
        match self.state {
            WheelState::Idle => WheelPhase::Idle,
            WheelState::Spinning { .. } => WheelPhase::Spinning,
            WheelState::Settled { .. } => WheelPhase::Settled,
        }
    }

    /// Current presentation angle in degrees.
    #[must_use]
    pub fn angle(&self) -> f64 {
        match &self.state {
            WheelState::Spinning { animation, elapsed, .. } => animation.angle_at(*elapsed),
            WheelState::Idle | WheelState::Settled { .. } => self.rest_angle,
        }
    }

    /// The revealed prize, available only while settled.
    #[must_use]
    pub fn outcome(&self) -> Option<&PrizeEntry> {
        match self.state {
            WheelState::Settled { prize_index, .. } => self.prizes.get(prize_index),
            _ => None,
        }
    }

    /// Start a draw: select the prize now and begin spinning toward it.
    ///
    /// # Errors
    ///
    /// Returns `Busy` unless the wheel is idle (the state is left unchanged)
    /// and `EmptyTable` when there is nothing to win.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SpinPlan, WheelError> {
        let phase = self.phase();
        if phase != WheelPhase::Idle {
            debug!(?phase, "draw rejected");
            return Err(WheelError::Busy(phase));
        }

        let (prize_index, prize) = select_outcome(&self.prizes, rng).ok_or(WheelError::EmptyTable)?;
        let prize = prize.clone();
        let target = continue_spin(self.rest_angle, prize_index, self.prizes.len(), self.extra_turns, self.duration)?;
        let animation = SpinAnimation::new(self.rest_angle, target);

        info!(prize = %prize.id, target = target.target_angle, "wheel draw");
        self.state = WheelState::Spinning { prize_index, animation, elapsed: Duration::ZERO };
        Ok(SpinPlan { prize_index, prize, animation })
    }

    /// Move the wheel's clock forward by `dt`.
    ///
    /// At most one transition happens per call; time past a transition is
    /// carried into the next phase.
    pub fn advance(&mut self, dt: Duration) -> Option<WheelEvent> {
        match &mut self.state {
            WheelState::Idle => None,
            WheelState::Spinning { prize_index, animation, elapsed } => {
                *elapsed = elapsed.saturating_add(dt);
                if !animation.is_finished(*elapsed) {
                    return None;
                }
                let prize_index = *prize_index;
                let overflow = elapsed.saturating_sub(animation.duration);
                self.rest_angle = animation.target_angle;
                self.state = WheelState::Settled { prize_index, elapsed: overflow };
                let prize = self.prizes.get(prize_index)?.clone();
                Some(WheelEvent::Settled { prize_index, prize })
            }
            WheelState::Settled { elapsed, .. } => {
                *elapsed = elapsed.saturating_add(dt);
                if *elapsed < self.settle_delay {
                    return None;
                }
                self.state = WheelState::Idle;
                Some(WheelEvent::Dismissed)
            }
        }
    }

    /// Dismiss a settled result. Returns `false` in any other phase.
    pub fn acknowledge(&mut self) -> bool {
        if self.phase() != WheelPhase::Settled {
            return false;
        }
        self.state = WheelState::Idle;
        true
    }
}
