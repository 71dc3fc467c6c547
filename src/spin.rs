//! Frame scheduler for the lucky-wheel spin.
//!
//! The wheel itself is clock-free; this drives it from a tokio interval,
//! feeding real elapsed time into `advance` and sampling the angle once per
//! frame.

use std::time::Duration;

use canvas::wheel::{LuckyWheel, PrizeEntry, WheelError, WheelEvent};
use rand::Rng;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Result of one animated draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinReport {
    pub prize_index: usize,
    pub prize: PrizeEntry,
    pub final_angle: f64,
    pub frames: usize,
}

/// Draw and animate until the wheel settles, calling `on_frame` with each
/// sampled angle.
///
/// # Errors
///
/// Returns `Busy` if the wheel is not idle and `EmptyTable` if it has no prizes.
pub async fn run_spin<R, F>(
    wheel: &mut LuckyWheel,
    rng: &mut R,
    frame: Duration,
    mut on_frame: F,
) -> Result<SpinReport, WheelError>
where
    R: Rng + ?Sized,
    F: FnMut(f64),
{
    let plan = wheel.draw(rng)?;
    debug!(target = plan.animation.target_angle, ?frame, "spin scheduled");

    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();
    let mut frames = 0;
    loop {
        let now = ticker.tick().await;
        let event = wheel.advance(now.saturating_duration_since(last));
        last = now;
        frames += 1;
        on_frame(wheel.angle());

        if let Some(WheelEvent::Settled { prize_index, prize }) = event {
            info!(prize = %prize.id, name = %prize.name, frames, "wheel settled");
            return Ok(SpinReport { prize_index, prize, final_angle: wheel.angle(), frames });
        }
    }
}

/// Keep the clock running on a settled wheel until it dismisses itself.
/// Returns immediately for a wheel that is not settled.
pub async fn await_dismissal(wheel: &mut LuckyWheel, frame: Duration) {
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();
    while wheel.outcome().is_some() {
        let now = ticker.tick().await;
        if let Some(WheelEvent::Dismissed) = wheel.advance(now.saturating_duration_since(last)) {
            debug!("wheel result dismissed");
        }
        last = now;
    }
}

#[cfg(test)]
#[path = "spin_test.rs"]
mod tests;
