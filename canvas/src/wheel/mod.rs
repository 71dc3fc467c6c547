//! Weighted outcome engine for the lucky-wheel widget.
//!
//! | Module | Role |
//! |--------|------|
//! | [`table`] | Prize entries, weighted selection, authoring audit |
//! | [`spin`] | Target-angle math, easing, and animation sampling |
//! | [`machine`] | `Idle → Spinning → Settled → Idle` draw lifecycle |
//!
//! The outcome is fixed when a draw starts. The animation is presentation
//! only and always comes to rest on the pre-selected sector.

pub mod machine;
pub mod spin;
pub mod table;

pub use machine::{LuckyWheel, SpinPlan, WheelEvent, WheelPhase, WheelState};
pub use spin::{SpinAnimation, SpinTarget, compute_spin, ease_out_cubic, sector_center, sector_width};
pub use table::{PrizeEntry, TableWarning, audit, pick_index, select_outcome};

use crate::error::ErrorCode;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WheelError {
    #[error("prize table is empty")]
    EmptyTable,
    #[error("wheel is busy ({0:?}); wait for it to return to idle")]
    Busy(WheelPhase),
    #[error("sector {index} out of range for a wheel with {count} sectors")]
    SectorOutOfRange { index: usize, count: usize },
}

impl ErrorCode for WheelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTable => "E_WHEEL_EMPTY",
            Self::Busy(_) => "E_WHEEL_BUSY",
            Self::SectorOutOfRange { .. } => "E_WHEEL_SECTOR",
        }
    }
}
