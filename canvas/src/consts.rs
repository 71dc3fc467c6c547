//! Shared numeric constants for the canvas crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Default canvas width in CSS pixels (iPhone 6/7/8 logical width).
pub const DEFAULT_CANVAS_WIDTH: u32 = 375;

/// Default canvas height in CSS pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 667;

/// Default page background color.
pub const DEFAULT_BG_COLOR: &str = "#FFFFFF";

/// Title given to documents created without one.
pub const UNTITLED_PAGE: &str = "Untitled page";

// ── Wheel ───────────────────────────────────────────────────────

/// Degrees in one full wheel revolution.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Full revolutions added to every spin when the widget does not configure any.
pub const DEFAULT_EXTRA_TURNS: u32 = 5;

/// Spin animation length when the widget does not configure one.
pub const DEFAULT_SPIN_DURATION_MS: u64 = 4000;

/// How long a settled result stays on screen before the wheel returns to idle.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 3000;

/// Allowed distance between a prize table's probability sum and 1.0 before
/// the authoring audit flags it.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

// ── Preview ─────────────────────────────────────────────────────

/// Handoff-store key under which the editor publishes preview payloads.
pub const PREVIEW_HANDOFF_KEY: &str = "h5studio.preview";
