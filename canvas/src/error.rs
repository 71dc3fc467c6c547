//! Error codes shared by every layer of the editor.
//!
//! Each layer owns its own `thiserror` enum; hosts that forward failures to a
//! UI or a log use the stable `E_*` code rather than the display text.

/// A stable, machine-readable code for an error value.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
