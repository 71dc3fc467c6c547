use std::path::PathBuf;

use canvas::codec::CodecError;
use canvas::doc::EditError;
use canvas::error::ErrorCode;
use canvas::preview::PreviewError;
use canvas::wheel::WheelError;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error(transparent)]
    Wheel(#[from] WheelError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("patch must be a JSON object")]
    PatchNotObject,
    #[error("component {0} is not a lucky wheel")]
    NotAWheel(String),
    #[error("page {0} already exists; pass --force to overwrite")]
    AlreadyExists(String),
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("output failed: {0}")]
    Output(#[from] std::io::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E_CONFIG",
            Self::Edit(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Codec(e) => e.error_code(),
            Self::Preview(e) => e.error_code(),
            Self::Wheel(e) => e.error_code(),
            Self::InvalidJson(_) | Self::PatchNotObject => "E_INVALID_INPUT",
            Self::NotAWheel(_) => "E_NOT_A_WHEEL",
            Self::AlreadyExists(_) => "E_ALREADY_EXISTS",
            Self::Read { .. } | Self::Output(_) => "E_IO",
        }
    }
}
