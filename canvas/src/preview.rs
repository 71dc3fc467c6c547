//! Preview pipeline: read-only snapshots handed from the editor to a viewer.
//!
//! The editor publishes a [`PreviewPayload`] into a session-scoped key-value
//! store; the viewer reads it back. The payload is an owned copy, so later
//! edits never leak into an open preview. A viewer that finds nothing usable
//! renders an empty default page instead of failing.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::codec::{self, CodecError};
use crate::consts::PREVIEW_HANDOFF_KEY;
use crate::doc::{ComponentInstance, PageDocument};
use crate::error::ErrorCode;
use crate::props::ComponentProps;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("handoff storage unavailable: {0}")]
    Unavailable(String),
    #[error("handoff I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Handoff(#[from] HandoffError),
}

impl ErrorCode for PreviewError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Codec(e) => e.error_code(),
            Self::Handoff(_) => "E_HANDOFF",
        }
    }
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// Render-ready, read-only copy of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPayload {
    document: PageDocument,
}

/// Copy `doc` for preview. The copy shares nothing with the live document.
#[must_use]
pub fn snapshot_for_preview(doc: &PageDocument) -> PreviewPayload {
    PreviewPayload { document: doc.clone() }
}

impl PreviewPayload {
    /// Empty default page shown when no usable payload was handed off.
    #[must_use]
    pub fn fallback() -> Self {
        Self { document: PageDocument::default() }
    }

    #[must_use]
    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    #[must_use]
    pub fn paint_order(&self, honor_z_index: bool) -> Vec<&ComponentInstance> {
        self.document.paint_order(honor_z_index)
    }

    /// Plain-text outline: a header line, then one line per component in
    /// paint order.
    #[must_use]
    pub fn render_outline(&self, honor_z_index: bool) -> String {
        let doc = &self.document;
        let size = doc.canvas_size();
        let mut out = format!("{} ({}x{}, {:?})\n", doc.title(), size.width, size.height, doc.layout_mode());
        for (n, c) in self.paint_order(honor_z_index).into_iter().enumerate() {
            let mut line = format!("  {n:>2}. {:<10} {}", c.kind().as_str(), c.id());
            if let Some(p) = c.position() {
                line.push_str(&format!("  @{},{} {}x{} z{}", p.left, p.top, p.width, p.height, p.z_index));
            }
            if let Some(label) = summary(c.props()) {
                line.push_str(&format!("  \"{label}\""));
            }
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// Short human label for a component, when its type has one.
fn summary(props: &ComponentProps) -> Option<String> {
    let text = match props {
        ComponentProps::Text(p) => p.content.clone(),
        ComponentProps::Button(p) => p.label.clone(),
        ComponentProps::NoticeBar(p) => p.content.clone(),
        ComponentProps::Image(p) => p.src.clone(),
        ComponentProps::Video(p) => p.src.clone(),
        ComponentProps::Qrcode(p) => p.text.clone(),
        ComponentProps::Countdown(p) => p.end_time.clone(),
        ComponentProps::Carousel(p) => format!("{} slides", p.images.len()),
        ComponentProps::LuckyWheel(p) => format!("{} prizes", p.prizes.len()),
        ComponentProps::Divider(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

// =============================================================================
// HANDOFF
// =============================================================================

/// Session-scoped key-value store between editor and preview.
pub trait HandoffStore {
    /// # Errors
    ///
    /// Returns `HandoffError` if the store cannot be written.
    fn put(&mut self, key: &str, value: String) -> Result<(), HandoffError>;

    /// # Errors
    ///
    /// Returns `HandoffError` if the store cannot be read; an absent key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, HandoffError>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryHandoff {
    entries: HashMap<String, String>,
}

impl HandoffStore for MemoryHandoff {
    fn put(&mut self, key: &str, value: String) -> Result<(), HandoffError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        Ok(self.entries.get(key).cloned())
    }
}

/// Browser `sessionStorage` store.
#[cfg(feature = "web")]
#[derive(Debug, Default)]
pub struct SessionStorageHandoff;

#[cfg(feature = "web")]
impl SessionStorageHandoff {
    fn storage() -> Result<web_sys::Storage, HandoffError> {
        let window = web_sys::window().ok_or_else(|| HandoffError::Unavailable("no window".into()))?;
        window
            .session_storage()
            .map_err(|e| HandoffError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| HandoffError::Unavailable("sessionStorage disabled".into()))
    }
}

#[cfg(feature = "web")]
impl HandoffStore for SessionStorageHandoff {
    fn put(&mut self, key: &str, value: String) -> Result<(), HandoffError> {
        Self::storage()?.set_item(key, &value).map_err(|e| HandoffError::Unavailable(format!("{e:?}")))
    }

    fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        Self::storage()?.get_item(key).map_err(|e| HandoffError::Unavailable(format!("{e:?}")))
    }
}

/// Publishes and receives preview payloads through a [`HandoffStore`].
pub struct PreviewChannel<S> {
    store: S,
    key: String,
}

impl<S: HandoffStore> PreviewChannel<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, PREVIEW_HANDOFF_KEY)
    }

    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot `doc` and hand it off, replacing any earlier payload.
    ///
    /// # Errors
    ///
    /// Returns `Codec` if the document cannot be encoded and `Handoff` if the
    /// store rejects the write.
    pub fn publish(&mut self, doc: &PageDocument) -> Result<PreviewPayload, PreviewError> {
        let payload = snapshot_for_preview(doc);
        let blob = codec::serialize(payload.document())?;
        debug!(key = %self.key, bytes = blob.len(), "preview published");
        self.store.put(&self.key, blob)?;
        Ok(payload)
    }

    /// The handed-off payload, or [`PreviewPayload::fallback`] when it is
    /// absent, unreadable, or fails validation.
    pub fn receive(&self, catalog: &Catalog) -> PreviewPayload {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(key = %self.key, "no preview payload, showing default page");
                return PreviewPayload::fallback();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "preview store unreadable, showing default page");
                return PreviewPayload::fallback();
            }
        };
        match codec::deserialize(&blob, catalog) {
            Ok(document) => PreviewPayload { document },
            Err(e) => {
                warn!(key = %self.key, error = %e, "preview payload rejected, showing default page");
                PreviewPayload::fallback()
            }
        }
    }
}
