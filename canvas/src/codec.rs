//! Persisted document format.
//!
//! A [`DocumentRecord`] is the transportable shape of a page: camelCase keys,
//! component props as open JSON objects. Loading is all-or-nothing: a blob
//! with a missing field, an unknown component type, a duplicate id, or any
//! geometry violation is rejected as a whole.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::doc::{Background, BgMode, ComponentId, ComponentInstance, EditError, LayoutMode, PageDocument, PageMeta};
use crate::error::ErrorCode;
use crate::geom::{CanvasSize, Position};
use crate::props::{ComponentProps, PropertyBag};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid document: {0}")]
    Validation(#[from] EditError),
}

impl ErrorCode for CodecError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Json(_) => "E_MALFORMED_DOCUMENT",
            Self::Validation(_) => "E_VALIDATION",
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub components: Vec<ComponentRecord>,
    pub canvas_size: CanvasSize,
    pub bg_mode: BgMode,
    pub bg_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_image: Option<String>,
    pub layout_mode: LayoutMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub props: PropertyBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

// =============================================================================
// ENCODE
// =============================================================================

/// Structured form of `doc`, components in sequence order.
///
/// # Errors
///
/// Returns `Json` if a component's props cannot be flattened to an object.
pub fn to_record(doc: &PageDocument) -> Result<DocumentRecord, CodecError> {
    let meta = doc.meta();
    let components = doc
        .components()
        .iter()
        .map(|c| {
            Ok(ComponentRecord {
                id: c.id().to_string(),
                type_name: c.kind().as_str().to_owned(),
                props: c.props().to_bag()?,
                position: c.position().copied(),
            })
        })
        .collect::<Result<Vec<_>, CodecError>>()?;

    Ok(DocumentRecord {
        id: meta.id.clone(),
        title: meta.title.clone(),
        description: meta.description.clone(),
        components,
        canvas_size: meta.canvas_size,
        bg_mode: meta.background.mode,
        bg_color: meta.background.color.clone(),
        bg_image: meta.background.image.clone(),
        layout_mode: meta.layout_mode,
    })
}

/// Compact JSON text of `doc`.
///
/// # Errors
///
/// Returns `Json` if encoding fails.
pub fn serialize(doc: &PageDocument) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&to_record(doc)?)?)
}

// =============================================================================
// DECODE
// =============================================================================

/// Parse and validate a JSON blob into a document.
///
/// # Errors
///
/// Returns `Json` for malformed JSON or missing fields and `Validation` for
/// any document invariant violation.
pub fn deserialize(blob: &str, catalog: &Catalog) -> Result<PageDocument, CodecError> {
    let record: DocumentRecord = serde_json::from_str(blob)?;
    from_record(record, catalog)
}

/// Validate a structured record into a document.
///
/// # Errors
///
/// Returns `Validation` for an unknown type, mistyped props, or a violated
/// document invariant.
pub fn from_record(record: DocumentRecord, catalog: &Catalog) -> Result<PageDocument, CodecError> {
    let components = record
        .components
        .into_iter()
        .map(|c| decode_component(c, catalog))
        .collect::<Result<Vec<_>, EditError>>()?;

    let meta = PageMeta {
        id: record.id,
        title: record.title,
        description: record.description,
        canvas_size: record.canvas_size,
        background: Background { mode: record.bg_mode, color: record.bg_color, image: record.bg_image },
        layout_mode: record.layout_mode,
    };
    Ok(PageDocument::assemble(meta, components)?)
}

fn decode_component(record: ComponentRecord, catalog: &Catalog) -> Result<ComponentInstance, EditError> {
    let def = catalog
        .get_by_type(&record.type_name)
        .map_err(|_| EditError::UnknownComponentType(record.type_name.clone()))?;
    let id = ComponentId::from(record.id);
    let props = ComponentProps::from_bag(def.kind, record.props)
        .map_err(|e| EditError::InvalidProps { id: id.clone(), reason: e.to_string() })?;
    Ok(ComponentInstance::new(id, props, record.position))
}
