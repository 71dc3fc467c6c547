//! Component catalog: the fixed registry of placeable component types.
//!
//! Each [`ComponentDefinition`] carries display metadata, the default
//! properties and size a fresh instance starts from, and the field list the
//! property panel offers for that type. The built-in catalog is built once
//! per process and shared read-only.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::geom::Size;
use crate::props::{ComponentKind, ComponentProps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basic,
    Marketing,
    Advanced,
}

/// Editor widget the property panel uses for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Color,
    Boolean,
    Url,
    Select,
    List,
}

/// One editable property offered by the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Wire key in the component's props.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, label, kind }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDefinition {
    pub kind: ComponentKind,
    pub display_name: &'static str,
    pub category: Category,
    pub default_props: ComponentProps,
    /// Initial box size for free-position layout.
    pub default_size: Size,
    pub fields: Vec<FieldSpec>,
}

impl ComponentDefinition {
    /// The wire type identifier.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("no component registered for type: {0}")]
    NotFound(String),
}

impl ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_CATALOG_NOT_FOUND",
        }
    }
}

/// Registry keyed by type identifier.
pub struct Catalog {
    by_type: HashMap<&'static str, ComponentDefinition>,
    order: Vec<&'static str>,
}

impl Catalog {
    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| Self::from_definitions(ComponentKind::ALL.into_iter().map(builtin_definition)))
    }

    /// Build a catalog from `definitions`. A later definition for the same
    /// type replaces the earlier one but keeps its listing position.
    pub fn from_definitions(definitions: impl IntoIterator<Item = ComponentDefinition>) -> Self {
        let mut by_type = HashMap::new();
        let mut order = Vec::new();
        for def in definitions {
            let key = def.type_name();
            if by_type.insert(key, def).is_none() {
                order.push(key);
            }
        }
        Self { by_type, order }
    }

    /// Every definition in registration order.
    #[must_use]
    pub fn list_all(&self) -> Vec<&ComponentDefinition> {
        self.order.iter().filter_map(|key| self.by_type.get(key)).collect()
    }

    #[must_use]
    pub fn list_by_category(&self, category: Category) -> Vec<&ComponentDefinition> {
        self.list_all().into_iter().filter(|def| def.category == category).collect()
    }

    /// Look up a definition by its wire type identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no definition is registered for `type_name`.
    pub fn get_by_type(&self, type_name: &str) -> Result<&ComponentDefinition, CatalogError> {
        self.by_type.get(type_name).ok_or_else(|| CatalogError::NotFound(type_name.to_owned()))
    }

    #[must_use]
    pub fn get(&self, kind: ComponentKind) -> Option<&ComponentDefinition> {
        self.by_type.get(kind.as_str())
    }

    #[must_use]
    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.by_type.contains_key(kind.as_str())
    }

    /// Panel fields for a type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no definition is registered for `type_name`.
    pub fn fields_for(&self, type_name: &str) -> Result<&[FieldSpec], CatalogError> {
        self.get_by_type(type_name).map(|def| def.fields.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

// =============================================================================
// BUILT-IN DEFINITIONS
// =============================================================================

/// Stock definition for a built-in kind.
#[must_use]
pub fn builtin_definition(kind: ComponentKind) -> ComponentDefinition {
    use FieldKind::{Boolean, Color, List, Number, Select, Text, Url};

    let (display_name, category, width, height, fields) = match kind {
        ComponentKind::Text => (
            "Text",
            Category::Basic,
            300.0,
            40.0,
            vec![
                field("content", "Content", Text),
                field("fontSize", "Font size", Number),
                field("color", "Color", Color),
                field("align", "Alignment", Select),
                field("lineHeight", "Line height", Number),
            ],
        ),
        ComponentKind::Image => (
            "Image",
            Category::Basic,
            375.0,
            200.0,
            vec![field("src", "Image", Url), field("alt", "Alt text", Text), field("link", "Link", Url)],
        ),
        ComponentKind::Button => (
            "Button",
            Category::Basic,
            120.0,
            40.0,
            vec![
                field("label", "Label", Text),
                field("link", "Link", Url),
                field("bgColor", "Background", Color),
                field("color", "Text color", Color),
                field("radius", "Corner radius", Number),
            ],
        ),
        ComponentKind::Divider => (
            "Divider",
            Category::Basic,
            375.0,
            10.0,
            vec![field("color", "Color", Color), field("thickness", "Thickness", Number), field("style", "Style", Select)],
        ),
        ComponentKind::Carousel => (
            "Carousel",
            Category::Marketing,
            375.0,
            180.0,
            vec![
                field("images", "Slides", List),
                field("autoplay", "Autoplay", Boolean),
                field("intervalMs", "Interval (ms)", Number),
            ],
        ),
        ComponentKind::Countdown => (
            "Countdown",
            Category::Marketing,
            300.0,
            50.0,
            vec![field("endTime", "Ends at", Text), field("format", "Format", Text), field("color", "Color", Color)],
        ),
        ComponentKind::NoticeBar => (
            "Notice bar",
            Category::Marketing,
            375.0,
            40.0,
            vec![
                field("content", "Content", Text),
                field("speed", "Speed", Number),
                field("color", "Text color", Color),
                field("bgColor", "Background", Color),
            ],
        ),
        ComponentKind::LuckyWheel => (
            "Lucky wheel",
            Category::Marketing,
            300.0,
            300.0,
            vec![
                field("prizes", "Prizes", List),
                field("extraTurns", "Extra turns", Number),
                field("durationMs", "Spin duration (ms)", Number),
                field("buttonText", "Button text", Text),
            ],
        ),
        ComponentKind::Video => (
            "Video",
            Category::Advanced,
            375.0,
            210.0,
            vec![
                field("src", "Video", Url),
                field("poster", "Poster", Url),
                field("autoplay", "Autoplay", Boolean),
                field("loop", "Loop", Boolean),
            ],
        ),
        ComponentKind::Qrcode => (
            "QR code",
            Category::Advanced,
            120.0,
            120.0,
            vec![field("text", "Content", Text), field("color", "Color", Color), field("size", "Size", Number)],
        ),
    };

    ComponentDefinition {
        kind,
        display_name,
        category,
        default_props: ComponentProps::defaults(kind),
        default_size: Size::new(width, height),
        fields,
    }
}
