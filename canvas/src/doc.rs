//! Document model: the page, its placed components, and their invariants.
//!
//! A [`PageDocument`] is an ordered list of [`ComponentInstance`]s on a fixed
//! canvas. Sequence order is meaningful: earlier entries paint first in free
//! layout and appear first in auto-flow layout.
//!
//! Every change goes through [`PageDocument::apply`], which validates the
//! whole [`Mutation`] before touching state, so a rejected mutation leaves the
//! document exactly as it was. Callers outside the crate only get read access;
//! the canvas engine and property binding build mutations, and the codec
//! assembles loaded documents through [`PageDocument::assemble`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_BG_COLOR, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, UNTITLED_PAGE};
use crate::error::ErrorCode;
use crate::geom::{CanvasSize, Position};
use crate::props::{ComponentKind, ComponentProps};

// =============================================================================
// IDS
// =============================================================================

/// Identifier of a component, unique within its document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// A fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("unknown component type: {0}")]
    UnknownComponentType(String),
    #[error("component not found: {0}")]
    NotFound(ComponentId),
    #[error("index {index} out of range for {len} components")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("duplicate component id: {0}")]
    DuplicateId(ComponentId),
    #[error("invalid patch for {id}: {reason}")]
    InvalidPatch { id: ComponentId, reason: String },
    #[error("stored props of {id} do not fit its type: {reason}")]
    InvalidProps { id: ComponentId, reason: String },
}

impl ErrorCode for EditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownComponentType(_) => "E_UNKNOWN_COMPONENT_TYPE",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::IndexOutOfRange { .. } => "E_INDEX_OUT_OF_RANGE",
            Self::InvalidGeometry(_) => "E_INVALID_GEOMETRY",
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
            Self::InvalidPatch { .. } => "E_INVALID_PATCH",
            Self::InvalidProps { .. } => "E_INVALID_PROPS",
        }
    }
}

// =============================================================================
// TYPES
// =============================================================================

/// One placed, configured occurrence of a component type.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    id: ComponentId,
    props: ComponentProps,
    position: Option<Position>,
}

impl ComponentInstance {
    pub(crate) fn new(id: ComponentId, props: ComponentProps, position: Option<Position>) -> Self {
        Self { id, props, position }
    }

    #[must_use]
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.props.kind()
    }

    #[must_use]
    pub fn props(&self) -> &ComponentProps {
        &self.props
    }

    /// Explicit placement; always present in free-position layout.
    #[must_use]
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    /// Components stack in sequence order without coordinates.
    AutoFlow,
    /// Components carry explicit pixel positions.
    #[default]
    FreePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BgMode {
    #[default]
    Color,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    pub mode: BgMode,
    pub color: String,
    pub image: Option<String>,
}

impl Default for Background {
    fn default() -> Self {
        Self { mode: BgMode::Color, color: DEFAULT_BG_COLOR.to_owned(), image: None }
    }
}

/// Page-level settings, everything except the component list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub canvas_size: CanvasSize,
    pub background: Background,
    pub layout_mode: LayoutMode,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            id: None,
            title: UNTITLED_PAGE.to_owned(),
            description: None,
            canvas_size: CanvasSize::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            background: Background::default(),
            layout_mode: LayoutMode::default(),
        }
    }
}

/// A single change to a document. See [`PageDocument::apply`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mutation {
    Insert { index: usize, instance: ComponentInstance },
    Remove { id: ComponentId },
    Move { from: usize, to: usize },
    SetPosition { id: ComponentId, position: Position },
    SetProps { id: ComponentId, props: ComponentProps },
    SetCanvasSize(CanvasSize),
    SetBackground(Background),
    SetTitle(String),
    SetDescription(Option<String>),
    /// Switch layout; `placements` supplies positions for unplaced
    /// components when switching to free-position layout.
    SetLayout { mode: LayoutMode, placements: Vec<(ComponentId, Position)> },
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// The page being edited.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageDocument {
    meta: PageMeta,
    components: Vec<ComponentInstance>,
}

impl PageDocument {
    /// Create an empty document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` for a zero canvas dimension.
    pub fn new(title: impl Into<String>, canvas_size: CanvasSize, layout_mode: LayoutMode) -> Result<Self, EditError> {
        let meta = PageMeta { title: title.into(), canvas_size, layout_mode, ..PageMeta::default() };
        Self::assemble(meta, Vec::new())
    }

    /// Build a document from parts, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation found.
    pub(crate) fn assemble(meta: PageMeta, components: Vec<ComponentInstance>) -> Result<Self, EditError> {
        check_canvas(meta.canvas_size)?;
        let mut seen = HashSet::new();
        for instance in &components {
            if !seen.insert(&instance.id) {
                return Err(EditError::DuplicateId(instance.id.clone()));
            }
            match (&instance.position, meta.layout_mode) {
                (Some(position), _) => check_position(position)?,
                (None, LayoutMode::FreePosition) => {
                    return Err(EditError::InvalidGeometry(format!(
                        "component {} has no position in free-position layout",
                        instance.id
                    )));
                }
                (None, LayoutMode::AutoFlow) => {}
            }
        }
        Ok(Self { meta, components })
    }

    // --- Queries ---

    #[must_use]
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.meta.title
    }

    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        self.meta.canvas_size
    }

    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        self.meta.layout_mode
    }

    /// Components in sequence order.
    #[must_use]
    pub fn components(&self) -> &[ComponentInstance] {
        &self.components
    }

    #[must_use]
    pub fn get(&self, id: &ComponentId) -> Option<&ComponentInstance> {
        self.components.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn index_of(&self, id: &ComponentId) -> Option<usize> {
        self.components.iter().position(|c| &c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// One above the highest z-index in use.
    #[must_use]
    pub fn next_z_index(&self) -> i64 {
        self.components
            .iter()
            .filter_map(|c| c.position.map(|p| p.z_index))
            .max()
            .map_or(0, |z| z.saturating_add(1))
    }

    /// Paint order. Sequence order, optionally re-stacked by z-index with
    /// sequence order breaking ties.
    #[must_use]
    pub fn paint_order(&self, honor_z_index: bool) -> Vec<&ComponentInstance> {
        let mut ordered: Vec<&ComponentInstance> = self.components.iter().collect();
        if honor_z_index {
            ordered.sort_by_key(|c| c.position.map_or(0, |p| p.z_index));
        }
        ordered
    }

    // --- Mutation ---

    /// Validate and apply one mutation. Nothing changes on error.
    ///
    /// # Errors
    ///
    /// Returns the violated invariant: `NotFound` for an absent id,
    /// `IndexOutOfRange` for an index outside the list, `DuplicateId` for an
    /// id collision, and `InvalidGeometry` for bad sizes or positions.
    pub(crate) fn apply(&mut self, mutation: Mutation) -> Result<(), EditError> {
        match mutation {
            Mutation::Insert { index, instance } => {
                let len = self.components.len();
                if index > len {
                    return Err(EditError::IndexOutOfRange { index, len });
                }
                if self.contains(&instance.id) {
                    return Err(EditError::DuplicateId(instance.id));
                }
                match (&instance.position, self.meta.layout_mode) {
                    (Some(position), _) => check_position(position)?,
                    (None, LayoutMode::FreePosition) => {
                        return Err(EditError::InvalidGeometry("free-position components need a position".into()));
                    }
                    (None, LayoutMode::AutoFlow) => {}
                }
                self.components.insert(index, instance);
            }
            Mutation::Remove { id } => {
                let index = self.require(&id)?;
                self.components.remove(index);
            }
            Mutation::Move { from, to } => {
                let len = self.components.len();
                for index in [from, to] {
                    if index >= len {
                        return Err(EditError::IndexOutOfRange { index, len });
                    }
                }
                let instance = self.components.remove(from);
                self.components.insert(to, instance);
            }
            Mutation::SetPosition { id, position } => {
                let index = self.require(&id)?;
                check_position(&position)?;
                self.components[index].position = Some(position);
            }
            Mutation::SetProps { id, props } => {
                let index = self.require(&id)?;
                let current = self.components[index].kind();
                if props.kind() != current {
                    return Err(EditError::InvalidPatch {
                        id,
                        reason: format!("cannot change type {current} to {}", props.kind()),
                    });
                }
                self.components[index].props = props;
            }
            Mutation::SetCanvasSize(size) => {
                check_canvas(size)?;
                self.meta.canvas_size = size;
            }
            Mutation::SetBackground(background) => self.meta.background = background,
            Mutation::SetTitle(title) => self.meta.title = title,
            Mutation::SetDescription(description) => self.meta.description = description,
            Mutation::SetLayout { mode, placements } => {
                let mut resolved = Vec::with_capacity(placements.len());
                for (id, position) in placements {
                    let index = self.require(&id)?;
                    check_position(&position)?;
                    resolved.push((index, position));
                }
                if mode == LayoutMode::FreePosition {
                    let placed: HashSet<usize> = resolved.iter().map(|(index, _)| *index).collect();
                    if let Some(missing) =
                        self.components.iter().enumerate().find(|(i, c)| c.position.is_none() && !placed.contains(i))
                    {
                        return Err(EditError::InvalidGeometry(format!(
                            "component {} has no position in free-position layout",
                            missing.1.id
                        )));
                    }
                }
                for (index, position) in resolved {
                    self.components[index].position = Some(position);
                }
                self.meta.layout_mode = mode;
            }
        }
        Ok(())
    }

    fn require(&self, id: &ComponentId) -> Result<usize, EditError> {
        self.index_of(id).ok_or_else(|| EditError::NotFound(id.clone()))
    }
}

fn check_canvas(size: CanvasSize) -> Result<(), EditError> {
    if size.is_valid() {
        Ok(())
    } else {
        Err(EditError::InvalidGeometry(format!("canvas must be positive, got {}x{}", size.width, size.height)))
    }
}

fn check_position(position: &Position) -> Result<(), EditError> {
    if position.is_valid() {
        Ok(())
    } else {
        Err(EditError::InvalidGeometry(format!(
            "position must be non-negative with positive size, got top={} left={} {}x{}",
            position.top, position.left, position.width, position.height
        )))
    }
}
