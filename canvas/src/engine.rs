use tracing::debug;

use crate::catalog::Catalog;
use crate::doc::{Background, ComponentId, ComponentInstance, EditError, LayoutMode, Mutation, PageDocument};
use crate::geom::{CanvasSize, Offset, Position, Size};
use crate::hit;
use crate::props::ComponentKind;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Editing session over one live document.
///
/// Owns the document, the current selection, and the dirty flag. Every
/// operation either applies fully or returns an error and leaves all three
/// untouched. Successful mutations mark the document dirty.
pub struct CanvasEngine<'c> {
    catalog: &'c Catalog,
    doc: PageDocument,
    selected: Option<ComponentId>,
    dirty: bool,
}

impl Default for CanvasEngine<'static> {
    fn default() -> Self {
        Self::new(PageDocument::default())
    }
}

impl CanvasEngine<'static> {
    /// Engine over `doc` using the built-in catalog.
    #[must_use]
    pub fn new(doc: PageDocument) -> Self {
        Self { catalog: Catalog::builtin(), doc, selected: None, dirty: false }
    }
}

impl<'c> CanvasEngine<'c> {
    /// Engine over `doc` using a restricted catalog.
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponentType` if `doc` holds a type `catalog` lacks.
    pub fn with_catalog(catalog: &'c Catalog, doc: PageDocument) -> Result<Self, EditError> {
        check_catalog(catalog, &doc)?;
        Ok(Self { catalog, doc, selected: None, dirty: false })
    }

    // --- Session ---

    /// Replace the live document wholesale. Clears selection and dirty state.
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponentType` if `doc` holds a type missing from the
    /// engine's catalog; the current document is kept.
    pub fn load(&mut self, doc: PageDocument) -> Result<(), EditError> {
        check_catalog(self.catalog, &doc)?;
        debug!(components = doc.len(), "document loaded");
        self.doc = doc;
        self.selected = None;
        self.dirty = false;
        Ok(())
    }

    /// Unsaved changes exist since the last load or [`Self::mark_saved`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    #[must_use]
    pub fn into_document(self) -> PageDocument {
        self.doc
    }

    // --- Queries ---

    #[must_use]
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    #[must_use]
    pub fn document(&self) -> &PageDocument {
        &self.doc
    }

    /// The currently selected component id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&ComponentId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn selected_component(&self) -> Option<&ComponentInstance> {
        self.selected.as_ref().and_then(|id| self.doc.get(id))
    }

    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&ComponentInstance> {
        self.doc.get(id)
    }

    // --- Components ---

    /// Place a new instance of `type_name` and select it.
    ///
    /// Inserts at `at_index` clamped to `[0, len]`, or appends. In free
    /// layout the instance gets the catalog's default size, stacked below the
    /// lowest existing component.
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponentType` when the catalog has no such type.
    pub fn add_component(&mut self, type_name: &str, at_index: Option<usize>) -> Result<ComponentId, EditError> {
        let def = self
            .catalog
            .get_by_type(type_name)
            .map_err(|_| EditError::UnknownComponentType(type_name.to_owned()))?;

        let position = match self.doc.layout_mode() {
            LayoutMode::FreePosition => Some(self.stacked_position(def.default_size, self.doc.next_z_index())),
            LayoutMode::AutoFlow => None,
        };
        let id = ComponentId::generate();
        let index = at_index.unwrap_or(self.doc.len()).min(self.doc.len());
        let instance = ComponentInstance::new(id.clone(), def.default_props.clone(), position);

        self.commit(Mutation::Insert { index, instance })?;
        debug!(%id, kind = type_name, index, "component added");
        self.selected = Some(id.clone());
        Ok(id)
    }

    /// Delete a component, clearing the selection if it pointed at it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is absent.
    pub fn remove_component(&mut self, id: &ComponentId) -> Result<(), EditError> {
        self.commit(Mutation::Remove { id: id.clone() })?;
        debug!(%id, "component removed");
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Ok(())
    }

    /// Copy a component (props and position) under a new id, directly after
    /// the source, and select the copy.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is absent.
    pub fn duplicate_component(&mut self, id: &ComponentId) -> Result<ComponentId, EditError> {
        let index = self.doc.index_of(id).ok_or_else(|| EditError::NotFound(id.clone()))?;
        let source = &self.doc.components()[index];
        let copy_id = ComponentId::generate();
        let copy = ComponentInstance::new(copy_id.clone(), source.props().clone(), source.position().copied());

        self.commit(Mutation::Insert { index: index + 1, instance: copy })?;
        debug!(source = %id, copy = %copy_id, "component duplicated");
        self.selected = Some(copy_id.clone());
        Ok(copy_id)
    }

    /// Move a component's top-left corner, clamped to the canvas, and select it.
    ///
    /// Coordinates never go negative; the box stays horizontally inside the
    /// canvas and may overflow the bottom edge.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is absent and `InvalidGeometry` when the
    /// document is in auto-flow layout.
    pub fn update_position(&mut self, id: &ComponentId, offset: Offset) -> Result<Position, EditError> {
        let current = self.placed(id)?;
        let clamped = Position::clamp_offset(current.size(), offset, self.doc.canvas_size());
        let position = Position::new(clamped, current.size(), current.z_index);

        self.commit(Mutation::SetPosition { id: id.clone(), position })?;
        debug!(%id, top = position.top, left = position.left, "component moved");
        self.selected = Some(id.clone());
        Ok(position)
    }

    /// Change a component's size, re-clamping its offset, and select it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is absent and `InvalidGeometry` for a
    /// non-positive size or an auto-flow document.
    pub fn resize(&mut self, id: &ComponentId, size: Size) -> Result<Position, EditError> {
        let current = self.placed(id)?;
        if !size.is_valid() {
            return Err(EditError::InvalidGeometry(format!("size must be positive, got {}x{}", size.width, size.height)));
        }
        let clamped = Position::clamp_offset(size, current.offset(), self.doc.canvas_size());
        let position = Position::new(clamped, size, current.z_index);

        self.commit(Mutation::SetPosition { id: id.clone(), position })?;
        debug!(%id, width = size.width, height = size.height, "component resized");
        self.selected = Some(id.clone());
        Ok(position)
    }

    /// Move the entry at `from` to `to`, keeping every other entry's relative
    /// order, and select the moved component.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` unless both indices are in `[0, len)`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        self.commit(Mutation::Move { from, to })?;
        debug!(from, to, "component reordered");
        self.selected = self.doc.components().get(to).map(|c| c.id().clone());
        Ok(())
    }

    // --- Selection ---

    /// Select a component.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id; the current selection is kept.
    pub fn select(&mut self, id: &ComponentId) -> Result<(), EditError> {
        if !self.doc.contains(id) {
            return Err(EditError::NotFound(id.clone()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select the topmost component under `point`, or clear the selection
    /// when nothing is there.
    pub fn select_at(&mut self, point: Offset) -> Option<ComponentId> {
        self.selected = hit::hit_test(&self.doc, point).map(|c| c.id().clone());
        self.selected.clone()
    }

    // --- Page settings ---

    /// # Errors
    ///
    /// Returns `InvalidGeometry` for a zero dimension.
    pub fn set_canvas_size(&mut self, size: CanvasSize) -> Result<(), EditError> {
        self.commit(Mutation::SetCanvasSize(size))
    }

    /// # Errors
    ///
    /// Infallible today; kept fallible like every other mutation.
    pub fn set_background(&mut self, background: Background) -> Result<(), EditError> {
        self.commit(Mutation::SetBackground(background))
    }

    /// # Errors
    ///
    /// Infallible today; kept fallible like every other mutation.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), EditError> {
        self.commit(Mutation::SetTitle(title.into()))
    }

    /// # Errors
    ///
    /// Infallible today; kept fallible like every other mutation.
    pub fn set_description(&mut self, description: Option<String>) -> Result<(), EditError> {
        self.commit(Mutation::SetDescription(description))
    }

    /// Switch layout mode. Switching to free-position layout gives every
    /// unplaced component its catalog size, stacked top to bottom in sequence
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponentType` if an unplaced component's type is
    /// missing from the catalog.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> Result<(), EditError> {
        let mut placements = Vec::new();
        if mode == LayoutMode::FreePosition {
            let mut top = self.lowest_bottom();
            let mut z = self.doc.next_z_index();
            for instance in self.doc.components().iter().filter(|c| c.position().is_none()) {
                let size = self.default_size(instance.kind())?;
                let offset = Position::clamp_offset(size, Offset::new(top, 0.0), self.doc.canvas_size());
                placements.push((instance.id().clone(), Position::new(offset, size, z)));
                top = offset.top + size.height;
                z = z.saturating_add(1);
            }
        }
        self.commit(Mutation::SetLayout { mode, placements })?;
        debug!(?mode, "layout mode changed");
        Ok(())
    }

    // --- Internals ---

    /// Apply a mutation and mark the document dirty on success.
    pub(crate) fn commit(&mut self, mutation: Mutation) -> Result<(), EditError> {
        self.doc.apply(mutation)?;
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn set_selected(&mut self, id: Option<ComponentId>) {
        self.selected = id;
    }

    fn placed(&self, id: &ComponentId) -> Result<Position, EditError> {
        let instance = self.doc.get(id).ok_or_else(|| EditError::NotFound(id.clone()))?;
        if self.doc.layout_mode() == LayoutMode::AutoFlow {
            return Err(EditError::InvalidGeometry(format!("component {id} cannot be positioned in auto-flow layout")));
        }
        instance
            .position()
            .copied()
            .ok_or_else(|| EditError::InvalidGeometry(format!("component {id} has no position in auto-flow layout")))
    }

    fn default_size(&self, kind: ComponentKind) -> Result<Size, EditError> {
        self.catalog
            .get(kind)
            .map(|def| def.default_size)
            .ok_or_else(|| EditError::UnknownComponentType(kind.as_str().to_owned()))
    }

    fn lowest_bottom(&self) -> f64 {
        self.doc
            .components()
            .iter()
            .filter_map(ComponentInstance::position)
            .map(|p| p.top + p.height)
            .fold(0.0, f64::max)
    }

    fn stacked_position(&self, size: Size, z_index: i64) -> Position {
        let offset = Position::clamp_offset(size, Offset::new(self.lowest_bottom(), 0.0), self.doc.canvas_size());
        Position::new(offset, size, z_index)
    }
}

fn check_catalog(catalog: &Catalog, doc: &PageDocument) -> Result<(), EditError> {
    match doc.components().iter().find(|c| !catalog.contains(c.kind())) {
        Some(c) => Err(EditError::UnknownComponentType(c.kind().as_str().to_owned())),
        None => Ok(()),
    }
}
