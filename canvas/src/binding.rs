//! Property panel binding: partial-property edits on one component.
//!
//! The panel edits the selected component through the engine handle. A patch
//! is a shallow object merged over the component's current props; `null`
//! removes a key so the field falls back to its type default. The merged bag
//! is re-parsed into the typed record, so a value of the wrong JSON type is
//! rejected before the document changes.

#[cfg(test)]
#[path = "binding_test.rs"]
mod binding_test;

use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::FieldSpec;
use crate::doc::{ComponentId, EditError, Mutation};
use crate::engine::CanvasEngine;
use crate::props::{ComponentProps, PropertyBag};
use crate::wheel::{TableWarning, audit};

impl CanvasEngine<'_> {
    /// Merge `patch` into a component's props and select it.
    ///
    /// Keys the typed record does not model are kept in its `extra` map.
    /// Patching a lucky wheel audits the resulting prize table and logs each
    /// finding; findings never block the edit.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is absent and `InvalidPatch` when a value
    /// contradicts the field's type. The document is untouched on error.
    pub fn apply_patch(&mut self, id: &ComponentId, patch: PropertyBag) -> Result<(), EditError> {
        let instance = self.document().get(id).ok_or_else(|| EditError::NotFound(id.clone()))?;
        let kind = instance.kind();
        let invalid = |e: serde_json::Error| EditError::InvalidPatch { id: id.clone(), reason: e.to_string() };

        let mut bag = instance.props().to_bag().map_err(invalid)?;
        let keys: Vec<String> = patch.keys().cloned().collect();
        merge_shallow(&mut bag, patch);
        let props = ComponentProps::from_bag(kind, bag).map_err(invalid)?;

        if let Some(wheel) = props.as_lucky_wheel() {
            for warning in audit(&wheel.prizes) {
                warn!(%id, %warning, "prize table");
            }
        }

        self.commit(Mutation::SetProps { id: id.clone(), props })?;
        debug!(%id, ?keys, "props patched");
        self.set_selected(Some(id.clone()));
        Ok(())
    }

    /// The panel fields offered for a component's type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is absent, or `UnknownComponentType` when
    /// the engine's catalog does not carry the component's type.
    pub fn panel_fields(&self, id: &ComponentId) -> Result<&[FieldSpec], EditError> {
        let kind = self.document().get(id).ok_or_else(|| EditError::NotFound(id.clone()))?.kind();
        self.catalog()
            .get(kind)
            .map(|def| def.fields.as_slice())
            .ok_or_else(|| EditError::UnknownComponentType(kind.as_str().to_owned()))
    }

    /// Audit findings for a lucky wheel's prize table. Empty for other types.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is absent.
    pub fn prize_warnings(&self, id: &ComponentId) -> Result<Vec<TableWarning>, EditError> {
        let instance = self.document().get(id).ok_or_else(|| EditError::NotFound(id.clone()))?;
        Ok(instance.props().as_lucky_wheel().map(|p| audit(&p.prizes)).unwrap_or_default())
    }
}

/// Top-level merge: patch values replace, `null` deletes.
fn merge_shallow(target: &mut PropertyBag, patch: PropertyBag) {
    for (key, value) in patch {
        if value == Value::Null {
            target.remove(&key);
        } else {
            target.insert(key, value);
        }
    }
}
