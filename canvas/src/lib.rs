//! Document model and canvas engine for the H5 page studio.
//!
//! A page is an ordered list of typed, configured components on a fixed-size
//! mobile canvas. This crate owns that model and everything that changes it:
//! placing, moving, resizing, reordering, duplicating and deleting
//! components, editing their properties, persisting and previewing the page,
//! and the weighted draw behind the lucky-wheel widget. Hosts (the CLI, a
//! browser shell) own rendering, storage transport and the clock.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Registry of placeable component types and their defaults |
//! | [`props`] | Typed property records per component type |
//! | [`doc`] | Page document, component instances, and the mutation entry point |
//! | [`engine`] | Editing session: [`engine::CanvasEngine`] with selection and dirty state |
//! | [`binding`] | Property panel patches on the engine |
//! | [`hit`] | Hit-testing placed components |
//! | [`codec`] | Persisted JSON form, all-or-nothing load |
//! | [`preview`] | Read-only preview snapshots and the handoff channel |
//! | [`wheel`] | Prize selection, spin math, and the wheel draw lifecycle |
//! | [`geom`] | Offsets, sizes, positions, clamping |
//! | [`error`] | The [`error::ErrorCode`] trait |
//! | [`consts`] | Shared defaults |

pub mod binding;
pub mod catalog;
pub mod codec;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod preview;
pub mod props;
pub mod wheel;
