//! Element store: the arena-backed document tree.
//!
//! This module owns the generic element machinery. Elements are addressed
//! by [`ElementId`], carry a kind tag from the closed [`ElementKind`] set,
//! and hang off a single [`Document`] arena. The typed handles and
//! domain-specific operations over this store live in [`crate::model`].

mod document;
mod element;
mod error;

pub use document::Document;
pub use element::{Element, ElementId, ElementKind};
pub use error::TreeError;
