//! Errors reported by the element store.

use crate::tree::{ElementId, ElementKind};
use std::fmt;

/// Errors that structural operations on a [`Document`](crate::tree::Document)
/// can report.
///
/// These cover malformed requests against the store itself. Unresolved
/// name references are never structural errors; resolution queries report
/// those through their own return types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The referenced element is not present in the document.
    MissingElement(ElementId),
    /// A typed handle was requested for an element of a different kind.
    KindMismatch {
        expected: ElementKind,
        found: ElementKind,
    },
    /// The requested child kind is not allowed under the parent kind.
    InvalidChild {
        parent: ElementKind,
        child: ElementKind,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::MissingElement(id) => {
                write!(f, "element {} is no longer present in the document", id)
            }
            TreeError::KindMismatch { expected, found } => {
                write!(f, "expected a {} element, found a {}", expected, found)
            }
            TreeError::InvalidChild { parent, child } => {
                write!(f, "a {} element cannot contain a {}", parent, child)
            }
        }
    }
}

impl std::error::Error for TreeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_kind_mismatch() {
        let err = TreeError::KindMismatch {
            expected: ElementKind::Material,
            found: ElementKind::NodeGraph,
        };
        assert_eq!(err.to_string(), "expected a material element, found a nodegraph");
    }

    #[test]
    fn display_invalid_child() {
        let err = TreeError::InvalidChild {
            parent: ElementKind::Material,
            child: ElementKind::Node,
        };
        assert_eq!(err.to_string(), "a material element cannot contain a node");
    }
}
