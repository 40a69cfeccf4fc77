use serde::Serialize;
use std::slice;

use crate::ast::NodeId;

/// Outcome of resolving one reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "declarations", rename_all = "snake_case")]
pub enum Resolution {
    #[default]
    Unresolved,
    Single(NodeId),
    /// Several declarations in insertion order, e.g. an overload set.
    Ambiguous(Vec<NodeId>),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    pub fn single(&self) -> Option<NodeId> {
        match self {
            Self::Single(declaration) => Some(*declaration),
            _ => None,
        }
    }

    pub fn candidates(&self) -> &[NodeId] {
        match self {
            Self::Unresolved => &[],
            Self::Single(declaration) => slice::from_ref(declaration),
            Self::Ambiguous(declarations) => declarations,
        }
    }

    /// True when `declaration` is the binding or one of the candidates.
    pub fn refers_to(&self, declaration: NodeId) -> bool {
        self.candidates().contains(&declaration)
    }
}
