use thiserror::Error;

use crate::ast::{NodeId, Region};

fn location(region: &Option<Region>) -> String {
    match region {
        Some(region) => region.to_string(),
        None => "unknown location".to_string(),
    }
}

/// Fatal conditions; they abort the offending translation unit only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("malformed tree at node {node} ({}): {message}", location(.region))]
    MalformedTree {
        node: NodeId,
        region: Option<Region>,
        message: String,
    },

    #[error("duplicate declaration of '{name}' at node {duplicate} ({}), first declared at node {first}", location(.region))]
    DuplicateDeclaration {
        name: String,
        first: NodeId,
        duplicate: NodeId,
        region: Option<Region>,
    },

    #[error("AST has no translation unit root")]
    MissingRoot,
}

impl ResolveError {
    pub fn malformed(node: NodeId, region: Option<Region>, message: impl Into<String>) -> Self {
        Self::MalformedTree {
            node,
            region,
            message: message.into(),
        }
    }

    pub fn duplicate(
        name: impl Into<String>,
        first: NodeId,
        duplicate: NodeId,
        region: Option<Region>,
    ) -> Self {
        Self::DuplicateDeclaration {
            name: name.into(),
            first,
            duplicate,
            region,
        }
    }

    /// Node the error points at.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::MalformedTree { node, .. } => Some(*node),
            Self::DuplicateDeclaration { duplicate, .. } => Some(*duplicate),
            Self::MissingRoot => None,
        }
    }
}
