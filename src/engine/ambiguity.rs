use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Resolution;
use crate::ast::{Ast, NodeId, NodeKind};

/// What to bind when lookup yields more than one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
    /// Expose every candidate as `Resolution::Ambiguous`.
    #[default]
    KeepAll,
    /// Bind the first candidate in insertion order.
    First,
    /// Leave the reference unresolved.
    Reject,
}

impl AmbiguityPolicy {
    pub fn apply(self, mut candidates: Vec<NodeId>) -> Resolution {
        match candidates.len() {
            0 => Resolution::Unresolved,
            1 => Resolution::Single(candidates.remove(0)),
            _ => match self {
                Self::KeepAll => Resolution::Ambiguous(candidates),
                Self::First => Resolution::Single(candidates.remove(0)),
                Self::Reject => Resolution::Unresolved,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeepAll => "keep-all",
            Self::First => "first",
            Self::Reject => "reject",
        }
    }
}

/// Syntactic position of the reference being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceRole {
    Value,
    Callee,
}

fn rank(kind: NodeKind, role: ReferenceRole) -> u8 {
    match role {
        ReferenceRole::Value => match kind {
            NodeKind::VariableDeclaration
            | NodeKind::ParameterDeclaration
            | NodeKind::FieldDeclaration => 0,
            NodeKind::RecordDeclaration => 1,
            _ => 2,
        },
        ReferenceRole::Callee => {
            if kind.is_callable() {
                0
            } else {
                1
            }
        }
    }
}

/// Keeps the candidates of the best-ranked declaration kind for `role`,
/// preserving insertion order.
pub fn prefer(ast: &Ast, candidates: &[NodeId], role: ReferenceRole) -> Vec<NodeId> {
    let ranked: Vec<(NodeId, u8)> = candidates
        .iter()
        .filter_map(|&id| ast.kind(id).map(|kind| (id, rank(kind, role))))
        .collect();
    let Some(best) = ranked.iter().map(|(_, rank)| *rank).min() else {
        return Vec::new();
    };
    ranked
        .into_iter()
        .filter(|(_, rank)| *rank == best)
        .map(|(id, _)| id)
        .collect()
}

/// Whether the preferred candidates are only a fallback for `role`: methods
/// for a value, anything but a method or function for a callee. Lookup keeps
/// walking outward past such a scope level.
pub fn is_fallback(ast: &Ast, preferred: &[NodeId], role: ReferenceRole) -> bool {
    preferred
        .first()
        .and_then(|&id| ast.kind(id))
        .is_some_and(|kind| match role {
            ReferenceRole::Value => kind.is_callable(),
            ReferenceRole::Callee => !kind.is_callable(),
        })
}
