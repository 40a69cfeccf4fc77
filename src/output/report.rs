use serde::Serialize;

use crate::ast::{Ast, NodeData, NodeId, NodeKind};
use crate::engine::{Resolution, ResolvedUnit};
use crate::error::ResolveError;
use crate::query;

#[derive(Debug, Clone, Serialize)]
pub struct DeclarationRef {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl DeclarationRef {
    fn new(ast: &Ast, id: NodeId) -> Option<Self> {
        let node = ast.get(id)?;
        Some(Self {
            id,
            kind: node.kind(),
            name: node.name().to_string(),
            line: node.region().map(|region| region.start_line),
        })
    }
}

/// One reference or member access and what it was bound to.
#[derive(Debug, Clone, Serialize)]
pub struct Binding {
    pub node: NodeId,
    pub kind: NodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub implicit_base: bool,
    pub resolution: Resolution,
    pub declarations: Vec<DeclarationRef>,
}

impl Binding {
    fn new(ast: &Ast, id: NodeId) -> Option<Self> {
        let node = ast.get(id)?;
        let resolution = ast.resolution(id)?.clone();
        let declarations = resolution
            .candidates()
            .iter()
            .filter_map(|&declaration| DeclarationRef::new(ast, declaration))
            .collect();
        Some(Self {
            node: id,
            kind: node.kind(),
            name: node.name().to_string(),
            line: node.region().map(|region| region.start_line),
            column: node.region().map(|region| region.start_column),
            implicit_base: node.data().is_implicit(),
            resolution,
            declarations,
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_resolved()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    pub name: String,
    pub first: NodeId,
    pub duplicate: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitReport {
    pub file: String,
    pub translation_unit: String,
    pub resolved: usize,
    pub implicit_members: usize,
    pub bindings: Vec<Binding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplicates: Vec<DuplicateReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// References that stand on their own. The member half of a member access
/// carries the same binding as its parent and is folded into it.
fn reported_references(ast: &Ast, root: NodeId) -> Vec<NodeId> {
    let mut references: Vec<NodeId> = query::flatten(ast, root)
        .into_iter()
        .filter(|&id| {
            let Some(node) = ast.get(id) else {
                return false;
            };
            if !node.kind().is_reference() {
                return false;
            }
            let is_member_half = node.parent().and_then(|parent| ast.get(parent)).is_some_and(
                |parent| matches!(parent.data(), NodeData::Member(member) if member.member == Some(id)),
            );
            !is_member_half
        })
        .collect();
    query::sort_by_position(ast, &mut references);
    references
}

impl UnitReport {
    pub fn from_unit(file: impl Into<String>, ast: &Ast, unit: &ResolvedUnit) -> Self {
        let root = unit.root();
        let bindings = reported_references(ast, root)
            .into_iter()
            .filter_map(|id| Binding::new(ast, id))
            .collect();
        let duplicates = unit
            .duplicates()
            .iter()
            .map(|duplicate| DuplicateReport {
                name: duplicate.name.clone(),
                first: duplicate.first,
                duplicate: duplicate.duplicate,
                line: ast
                    .get(duplicate.duplicate)
                    .and_then(|node| node.region())
                    .map(|region| region.start_line),
            })
            .collect();

        Self {
            file: file.into(),
            translation_unit: ast.name(root).unwrap_or_default().to_string(),
            resolved: unit.resolved_count(),
            implicit_members: unit.implicit_members(),
            bindings,
            duplicates,
            unresolved: unit.unresolved().to_vec(),
            error: None,
        }
    }

    pub fn from_error(file: impl Into<String>, error: &ResolveError) -> Self {
        Self::failed(file, error.to_string())
    }

    pub fn failed(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}
