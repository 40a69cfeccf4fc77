//! Arena-backed AST consumed and annotated by the resolution pass.
//!
//! Nodes are addressed by `NodeId`. Ownership is a tree: every node payload
//! lists the ids of the children it owns, and each child records its parent.
//! Resolution links stored on reference nodes are plain ids into the same
//! arena and never own anything.

mod builder;
mod kinds;
pub mod syntax;

pub use kinds::{
    CallData, FieldData, ForData, FunctionData, IfData, ImplicitOuter, LiteralValue, MemberData,
    NodeData, NodeKind, RecordData, RecordKind, ReferenceData, VariableData,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::engine::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source region of a node. Lines and columns start at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Region {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Region {
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    pub fn point(line: u32, column: u32) -> Self {
        Self::new(line, column, line, column)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_column)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    region: Option<Region>,
    parent: Option<NodeId>,
    data: NodeData,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Declared or referenced name. Empty for anonymous nodes such as blocks.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.data.children()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// The translation unit, once one has been built.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::name)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(Node::kind)
    }

    /// Resolution outcome of a reference or member expression.
    pub fn resolution(&self, id: NodeId) -> Option<&Resolution> {
        match self.get(id)?.data() {
            NodeData::Reference(reference) => Some(&reference.resolved),
            NodeData::Member(member) => Some(&member.resolved),
            _ => None,
        }
    }

    pub fn set_region(&mut self, id: NodeId, region: Region) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.region = Some(region);
        }
    }

    /// Nearest record strictly enclosing `id`.
    pub fn enclosing_record(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.parent();
        while let Some(candidate) = current {
            let node = self.get(candidate)?;
            if node.kind() == NodeKind::RecordDeclaration {
                return Some(candidate);
            }
            current = node.parent();
        }
        None
    }

    /// Record name qualified by its enclosing records, e.g. `Outer.Inner`.
    pub fn qualified_name(&self, record: NodeId, separator: &str) -> String {
        let name = self.name(record).unwrap_or_default().to_string();
        if name.contains(separator) {
            return name;
        }
        match self.enclosing_record(record) {
            Some(outer) => format!("{}{separator}{name}", self.qualified_name(outer, separator)),
            None => name,
        }
    }

    pub(crate) fn alloc(&mut self, name: impl Into<String>, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for child in data.children() {
            if let Some(node) = self.nodes.get_mut(child.index()) {
                node.parent = Some(id);
            }
        }
        if let NodeData::Record(record) = &data {
            for member in &record.members {
                if let Some(Node {
                    data: NodeData::Field(field),
                    ..
                }) = self.nodes.get_mut(member.index())
                {
                    field.record = Some(id);
                }
            }
        }
        if matches!(data, NodeData::TranslationUnit { .. }) {
            self.root = Some(id);
        }
        self.nodes.push(Node {
            id,
            name: name.into(),
            region: None,
            parent: None,
            data,
        });
        id
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.index()).map(|node| &mut node.data)
    }

    /// Stores `resolution` on a reference or member expression. Other nodes
    /// are left untouched.
    pub(crate) fn set_resolution(&mut self, id: NodeId, resolution: Resolution) {
        match self.data_mut(id) {
            Some(NodeData::Reference(reference)) => reference.resolved = resolution,
            Some(NodeData::Member(member)) => member.resolved = resolution,
            _ => {}
        }
    }

    /// Synthesizes a compiler-implicit field owned by `record`.
    pub(crate) fn add_implicit_field(
        &mut self,
        record: NodeId,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> NodeId {
        let field = self.alloc(
            name,
            NodeData::Field(FieldData {
                type_name: Some(type_name.into()),
                is_static: false,
                implicit: true,
                record: Some(record),
                initializer: None,
            }),
        );
        if let Some(node) = self.nodes.get_mut(field.index()) {
            node.parent = Some(record);
        }
        field
    }

    /// Turns the plain reference `id` into an implicit member access
    /// `<base_name>.<name>`, keeping its id so parents stay untouched.
    pub(crate) fn rewrite_as_member(
        &mut self,
        id: NodeId,
        base_name: &str,
        base: Resolution,
        member: Resolution,
    ) -> Option<(NodeId, NodeId)> {
        let (name, region) = {
            let node = self.get(id)?;
            (node.name.clone(), node.region)
        };

        let base_id = self.alloc(base_name, NodeData::Reference(ReferenceData::resolved(base)));
        let member_id = self.alloc(
            name,
            NodeData::Reference(ReferenceData::resolved(member.clone())),
        );
        for synthesized in [base_id, member_id] {
            if let Some(node) = self.nodes.get_mut(synthesized.index()) {
                node.parent = Some(id);
                node.region = region;
            }
        }

        let node = self.nodes.get_mut(id.index())?;
        node.data = NodeData::Member(MemberData {
            base: Some(base_id),
            member: Some(member_id),
            implicit_base: true,
            resolved: member,
        });
        Some((base_id, member_id))
    }
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
