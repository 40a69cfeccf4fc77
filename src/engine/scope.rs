use std::collections::HashMap;
use std::fmt;

use crate::ast::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    TranslationUnit,
    Record,
    Function,
    Block,
    /// For and while headers.
    Loop,
    /// If-statement condition declarations.
    Condition,
    Catch,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TranslationUnit => "translation_unit",
            Self::Record => "record",
            Self::Function => "function",
            Self::Block => "block",
            Self::Loop => "loop",
            Self::Condition => "condition",
            Self::Catch => "catch",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Scope {
    kind: ScopeKind,
    owner: NodeId,
    parent: Option<ScopeId>,
    symbols: HashMap<String, Vec<NodeId>>,
}

impl Scope {
    fn new(kind: ScopeKind, owner: NodeId, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            owner,
            parent,
            symbols: HashMap::new(),
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// The node that introduces this scope.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Declarations registered under `name` at this level, in insertion order.
    pub fn lookup(&self, name: &str) -> &[NodeId] {
        self.symbols.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn symbols(&self) -> impl Iterator<Item = (&str, &[NodeId])> {
        self.symbols
            .iter()
            .map(|(name, declarations)| (name.as_str(), declarations.as_slice()))
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.values().map(Vec::len).sum()
    }

    pub(crate) fn insert(&mut self, name: &str, declaration: NodeId) {
        self.symbols
            .entry(name.to_string())
            .or_default()
            .push(declaration);
    }
}

/// Scope tree of one translation unit. Parent links are indices into the
/// same tree, so the tree owns every scope exactly once.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    by_owner: HashMap<NodeId, ScopeId>,
    declared_in: HashMap<NodeId, ScopeId>,
    records: HashMap<String, NodeId>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<ScopeId> {
        (!self.scopes.is_empty()).then_some(ScopeId(0))
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Scope introduced by `node`, if it introduces one.
    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.by_owner.get(&node).copied()
    }

    /// Scope a declaration was registered into.
    pub fn declared_in(&self, declaration: NodeId) -> Option<ScopeId> {
        self.declared_in.get(&declaration).copied()
    }

    /// Record by fully qualified name.
    pub fn record_named(&self, qualified_name: &str) -> Option<NodeId> {
        self.records.get(qualified_name).copied()
    }

    /// `id` followed by each enclosing scope up to the translation unit.
    pub fn ancestors(&self, id: ScopeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    pub(crate) fn push(&mut self, kind: ScopeKind, owner: NodeId, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, owner, parent));
        self.by_owner.insert(owner, id);
        id
    }

    pub(crate) fn insert(&mut self, scope: ScopeId, name: &str, declaration: NodeId) {
        if let Some(target) = self.scopes.get_mut(scope.index()) {
            target.insert(name, declaration);
            self.declared_in.insert(declaration, scope);
        }
    }

    pub(crate) fn insert_record(&mut self, qualified_name: String, record: NodeId) {
        self.records.entry(qualified_name).or_insert(record);
    }
}

pub struct Ancestors<'a> {
    tree: &'a ScopeTree,
    next: Option<ScopeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (ScopeId, &'a Scope);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let scope = self.tree.get(id)?;
        self.next = scope.parent();
        Some((id, scope))
    }
}
