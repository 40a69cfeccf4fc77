//! Second walk: binds every reference and member access.
//!
//! Plain names are looked up from the innermost scope outward. A plain name
//! that lands on an instance field of an enclosing record is rewritten into
//! a member access on that record's implicit `this`, or on the innermost
//! record's enclosing-instance field when the field belongs to an outer
//! record. Member names are only looked up in the record the base denotes.
//!
//! Methods and values live in separate namespaces: a value reference walks
//! past scope levels that only hold methods, and a callee walks past levels
//! without a method or function. Such a level is used only when nothing
//! further out matches.

use tracing::trace;

use super::ambiguity::{is_fallback, prefer, AmbiguityPolicy, ReferenceRole};
use super::scope::{Scope, ScopeId, ScopeKind, ScopeTree};
use super::Resolution;
use crate::ast::{Ast, Node, NodeData, NodeId, NodeKind};
use crate::config::ResolverConfig;
use crate::error::ResolveError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub resolved: usize,
    pub implicit_members: usize,
    pub unresolved: Vec<NodeId>,
}

pub fn resolve(
    ast: &mut Ast,
    root: NodeId,
    scopes: &ScopeTree,
    config: &ResolverConfig,
) -> Result<ResolutionOutcome, ResolveError> {
    let Some(root_scope) = scopes.scope_of(root) else {
        return Err(ResolveError::malformed(
            root,
            ast.get(root).and_then(Node::region),
            "translation unit was not registered",
        ));
    };
    let mut resolver = ReferenceResolver {
        ast,
        scopes,
        policy: config.ambiguity_policy,
        separator: config.separator(),
        outcome: ResolutionOutcome::default(),
    };
    resolver.visit(root, root_scope)?;
    Ok(resolver.outcome)
}

/// Strips qualifiers, pointer/reference markers and generic arguments from
/// a declared type, e.g. `const Outer::Inner<T>*` becomes `Outer::Inner`.
pub fn normalize_type(type_name: &str) -> &str {
    let base = match type_name.find('<') {
        Some(index) => &type_name[..index],
        None => type_name,
    };
    let mut base = base.trim();
    for qualifier in ["const ", "volatile ", "struct ", "class ", "final "] {
        base = base.trim_start_matches(qualifier).trim_start();
    }
    base.trim_end_matches(|c: char| matches!(c, '*' | '&' | '[' | ']') || c.is_whitespace())
}

struct ReferenceResolver<'a> {
    ast: &'a mut Ast,
    scopes: &'a ScopeTree,
    policy: AmbiguityPolicy,
    separator: &'static str,
    outcome: ResolutionOutcome,
}

impl ReferenceResolver<'_> {
    fn node(&self, id: NodeId) -> Result<&Node, ResolveError> {
        self.ast
            .get(id)
            .ok_or_else(|| ResolveError::malformed(id, None, "dangling node id"))
    }

    fn visit(&mut self, id: NodeId, scope: ScopeId) -> Result<(), ResolveError> {
        let scope = self.scopes.scope_of(id).unwrap_or(scope);
        let (kind, children, region) = {
            let node = self.node(id)?;
            (node.kind(), node.children(), node.region())
        };

        match kind {
            NodeKind::DeclaredReferenceExpression => {
                self.resolve_name(id, scope, ReferenceRole::Value)
            }
            NodeKind::MemberExpression => self.resolve_member(id, scope, ReferenceRole::Value),
            NodeKind::CallExpression => {
                let Some(NodeData::Call(call)) = self.ast.get(id).map(Node::data) else {
                    return Ok(());
                };
                let arguments = call.arguments.clone();
                let callee = call.callee.ok_or_else(|| {
                    ResolveError::malformed(id, region, "call expression without callee")
                })?;
                self.resolve_callee(callee, scope)?;
                for argument in arguments {
                    self.visit(argument, scope)?;
                }
                Ok(())
            }
            _ => {
                for child in children {
                    self.visit(child, scope)?;
                }
                Ok(())
            }
        }
    }

    fn resolve_callee(&mut self, callee: NodeId, scope: ScopeId) -> Result<(), ResolveError> {
        match self.node(callee)?.kind() {
            NodeKind::DeclaredReferenceExpression => {
                self.resolve_name(callee, scope, ReferenceRole::Callee)
            }
            NodeKind::MemberExpression => {
                self.resolve_member(callee, scope, ReferenceRole::Callee)
            }
            _ => self.visit(callee, scope),
        }
    }

    fn innermost_record(&self, scope: ScopeId) -> Option<NodeId> {
        self.scopes
            .ancestors(scope)
            .find(|(_, candidate)| candidate.kind() == ScopeKind::Record)
            .map(|(_, record)| record.owner())
    }

    fn is_instance_field(&self, declaration: NodeId) -> bool {
        matches!(
            self.ast.get(declaration).map(Node::data),
            Some(NodeData::Field(field)) if !field.is_static && !field.implicit
        )
    }

    /// Receiver to insert for a field of `owner` referenced from inside
    /// `innermost`: its `this`, or its enclosing-instance field for `owner`.
    fn implicit_receiver(&self, owner: NodeId, innermost: NodeId) -> Option<(String, NodeId)> {
        let NodeData::Record(record) = self.ast.get(innermost)?.data() else {
            return None;
        };
        let field = if owner == innermost {
            record.implicit_this?
        } else {
            record
                .implicit_outer
                .iter()
                .find(|outer| outer.record == owner)?
                .field
        };
        Some((self.ast.name(field)?.to_string(), field))
    }

    fn record_outcome(&mut self, id: NodeId, resolution: &Resolution) {
        if resolution.is_resolved() {
            self.outcome.resolved += 1;
        } else {
            self.outcome.unresolved.push(id);
        }
    }

    fn resolve_name(
        &mut self,
        id: NodeId,
        scope: ScopeId,
        role: ReferenceRole,
    ) -> Result<(), ResolveError> {
        let name = self.node(id)?.name().to_string();
        let scopes = self.scopes;

        let mut fallback = None;
        for (scope_id, candidate_scope) in scopes.ancestors(scope) {
            let candidates = prefer(self.ast, candidate_scope.lookup(&name), role);
            if candidates.is_empty() {
                continue;
            }
            if is_fallback(self.ast, &candidates, role) {
                if fallback.is_none() {
                    fallback = Some((scope_id, candidate_scope, candidates));
                }
                continue;
            }
            self.bind_name(id, &name, scope, (scope_id, candidate_scope), candidates, role);
            return Ok(());
        }

        if let Some((scope_id, candidate_scope, candidates)) = fallback {
            self.bind_name(id, &name, scope, (scope_id, candidate_scope), candidates, role);
            return Ok(());
        }

        trace!(name = %name, node = %id, "unresolved name");
        self.record_outcome(id, &Resolution::Unresolved);
        self.ast.set_resolution(id, Resolution::Unresolved);
        Ok(())
    }

    /// Binds `id` to the candidates found at `level`, inserting an implicit
    /// receiver when a value lands on an instance field of a record scope.
    fn bind_name(
        &mut self,
        id: NodeId,
        name: &str,
        scope: ScopeId,
        level: (ScopeId, &Scope),
        candidates: Vec<NodeId>,
        role: ReferenceRole,
    ) {
        let (scope_id, candidate_scope) = level;
        let resolution = self.policy.apply(candidates);

        if candidate_scope.kind() == ScopeKind::Record && role == ReferenceRole::Value {
            let owner = candidate_scope.owner();
            let field = resolution
                .single()
                .filter(|&field| self.is_instance_field(field));
            let receiver = self
                .innermost_record(scope)
                .and_then(|innermost| self.implicit_receiver(owner, innermost));
            if let (Some(field), Some((base_name, base))) = (field, receiver) {
                trace!(
                    name = %name,
                    node = %id,
                    base = %base_name,
                    field = %field,
                    "inserted implicit receiver"
                );
                self.ast.rewrite_as_member(
                    id,
                    &base_name,
                    Resolution::Single(base),
                    Resolution::Single(field),
                );
                self.outcome.implicit_members += 1;
                self.outcome.resolved += 1;
                return;
            }
        }

        trace!(name = %name, node = %id, scope = %scope_id, resolution = ?resolution, "resolved name");
        self.record_outcome(id, &resolution);
        self.ast.set_resolution(id, resolution);
    }

    fn resolve_member(
        &mut self,
        id: NodeId,
        scope: ScopeId,
        role: ReferenceRole,
    ) -> Result<(), ResolveError> {
        let (base, member, region) = {
            let node = self.node(id)?;
            match node.data() {
                NodeData::Member(data) => (data.base, data.member, node.region()),
                _ => return Ok(()),
            }
        };
        let base = base
            .ok_or_else(|| ResolveError::malformed(id, region, "member expression without base"))?;
        let member = member.ok_or_else(|| {
            ResolveError::malformed(id, region, "member expression without member")
        })?;
        if self.node(member)?.kind() != NodeKind::DeclaredReferenceExpression {
            return Err(ResolveError::malformed(
                member,
                region,
                "member of a member expression must be a plain reference",
            ));
        }

        let record = self.resolve_base(base, scope)?;
        let name = self.node(member)?.name().to_string();
        let scopes = self.scopes;
        let record_scope = record
            .and_then(|record| scopes.scope_of(record))
            .and_then(|record_scope| scopes.get(record_scope));

        let resolution = match record_scope {
            Some(record_scope) => self
                .policy
                .apply(prefer(self.ast, record_scope.lookup(&name), role)),
            None => Resolution::Unresolved,
        };

        trace!(name = %name, node = %id, record = ?record, resolution = ?resolution, "resolved member");
        self.record_outcome(member, &resolution);
        self.ast.set_resolution(member, resolution.clone());
        self.ast.set_resolution(id, resolution);
        Ok(())
    }

    /// Resolves the base of a member access and returns the record whose
    /// scope the member is looked up in.
    fn resolve_base(&mut self, base: NodeId, scope: ScopeId) -> Result<Option<NodeId>, ResolveError> {
        let (kind, created_type) = {
            let node = self.node(base)?;
            let created_type = match node.data() {
                NodeData::New { type_name, .. } => Some(type_name.clone()),
                _ => None,
            };
            (node.kind(), created_type)
        };
        match (kind, created_type) {
            (NodeKind::DeclaredReferenceExpression, _) => {
                self.resolve_name(base, scope, ReferenceRole::Value)?;
                Ok(self.record_of(base, scope))
            }
            (NodeKind::MemberExpression, _) => {
                self.resolve_member(base, scope, ReferenceRole::Value)?;
                Ok(self.record_of(base, scope))
            }
            (_, Some(type_name)) => {
                self.visit(base, scope)?;
                Ok(self.resolve_type(&type_name, scope))
            }
            _ => {
                self.visit(base, scope)?;
                Ok(None)
            }
        }
    }

    /// Record denoted by a resolved expression: the record itself for static
    /// access, otherwise the declared type of the bound declaration.
    fn record_of(&self, expression: NodeId, scope: ScopeId) -> Option<NodeId> {
        let declaration = self.ast.resolution(expression)?.single()?;
        match self.ast.get(declaration)?.data() {
            NodeData::Record(_) => Some(declaration),
            data => self.resolve_type(data.type_name()?, scope),
        }
    }

    fn resolve_type(&self, type_name: &str, scope: ScopeId) -> Option<NodeId> {
        let normalized = normalize_type(type_name);
        if normalized.is_empty() {
            return None;
        }
        if let Some(record) = self.scopes.record_named(normalized) {
            return Some(record);
        }
        let simple = normalized.rsplit(self.separator).next().unwrap_or(normalized);
        self.scopes.ancestors(scope).find_map(|(_, candidate)| {
            candidate
                .lookup(simple)
                .iter()
                .copied()
                .find(|&declaration| {
                    self.ast.kind(declaration) == Some(NodeKind::RecordDeclaration)
                })
        })
    }
}
