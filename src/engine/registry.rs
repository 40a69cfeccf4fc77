//! First walk: builds the scope tree and registers every declaration into
//! the innermost scope enclosing it. Expressions are never entered.

use tracing::{trace, warn};

use super::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::ast::{Ast, ImplicitOuter, Node, NodeData, NodeId, NodeKind, RecordData};
use crate::config::{DuplicatePolicy, ResolverConfig};
use crate::error::ResolveError;

/// A declaration dropped because its scope level already held the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateDeclaration {
    pub name: String,
    pub first: NodeId,
    pub duplicate: NodeId,
    pub scope: ScopeId,
}

#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub scopes: ScopeTree,
    pub duplicates: Vec<DuplicateDeclaration>,
}

pub fn register(
    ast: &mut Ast,
    root: NodeId,
    config: &ResolverConfig,
) -> Result<Registration, ResolveError> {
    let mut registry = Registry {
        ast,
        config,
        scopes: ScopeTree::new(),
        duplicates: Vec::new(),
    };
    registry.visit(root, None)?;
    Ok(Registration {
        scopes: registry.scopes,
        duplicates: registry.duplicates,
    })
}

/// Last path segment of a possibly qualified record name.
fn simple_name<'n>(name: &'n str, separator: &str) -> &'n str {
    name.rsplit(separator).next().unwrap_or(name)
}

struct Registry<'a> {
    ast: &'a mut Ast,
    config: &'a ResolverConfig,
    scopes: ScopeTree,
    duplicates: Vec<DuplicateDeclaration>,
}

impl Registry<'_> {
    fn node(&self, id: NodeId) -> Result<&Node, ResolveError> {
        self.ast
            .get(id)
            .ok_or_else(|| ResolveError::malformed(id, None, "dangling node id"))
    }

    fn expect_kind(
        &self,
        id: NodeId,
        expected: &[NodeKind],
        owner: NodeId,
    ) -> Result<(), ResolveError> {
        let kind = self.node(id)?.kind();
        if expected.contains(&kind) {
            return Ok(());
        }
        let owner = self.node(owner)?;
        Err(ResolveError::malformed(
            id,
            owner.region(),
            format!("{} cannot contain a {kind} here", owner.kind()),
        ))
    }

    fn push_scope(&mut self, kind: ScopeKind, owner: NodeId, parent: Option<ScopeId>) -> ScopeId {
        let scope = self.scopes.push(kind, owner, parent);
        trace!(scope = %scope, kind = %kind, owner = %owner, "entered scope");
        scope
    }

    fn visit(&mut self, id: NodeId, scope: Option<ScopeId>) -> Result<(), ResolveError> {
        let node = self.node(id)?;
        if node.kind().is_expression() {
            return Ok(());
        }
        let data = node.data().clone();

        match data {
            NodeData::TranslationUnit { declarations } => {
                let unit = self.push_scope(ScopeKind::TranslationUnit, id, scope);
                for declaration in declarations {
                    self.visit(declaration, Some(unit))?;
                }
            }
            NodeData::Record(record) => self.visit_record(id, record, scope)?,
            NodeData::Method(function) | NodeData::Function(function) => {
                self.declare(id, scope)?;
                let function_scope = self.push_scope(ScopeKind::Function, id, scope);
                for parameter in function.parameters {
                    self.expect_kind(parameter, &[NodeKind::ParameterDeclaration], id)?;
                    self.visit(parameter, Some(function_scope))?;
                }
                if let Some(body) = function.body {
                    self.visit(body, Some(function_scope))?;
                }
            }
            NodeData::Field(_) | NodeData::Variable(_) | NodeData::Parameter(_) => {
                self.declare(id, scope)?;
            }
            NodeData::Compound { statements } => {
                let block = self.push_scope(ScopeKind::Block, id, scope);
                for statement in statements {
                    self.visit(statement, Some(block))?;
                }
            }
            NodeData::DeclarationStatement { declarations } => {
                for declaration in declarations {
                    self.visit(declaration, scope)?;
                }
            }
            NodeData::For(data) => {
                let header = self.push_scope(ScopeKind::Loop, id, scope);
                for part in [data.initializer, data.body].into_iter().flatten() {
                    self.visit(part, Some(header))?;
                }
            }
            NodeData::While { body, .. } => {
                let header = self.push_scope(ScopeKind::Loop, id, scope);
                if let Some(body) = body {
                    self.visit(body, Some(header))?;
                }
            }
            NodeData::If(data) => {
                let condition = self.push_scope(ScopeKind::Condition, id, scope);
                for part in [data.condition_declaration, data.then_branch, data.else_branch]
                    .into_iter()
                    .flatten()
                {
                    self.visit(part, Some(condition))?;
                }
            }
            NodeData::Try {
                body,
                catch_clauses,
            } => {
                if let Some(body) = body {
                    self.visit(body, scope)?;
                }
                for clause in catch_clauses {
                    self.expect_kind(clause, &[NodeKind::CatchClause], id)?;
                    self.visit(clause, scope)?;
                }
            }
            NodeData::Catch { parameter, body } => {
                let catch = self.push_scope(ScopeKind::Catch, id, scope);
                if let Some(parameter) = parameter {
                    self.expect_kind(
                        parameter,
                        &[
                            NodeKind::VariableDeclaration,
                            NodeKind::ParameterDeclaration,
                        ],
                        id,
                    )?;
                    self.visit(parameter, Some(catch))?;
                }
                if let Some(body) = body {
                    self.visit(body, Some(catch))?;
                }
            }
            NodeData::Return { .. } => {}
            NodeData::Call(_)
            | NodeData::New { .. }
            | NodeData::Binary { .. }
            | NodeData::Reference(_)
            | NodeData::Member(_)
            | NodeData::Literal(_) => {}
        }
        Ok(())
    }

    fn visit_record(
        &mut self,
        id: NodeId,
        record: RecordData,
        scope: Option<ScopeId>,
    ) -> Result<(), ResolveError> {
        self.declare(id, scope)?;

        let qualified = self.ast.qualified_name(id, self.config.separator());
        self.scopes.insert_record(qualified.clone(), id);
        let record_scope = self.push_scope(ScopeKind::Record, id, scope);

        for &member in &record.members {
            self.expect_kind(
                member,
                &[
                    NodeKind::FieldDeclaration,
                    NodeKind::MethodDeclaration,
                    NodeKind::FunctionDeclaration,
                    NodeKind::RecordDeclaration,
                    NodeKind::VariableDeclaration,
                ],
                id,
            )?;
        }

        self.synthesize_implicit_members(id, &qualified, &record, record_scope);

        for member in record.members {
            self.visit(member, Some(record_scope))?;
        }
        Ok(())
    }

    /// Adds `this` and one enclosing-instance field per enclosing record.
    /// Fields synthesized by an earlier run are reused.
    fn synthesize_implicit_members(
        &mut self,
        id: NodeId,
        qualified: &str,
        record: &RecordData,
        record_scope: ScopeId,
    ) {
        let separator = self.config.separator();

        let this_field = match record.implicit_this {
            Some(field) => field,
            None => self.ast.add_implicit_field(id, "this", qualified),
        };
        self.scopes.insert(record_scope, "this", this_field);

        let enclosing = self.ast.enclosing_record(id);
        let mut outers = Vec::new();
        let mut current = enclosing;
        while let Some(outer) = current {
            let outer_name = self.ast.qualified_name(outer, separator);
            let field_name = format!("{outer_name}{separator}this");
            let field = match record.implicit_outer.iter().find(|o| o.record == outer) {
                Some(existing) => existing.field,
                None => self.ast.add_implicit_field(id, field_name.as_str(), outer_name),
            };
            self.scopes.insert(record_scope, &field_name, field);
            trace!(record = %id, outer = %outer, field = %field, "enclosing-instance field");
            outers.push(ImplicitOuter {
                record: outer,
                field,
            });
            current = self.ast.enclosing_record(outer);
        }

        if let Some(NodeData::Record(data)) = self.ast.data_mut(id) {
            data.enclosing = enclosing;
            data.implicit_this = Some(this_field);
            data.implicit_outer = outers;
        }
    }

    fn declare(&mut self, id: NodeId, scope: Option<ScopeId>) -> Result<(), ResolveError> {
        let Some(scope) = scope else {
            return Ok(());
        };
        let node = self.node(id)?;
        let kind = node.kind();
        let region = node.region();
        let name = match kind {
            NodeKind::RecordDeclaration => simple_name(node.name(), self.config.separator()),
            _ => node.name(),
        }
        .to_string();

        if name.is_empty() {
            trace!(node = %id, kind = %kind, "skipping anonymous declaration");
            return Ok(());
        }

        if kind.is_unique_per_scope() {
            let first = self.scopes.get(scope).and_then(|target| {
                target.lookup(&name).iter().copied().find(|&existing| {
                    self.ast
                        .kind(existing)
                        .is_some_and(|existing| existing.is_unique_per_scope())
                })
            });
            if let Some(first) = first {
                return match self.config.duplicate_policy {
                    DuplicatePolicy::Fatal => Err(ResolveError::duplicate(name, first, id, region)),
                    DuplicatePolicy::KeepFirst => {
                        warn!(
                            name = %name,
                            first = %first,
                            duplicate = %id,
                            "duplicate declaration, keeping the first"
                        );
                        self.duplicates.push(DuplicateDeclaration {
                            name,
                            first,
                            duplicate: id,
                            scope,
                        });
                        Ok(())
                    }
                };
            }
        }

        trace!(name = %name, node = %id, scope = %scope, "registered declaration");
        self.scopes.insert(scope, &name, id);
        Ok(())
    }
}
