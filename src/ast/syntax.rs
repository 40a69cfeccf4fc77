//! JSON hand-off format produced by parser front ends.
//!
//! A document is a nested tree of `kind`-tagged nodes rooted at a
//! translation unit. Lowering turns it into an `Ast` arena, children first.
//!
//! ```json
//! { "kind": "translation_unit", "name": "Main.java",
//!   "declarations": [ { "kind": "record", "name": "Main", "members": [] } ] }
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::kinds::{ForData, IfData, LiteralValue, NodeKind, RecordKind};
use super::{Ast, NodeId, Region};
use crate::error::InputError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxNode {
    #[serde(flatten)]
    pub kind: SyntaxKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

type Child = Option<Box<SyntaxNode>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyntaxKind {
    TranslationUnit {
        #[serde(default)]
        name: String,
        #[serde(default)]
        declarations: Vec<SyntaxNode>,
    },
    Record {
        name: String,
        #[serde(default)]
        record_kind: RecordKind,
        #[serde(default)]
        members: Vec<SyntaxNode>,
    },
    Method {
        name: String,
        #[serde(default)]
        is_static: bool,
        #[serde(default)]
        parameters: Vec<SyntaxNode>,
        #[serde(default)]
        body: Child,
    },
    Function {
        name: String,
        #[serde(default)]
        parameters: Vec<SyntaxNode>,
        #[serde(default)]
        body: Child,
    },
    Field {
        name: String,
        #[serde(default)]
        type_name: Option<String>,
        #[serde(default)]
        is_static: bool,
        #[serde(default)]
        initializer: Child,
    },
    Variable {
        name: String,
        #[serde(default)]
        type_name: Option<String>,
        #[serde(default)]
        initializer: Child,
    },
    Parameter {
        name: String,
        #[serde(default)]
        type_name: Option<String>,
    },
    Compound {
        #[serde(default)]
        statements: Vec<SyntaxNode>,
    },
    DeclarationStatement {
        #[serde(default)]
        declarations: Vec<SyntaxNode>,
    },
    Return {
        #[serde(default)]
        value: Child,
    },
    For {
        #[serde(default)]
        initializer: Child,
        #[serde(default)]
        condition: Child,
        #[serde(default)]
        iteration: Child,
        #[serde(default)]
        body: Child,
    },
    While {
        #[serde(default)]
        condition: Child,
        #[serde(default)]
        body: Child,
    },
    If {
        #[serde(default)]
        condition_declaration: Child,
        #[serde(default)]
        condition: Child,
        #[serde(default)]
        then_branch: Child,
        #[serde(default)]
        else_branch: Child,
    },
    Try {
        #[serde(default)]
        body: Child,
        #[serde(default)]
        catch_clauses: Vec<SyntaxNode>,
    },
    Catch {
        #[serde(default)]
        parameter: Child,
        #[serde(default)]
        body: Child,
    },
    Call {
        name: String,
        /// Defaults to a plain reference to `name`.
        #[serde(default)]
        callee: Child,
        #[serde(default)]
        arguments: Vec<SyntaxNode>,
    },
    New {
        type_name: String,
        #[serde(default)]
        arguments: Vec<SyntaxNode>,
    },
    Binary {
        operator: String,
        #[serde(default)]
        lhs: Child,
        #[serde(default)]
        rhs: Child,
    },
    Reference {
        name: String,
    },
    Member {
        #[serde(default)]
        base: Child,
        #[serde(default)]
        member: Option<String>,
    },
    Literal {
        value: LiteralValue,
    },
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            kind,
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    fn region(&self) -> Option<Region> {
        self.line
            .map(|line| Region::point(line, self.column.unwrap_or(1)))
    }

    /// Lowers this subtree into `ast`, returning the id of its root.
    pub fn lower(self, ast: &mut Ast) -> NodeId {
        let region = self.region();
        let id = self.kind.lower(ast);
        if let Some(region) = region {
            ast.set_region(id, region);
        }
        id
    }
}

fn lower_all(nodes: Vec<SyntaxNode>, ast: &mut Ast) -> Vec<NodeId> {
    nodes.into_iter().map(|node| node.lower(ast)).collect()
}

fn lower_child(node: Child, ast: &mut Ast) -> Option<NodeId> {
    node.map(|node| node.lower(ast))
}

impl SyntaxKind {
    fn lower(self, ast: &mut Ast) -> NodeId {
        match self {
            Self::TranslationUnit { name, declarations } => {
                let declarations = lower_all(declarations, ast);
                ast.translation_unit(&name, declarations)
            }
            Self::Record {
                name,
                record_kind,
                members,
            } => {
                let members = lower_all(members, ast);
                ast.record(&name, record_kind, members)
            }
            Self::Method {
                name,
                is_static,
                parameters,
                body,
            } => {
                let parameters = lower_all(parameters, ast);
                let body = lower_child(body, ast);
                if is_static {
                    ast.static_method(&name, parameters, body)
                } else {
                    ast.method(&name, parameters, body)
                }
            }
            Self::Function {
                name,
                parameters,
                body,
            } => {
                let parameters = lower_all(parameters, ast);
                let body = lower_child(body, ast);
                ast.function(&name, parameters, body)
            }
            Self::Field {
                name,
                type_name,
                is_static,
                initializer,
            } => {
                let initializer = lower_child(initializer, ast);
                if is_static {
                    ast.static_field(&name, type_name.as_deref(), initializer)
                } else {
                    ast.field(&name, type_name.as_deref(), initializer)
                }
            }
            Self::Variable {
                name,
                type_name,
                initializer,
            } => {
                let initializer = lower_child(initializer, ast);
                ast.variable(&name, type_name.as_deref(), initializer)
            }
            Self::Parameter { name, type_name } => ast.parameter(&name, type_name.as_deref()),
            Self::Compound { statements } => {
                let statements = lower_all(statements, ast);
                ast.compound(statements)
            }
            Self::DeclarationStatement { declarations } => {
                let declarations = lower_all(declarations, ast);
                ast.declaration_statement(declarations)
            }
            Self::Return { value } => {
                let value = lower_child(value, ast);
                ast.return_statement(value)
            }
            Self::For {
                initializer,
                condition,
                iteration,
                body,
            } => {
                let data = ForData {
                    initializer: lower_child(initializer, ast),
                    condition: lower_child(condition, ast),
                    iteration: lower_child(iteration, ast),
                    body: lower_child(body, ast),
                };
                ast.for_statement(data)
            }
            Self::While { condition, body } => {
                let condition = lower_child(condition, ast);
                let body = lower_child(body, ast);
                ast.while_statement(condition, body)
            }
            Self::If {
                condition_declaration,
                condition,
                then_branch,
                else_branch,
            } => {
                let data = IfData {
                    condition_declaration: lower_child(condition_declaration, ast),
                    condition: lower_child(condition, ast),
                    then_branch: lower_child(then_branch, ast),
                    else_branch: lower_child(else_branch, ast),
                };
                ast.if_statement(data)
            }
            Self::Try {
                body,
                catch_clauses,
            } => {
                let body = lower_child(body, ast);
                let catch_clauses = lower_all(catch_clauses, ast);
                ast.try_statement(body, catch_clauses)
            }
            Self::Catch { parameter, body } => {
                let parameter = lower_child(parameter, ast);
                let body = lower_child(body, ast);
                ast.catch_clause(parameter, body)
            }
            Self::Call {
                name,
                callee,
                arguments,
            } => {
                let callee = match callee {
                    Some(callee) => callee.lower(ast),
                    None => ast.reference(&name),
                };
                let arguments = lower_all(arguments, ast);
                ast.call_with_callee(&name, Some(callee), arguments)
            }
            Self::New {
                type_name,
                arguments,
            } => {
                let arguments = lower_all(arguments, ast);
                ast.new_expression(&type_name, arguments)
            }
            Self::Binary { operator, lhs, rhs } => {
                let lhs = lower_child(lhs, ast);
                let rhs = lower_child(rhs, ast);
                ast.alloc(
                    operator.clone(),
                    super::NodeData::Binary { operator, lhs, rhs },
                )
            }
            Self::Reference { name } => ast.reference(&name),
            Self::Member { base, member } => {
                let base = lower_child(base, ast);
                let name = member.unwrap_or_default();
                let member = (!name.is_empty()).then(|| ast.reference(&name));
                ast.member_expression(&name, base, member)
            }
            Self::Literal { value } => ast.literal(value),
        }
    }
}

impl Ast {
    /// Lowers a syntax document whose root must be a translation unit.
    pub fn from_syntax(root: SyntaxNode) -> Result<Ast, InputError> {
        if !matches!(root.kind, SyntaxKind::TranslationUnit { .. }) {
            return Err(InputError::unexpected_root(root.kind.tag()));
        }
        let mut ast = Ast::new();
        let unit = root.lower(&mut ast);
        trace!(nodes = ast.len(), unit = %unit, "lowered syntax document");
        Ok(ast)
    }

    pub fn from_json(source_name: &str, content: &str) -> Result<Ast, InputError> {
        let root: SyntaxNode = serde_json::from_str(content)
            .map_err(|e| InputError::invalid_document(source_name, e.to_string()))?;
        Self::from_syntax(root)
    }
}

impl SyntaxKind {
    fn tag(&self) -> NodeKind {
        match self {
            Self::TranslationUnit { .. } => NodeKind::TranslationUnit,
            Self::Record { .. } => NodeKind::RecordDeclaration,
            Self::Method { .. } => NodeKind::MethodDeclaration,
            Self::Function { .. } => NodeKind::FunctionDeclaration,
            Self::Field { .. } => NodeKind::FieldDeclaration,
            Self::Variable { .. } => NodeKind::VariableDeclaration,
            Self::Parameter { .. } => NodeKind::ParameterDeclaration,
            Self::Compound { .. } => NodeKind::CompoundStatement,
            Self::DeclarationStatement { .. } => NodeKind::DeclarationStatement,
            Self::Return { .. } => NodeKind::ReturnStatement,
            Self::For { .. } => NodeKind::ForStatement,
            Self::While { .. } => NodeKind::WhileStatement,
            Self::If { .. } => NodeKind::IfStatement,
            Self::Try { .. } => NodeKind::TryStatement,
            Self::Catch { .. } => NodeKind::CatchClause,
            Self::Call { .. } => NodeKind::CallExpression,
            Self::New { .. } => NodeKind::NewExpression,
            Self::Binary { .. } => NodeKind::BinaryOperator,
            Self::Reference { .. } => NodeKind::DeclaredReferenceExpression,
            Self::Member { .. } => NodeKind::MemberExpression,
            Self::Literal { .. } => NodeKind::Literal,
        }
    }
}
