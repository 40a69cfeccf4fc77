use serde::{Deserialize, Serialize};
use std::fmt;

use super::NodeId;
use crate::engine::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    TranslationUnit,
    RecordDeclaration,
    MethodDeclaration,
    FunctionDeclaration,
    FieldDeclaration,
    VariableDeclaration,
    ParameterDeclaration,
    CompoundStatement,
    DeclarationStatement,
    ReturnStatement,
    ForStatement,
    WhileStatement,
    IfStatement,
    TryStatement,
    CatchClause,
    CallExpression,
    NewExpression,
    BinaryOperator,
    DeclaredReferenceExpression,
    MemberExpression,
    Literal,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TranslationUnit => "TranslationUnit",
            Self::RecordDeclaration => "RecordDeclaration",
            Self::MethodDeclaration => "MethodDeclaration",
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::FieldDeclaration => "FieldDeclaration",
            Self::VariableDeclaration => "VariableDeclaration",
            Self::ParameterDeclaration => "ParameterDeclaration",
            Self::CompoundStatement => "CompoundStatement",
            Self::DeclarationStatement => "DeclarationStatement",
            Self::ReturnStatement => "ReturnStatement",
            Self::ForStatement => "ForStatement",
            Self::WhileStatement => "WhileStatement",
            Self::IfStatement => "IfStatement",
            Self::TryStatement => "TryStatement",
            Self::CatchClause => "CatchClause",
            Self::CallExpression => "CallExpression",
            Self::NewExpression => "NewExpression",
            Self::BinaryOperator => "BinaryOperator",
            Self::DeclaredReferenceExpression => "DeclaredReferenceExpression",
            Self::MemberExpression => "MemberExpression",
            Self::Literal => "Literal",
        }
    }

    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Self::RecordDeclaration
                | Self::MethodDeclaration
                | Self::FunctionDeclaration
                | Self::FieldDeclaration
                | Self::VariableDeclaration
                | Self::ParameterDeclaration
        )
    }

    /// Declarations that must be unique within one scope level.
    pub fn is_unique_per_scope(&self) -> bool {
        matches!(
            self,
            Self::RecordDeclaration
                | Self::FieldDeclaration
                | Self::VariableDeclaration
                | Self::ParameterDeclaration
        )
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::MethodDeclaration | Self::FunctionDeclaration)
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::DeclaredReferenceExpression | Self::MemberExpression
        )
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Self::CallExpression
                | Self::NewExpression
                | Self::BinaryOperator
                | Self::DeclaredReferenceExpression
                | Self::MemberExpression
                | Self::Literal
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[default]
    Class,
    Struct,
    Interface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImplicitOuter {
    /// Enclosing record whose instance the field refers to.
    pub record: NodeId,
    pub field: NodeId,
}

#[derive(Debug, Clone, Default)]
pub struct RecordData {
    pub kind: RecordKind,
    /// Fields, methods and nested records in declaration order.
    pub members: Vec<NodeId>,
    pub enclosing: Option<NodeId>,
    pub implicit_this: Option<NodeId>,
    pub implicit_outer: Vec<ImplicitOuter>,
}

#[derive(Debug, Clone, Default)]
pub struct FunctionData {
    pub is_static: bool,
    pub parameters: Vec<NodeId>,
    pub body: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct FieldData {
    pub type_name: Option<String>,
    pub is_static: bool,
    /// Synthesized `this` or enclosing-instance field.
    pub implicit: bool,
    pub record: Option<NodeId>,
    pub initializer: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct VariableData {
    pub type_name: Option<String>,
    pub initializer: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct ForData {
    pub initializer: Option<NodeId>,
    pub condition: Option<NodeId>,
    pub iteration: Option<NodeId>,
    pub body: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct IfData {
    /// C++ `if (int x = f())`.
    pub condition_declaration: Option<NodeId>,
    pub condition: Option<NodeId>,
    pub then_branch: Option<NodeId>,
    pub else_branch: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct CallData {
    pub callee: Option<NodeId>,
    pub arguments: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub resolved: Resolution,
}

impl ReferenceData {
    pub fn resolved(resolved: Resolution) -> Self {
        Self { resolved }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemberData {
    pub base: Option<NodeId>,
    pub member: Option<NodeId>,
    /// Base was inserted by the resolver rather than written in source.
    pub implicit_base: bool,
    /// Mirrors the resolution of `member`.
    pub resolved: Resolution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeData {
    TranslationUnit {
        declarations: Vec<NodeId>,
    },
    Record(RecordData),
    Method(FunctionData),
    Function(FunctionData),
    Field(FieldData),
    Variable(VariableData),
    Parameter(VariableData),
    Compound {
        statements: Vec<NodeId>,
    },
    DeclarationStatement {
        declarations: Vec<NodeId>,
    },
    Return {
        value: Option<NodeId>,
    },
    For(ForData),
    While {
        condition: Option<NodeId>,
        body: Option<NodeId>,
    },
    If(IfData),
    Try {
        body: Option<NodeId>,
        catch_clauses: Vec<NodeId>,
    },
    Catch {
        parameter: Option<NodeId>,
        body: Option<NodeId>,
    },
    Call(CallData),
    New {
        type_name: String,
        arguments: Vec<NodeId>,
    },
    Binary {
        operator: String,
        lhs: Option<NodeId>,
        rhs: Option<NodeId>,
    },
    Reference(ReferenceData),
    Member(MemberData),
    Literal(LiteralValue),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::TranslationUnit { .. } => NodeKind::TranslationUnit,
            Self::Record(_) => NodeKind::RecordDeclaration,
            Self::Method(_) => NodeKind::MethodDeclaration,
            Self::Function(_) => NodeKind::FunctionDeclaration,
            Self::Field(_) => NodeKind::FieldDeclaration,
            Self::Variable(_) => NodeKind::VariableDeclaration,
            Self::Parameter(_) => NodeKind::ParameterDeclaration,
            Self::Compound { .. } => NodeKind::CompoundStatement,
            Self::DeclarationStatement { .. } => NodeKind::DeclarationStatement,
            Self::Return { .. } => NodeKind::ReturnStatement,
            Self::For(_) => NodeKind::ForStatement,
            Self::While { .. } => NodeKind::WhileStatement,
            Self::If(_) => NodeKind::IfStatement,
            Self::Try { .. } => NodeKind::TryStatement,
            Self::Catch { .. } => NodeKind::CatchClause,
            Self::Call(_) => NodeKind::CallExpression,
            Self::New { .. } => NodeKind::NewExpression,
            Self::Binary { .. } => NodeKind::BinaryOperator,
            Self::Reference(_) => NodeKind::DeclaredReferenceExpression,
            Self::Member(_) => NodeKind::MemberExpression,
            Self::Literal(_) => NodeKind::Literal,
        }
    }

    /// Owned children in syntactic order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::TranslationUnit { declarations } => declarations.clone(),
            Self::Record(record) => {
                let mut children = record.members.clone();
                children.extend(record.implicit_this);
                children.extend(record.implicit_outer.iter().map(|outer| outer.field));
                children
            }
            Self::Method(function) | Self::Function(function) => {
                let mut children = function.parameters.clone();
                children.extend(function.body);
                children
            }
            Self::Field(field) => field.initializer.into_iter().collect(),
            Self::Variable(variable) | Self::Parameter(variable) => {
                variable.initializer.into_iter().collect()
            }
            Self::Compound { statements } => statements.clone(),
            Self::DeclarationStatement { declarations } => declarations.clone(),
            Self::Return { value } => value.iter().copied().collect(),
            Self::For(data) => [data.initializer, data.condition, data.iteration, data.body]
                .into_iter()
                .flatten()
                .collect(),
            Self::While { condition, body } => [*condition, *body].into_iter().flatten().collect(),
            Self::If(data) => [
                data.condition_declaration,
                data.condition,
                data.then_branch,
                data.else_branch,
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::Try {
                body,
                catch_clauses,
            } => {
                let mut children: Vec<NodeId> = body.iter().copied().collect();
                children.extend(catch_clauses.iter().copied());
                children
            }
            Self::Catch { parameter, body } => [*parameter, *body].into_iter().flatten().collect(),
            Self::Call(call) => {
                let mut children: Vec<NodeId> = call.callee.iter().copied().collect();
                children.extend(call.arguments.iter().copied());
                children
            }
            Self::New { arguments, .. } => arguments.clone(),
            Self::Binary { lhs, rhs, .. } => [*lhs, *rhs].into_iter().flatten().collect(),
            Self::Reference(_) | Self::Literal(_) => Vec::new(),
            Self::Member(member) => [member.base, member.member].into_iter().flatten().collect(),
        }
    }

    /// Declared type of a value declaration.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Field(field) => field.type_name.as_deref(),
            Self::Variable(variable) | Self::Parameter(variable) => variable.type_name.as_deref(),
            _ => None,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Self::Field(field) => field.is_static,
            Self::Method(function) | Self::Function(function) => function.is_static,
            _ => false,
        }
    }

    pub fn is_implicit(&self) -> bool {
        match self {
            Self::Field(field) => field.implicit,
            Self::Member(member) => member.implicit_base,
            _ => false,
        }
    }
}
