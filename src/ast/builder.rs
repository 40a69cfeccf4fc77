//! Node constructors. Children are built first and handed to their parent,
//! which takes ownership and becomes their `parent`.

use super::kinds::*;
use super::{Ast, NodeId};

impl Ast {
    pub fn translation_unit(&mut self, name: &str, declarations: Vec<NodeId>) -> NodeId {
        self.alloc(name, NodeData::TranslationUnit { declarations })
    }

    pub fn record(&mut self, name: &str, kind: RecordKind, members: Vec<NodeId>) -> NodeId {
        self.alloc(
            name,
            NodeData::Record(RecordData {
                kind,
                members,
                ..RecordData::default()
            }),
        )
    }

    pub fn method(&mut self, name: &str, parameters: Vec<NodeId>, body: Option<NodeId>) -> NodeId {
        self.alloc(
            name,
            NodeData::Method(FunctionData {
                is_static: false,
                parameters,
                body,
            }),
        )
    }

    pub fn static_method(
        &mut self,
        name: &str,
        parameters: Vec<NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            name,
            NodeData::Method(FunctionData {
                is_static: true,
                parameters,
                body,
            }),
        )
    }

    pub fn function(&mut self, name: &str, parameters: Vec<NodeId>, body: Option<NodeId>) -> NodeId {
        self.alloc(
            name,
            NodeData::Function(FunctionData {
                is_static: false,
                parameters,
                body,
            }),
        )
    }

    pub fn field(
        &mut self,
        name: &str,
        type_name: Option<&str>,
        initializer: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            name,
            NodeData::Field(FieldData {
                type_name: type_name.map(str::to_string),
                initializer,
                ..FieldData::default()
            }),
        )
    }

    pub fn static_field(
        &mut self,
        name: &str,
        type_name: Option<&str>,
        initializer: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            name,
            NodeData::Field(FieldData {
                type_name: type_name.map(str::to_string),
                is_static: true,
                initializer,
                ..FieldData::default()
            }),
        )
    }

    pub fn variable(
        &mut self,
        name: &str,
        type_name: Option<&str>,
        initializer: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            name,
            NodeData::Variable(VariableData {
                type_name: type_name.map(str::to_string),
                initializer,
            }),
        )
    }

    pub fn parameter(&mut self, name: &str, type_name: Option<&str>) -> NodeId {
        self.alloc(
            name,
            NodeData::Parameter(VariableData {
                type_name: type_name.map(str::to_string),
                initializer: None,
            }),
        )
    }

    pub fn compound(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.alloc("", NodeData::Compound { statements })
    }

    pub fn declaration_statement(&mut self, declarations: Vec<NodeId>) -> NodeId {
        self.alloc("", NodeData::DeclarationStatement { declarations })
    }

    pub fn return_statement(&mut self, value: Option<NodeId>) -> NodeId {
        self.alloc("", NodeData::Return { value })
    }

    pub fn for_statement(&mut self, data: ForData) -> NodeId {
        self.alloc("", NodeData::For(data))
    }

    pub fn while_statement(&mut self, condition: Option<NodeId>, body: Option<NodeId>) -> NodeId {
        self.alloc("", NodeData::While { condition, body })
    }

    pub fn if_statement(&mut self, data: IfData) -> NodeId {
        self.alloc("", NodeData::If(data))
    }

    pub fn try_statement(&mut self, body: Option<NodeId>, catch_clauses: Vec<NodeId>) -> NodeId {
        self.alloc(
            "",
            NodeData::Try {
                body,
                catch_clauses,
            },
        )
    }

    pub fn catch_clause(&mut self, parameter: Option<NodeId>, body: Option<NodeId>) -> NodeId {
        self.alloc("", NodeData::Catch { parameter, body })
    }

    /// Call of a plain name; the callee reference is created here.
    pub fn call(&mut self, name: &str, arguments: Vec<NodeId>) -> NodeId {
        let callee = self.reference(name);
        self.call_with_callee(name, Some(callee), arguments)
    }

    pub fn call_with_callee(
        &mut self,
        name: &str,
        callee: Option<NodeId>,
        arguments: Vec<NodeId>,
    ) -> NodeId {
        self.alloc(name, NodeData::Call(CallData { callee, arguments }))
    }

    pub fn new_expression(&mut self, type_name: &str, arguments: Vec<NodeId>) -> NodeId {
        self.alloc(
            type_name,
            NodeData::New {
                type_name: type_name.to_string(),
                arguments,
            },
        )
    }

    pub fn binary(&mut self, operator: &str, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.alloc(
            operator,
            NodeData::Binary {
                operator: operator.to_string(),
                lhs: Some(lhs),
                rhs: Some(rhs),
            },
        )
    }

    pub fn reference(&mut self, name: &str) -> NodeId {
        self.alloc(name, NodeData::Reference(ReferenceData::default()))
    }

    /// `base.member`, with a fresh reference for `member`.
    pub fn member(&mut self, base: NodeId, member: &str) -> NodeId {
        let member_ref = self.reference(member);
        self.member_expression(member, Some(base), Some(member_ref))
    }

    pub fn member_expression(
        &mut self,
        name: &str,
        base: Option<NodeId>,
        member: Option<NodeId>,
    ) -> NodeId {
        self.alloc(
            name,
            NodeData::Member(MemberData {
                base,
                member,
                ..MemberData::default()
            }),
        )
    }

    pub fn literal(&mut self, value: LiteralValue) -> NodeId {
        let name = match &value {
            LiteralValue::String(text) => text.clone(),
            other => other.to_string(),
        };
        self.alloc(name, NodeData::Literal(value))
    }

    pub fn string_literal(&mut self, value: &str) -> NodeId {
        self.literal(LiteralValue::String(value.to_string()))
    }
}
