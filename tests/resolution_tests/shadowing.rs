//! Lexical shadowing built directly with the arena builder.

use pretty_assertions::assert_eq;

use scopebind::ast::{Ast, ForData, NodeKind, RecordKind};
use scopebind::Resolver;

use super::test_utils::*;

#[test]
fn test_use_before_declaration_binds_within_scope() {
    let mut ast = Ast::new();
    let early_use = ast.reference("late");
    let call = ast.call("use", vec![early_use]);
    let late = ast.variable("late", Some("int"), None);
    let decl = ast.declaration_statement(vec![late]);
    let body = ast.compound(vec![call, decl]);
    let function = ast.function("main", vec![], Some(body));
    ast.translation_unit("main.cpp", vec![function]);

    Resolver::new().resolve(&mut ast).unwrap();
    assert_eq!(declaration_of(&ast, early_use), Some(late));
}

#[test]
fn test_local_shadows_field_without_rewrite() {
    let mut ast = Ast::new();
    let field = ast.field("count", Some("int"), None);
    let local = ast.variable("count", Some("int"), None);
    let decl = ast.declaration_statement(vec![local]);
    let use_count = ast.reference("count");
    let ret = ast.return_statement(Some(use_count));
    let body = ast.compound(vec![decl, ret]);
    let method = ast.method("get", vec![], Some(body));
    let record = ast.record("Counter", RecordKind::Class, vec![field, method]);
    ast.translation_unit("Counter.java", vec![record]);

    let unit = Resolver::new().resolve(&mut ast).unwrap();
    assert_eq!(ast.kind(use_count), Some(NodeKind::DeclaredReferenceExpression));
    assert_eq!(declaration_of(&ast, use_count), Some(local));
    assert_eq!(unit.implicit_members(), 0);
}

#[test]
fn test_loop_variable_not_visible_after_loop() {
    let mut ast = Ast::new();
    let i = ast.variable("i", Some("int"), None);
    let init = ast.declaration_statement(vec![i]);
    let inside = ast.reference("i");
    let inside_call = ast.call("use", vec![inside]);
    let loop_body = ast.compound(vec![inside_call]);
    let for_loop = ast.for_statement(ForData {
        initializer: Some(init),
        condition: None,
        iteration: None,
        body: Some(loop_body),
    });
    let after = ast.reference("i");
    let after_call = ast.call("use", vec![after]);
    let body = ast.compound(vec![for_loop, after_call]);
    let function = ast.function("main", vec![], Some(body));
    ast.translation_unit("main.cpp", vec![function]);

    let unit = Resolver::new().resolve(&mut ast).unwrap();
    assert_eq!(declaration_of(&ast, inside), Some(i));
    assert_eq!(declaration_of(&ast, after), None);
    assert!(unit.unresolved().contains(&after));
}

#[test]
fn test_while_body_block() {
    let mut ast = Ast::new();
    let outer = ast.variable("n", Some("int"), None);
    let outer_decl = ast.declaration_statement(vec![outer]);
    let condition = ast.reference("n");
    let inner = ast.variable("n", Some("int"), None);
    let inner_decl = ast.declaration_statement(vec![inner]);
    let inner_use = ast.reference("n");
    let call = ast.call("use", vec![inner_use]);
    let loop_body = ast.compound(vec![inner_decl, call]);
    let while_loop = ast.while_statement(Some(condition), Some(loop_body));
    let body = ast.compound(vec![outer_decl, while_loop]);
    let function = ast.function("main", vec![], Some(body));
    ast.translation_unit("main.cpp", vec![function]);

    Resolver::new().resolve(&mut ast).unwrap();
    assert_eq!(declaration_of(&ast, condition), Some(outer));
    assert_eq!(declaration_of(&ast, inner_use), Some(inner));
}

#[test]
fn test_global_function_reached_from_method() {
    let mut ast = Ast::new();
    let helper = ast.function("helper", vec![], None);
    let call = ast.call("helper", vec![]);
    let ret = ast.return_statement(Some(call));
    let body = ast.compound(vec![ret]);
    let method = ast.method("run", vec![], Some(body));
    let record = ast.record("Task", RecordKind::Struct, vec![method]);
    ast.translation_unit("task.cpp", vec![helper, record]);

    Resolver::new().resolve(&mut ast).unwrap();
    let callee = ast[call].children()[0];
    assert_eq!(declaration_of(&ast, callee), Some(helper));
}
