//! Ambiguity and duplicate-declaration policies.

use pretty_assertions::assert_eq;

use scopebind::ast::{Ast, NodeId, RecordKind};
use scopebind::engine::Resolver;
use scopebind::error::ResolveError;
use scopebind::{AmbiguityPolicy, DuplicatePolicy, Resolution};

use super::test_utils::*;

/// Record with two `run` overloads and a third method calling `run`.
fn overloads() -> (Ast, NodeId, NodeId, NodeId) {
    let mut ast = Ast::new();
    let first = ast.method("run", vec![], None);
    let parameter = ast.parameter("times", Some("int"));
    let second = ast.method("run", vec![parameter], None);
    let call = ast.call("run", vec![]);
    let body = ast.compound(vec![call]);
    let caller = ast.method("start", vec![], Some(body));
    let record = ast.record("Task", RecordKind::Class, vec![first, second, caller]);
    ast.translation_unit("Task.java", vec![record]);
    let callee = ast[call].children()[0];
    (ast, first, second, callee)
}

#[test]
fn test_overloads_under_each_ambiguity_policy() {
    for (policy, expected) in [
        (AmbiguityPolicy::KeepAll, "ambiguous"),
        (AmbiguityPolicy::First, "first"),
        (AmbiguityPolicy::Reject, "unresolved"),
    ] {
        let (mut ast, first, second, callee) = overloads();
        let unit = Resolver::builder()
            .ambiguity_policy(policy)
            .build()
            .resolve(&mut ast)
            .unwrap();
        let resolution = ast.resolution(callee).unwrap().clone();
        match expected {
            "ambiguous" => assert_eq!(resolution, Resolution::Ambiguous(vec![first, second])),
            "first" => assert_eq!(resolution, Resolution::Single(first)),
            _ => {
                assert_eq!(resolution, Resolution::Unresolved);
                assert_eq!(unit.unresolved(), &[callee]);
            }
        }
    }
}

fn duplicate_fields() -> (Ast, NodeId, NodeId, NodeId) {
    let mut ast = Ast::new();
    let first = ast.field("value", Some("int"), None);
    let second = ast.field("value", Some("long"), None);
    let use_value = ast.reference("value");
    let ret = ast.return_statement(Some(use_value));
    let body = ast.compound(vec![ret]);
    let method = ast.method("get", vec![], Some(body));
    let record = ast.record("Holder", RecordKind::Class, vec![first, second, method]);
    ast.translation_unit("Holder.java", vec![record]);
    (ast, first, second, use_value)
}

#[test]
fn test_duplicate_field_keeps_first() {
    let (mut ast, first, second, use_value) = duplicate_fields();
    let unit = Resolver::new().resolve(&mut ast).unwrap();

    assert_eq!(unit.duplicates().len(), 1);
    assert_eq!(unit.duplicates()[0].first, first);
    assert_eq!(unit.duplicates()[0].duplicate, second);

    let (_, member) = member_bindings(&ast, use_value);
    assert_eq!(member, Some(first));
}

#[test]
fn test_duplicate_field_fatal() {
    let (mut ast, first, second, _) = duplicate_fields();
    let err = Resolver::builder()
        .duplicate_policy(DuplicatePolicy::Fatal)
        .build()
        .resolve(&mut ast)
        .unwrap_err();

    assert_eq!(err, ResolveError::duplicate("value", first, second, None));
    assert_eq!(err.node(), Some(second));
}

#[test]
fn test_duplicate_parameters() {
    let mut ast = Ast::new();
    let a = ast.parameter("x", Some("int"));
    let b = ast.parameter("x", Some("int"));
    let use_x = ast.reference("x");
    let ret = ast.return_statement(Some(use_x));
    let body = ast.compound(vec![ret]);
    let function = ast.function("f", vec![a, b], Some(body));
    ast.translation_unit("f.cpp", vec![function]);

    let unit = Resolver::new().resolve(&mut ast).unwrap();
    assert_eq!(unit.duplicates().len(), 1);
    assert_eq!(declaration_of(&ast, use_x), Some(a));
}
