//! C++ unit with a nested struct, overloads and pointer/reference types.
//! Fixture: tests/fixtures/cpp/

use pretty_assertions::assert_eq;

use scopebind::ast::{NodeData, NodeKind};
use scopebind::query;
use scopebind::{AmbiguityPolicy, Resolution, ResolverConfig};

use super::test_utils::*;

#[test]
fn test_nested_struct_is_qualified_with_double_colon() {
    let (ast, unit) = resolve_fixture("cpp", "shapes.json", cpp());
    let shape = record(&ast, "Shape");
    let point = record(&ast, "Point");

    assert_eq!(unit.scopes().record_named("Shape"), Some(shape));
    assert_eq!(unit.scopes().record_named("Shape::Point"), Some(point));
    assert!(ast[field_of(&ast, point, "Shape::this")].data().is_implicit());
    assert!(unit.unresolved().is_empty());
}

#[test]
fn test_parameter_and_enclosing_field_in_nested_method() {
    let (ast, _) = resolve_fixture("cpp", "shapes.json", cpp());
    let shape = record(&ast, "Shape");
    let point = record(&ast, "Point");
    let scaled = method_of(&ast, point, "scaled");
    let product = query::find_all(&ast, scaled, NodeKind::BinaryOperator)[0];
    let NodeData::Binary { lhs, rhs, .. } = ast[product].data() else {
        panic!("expected a binary operator");
    };

    let parameter = query::find_first(&ast, scaled, NodeKind::ParameterDeclaration, "x");
    assert_eq!(declaration_of(&ast, lhs.unwrap()), parameter);

    let (base, member) = member_bindings(&ast, rhs.unwrap());
    assert_eq!(base, Some(field_of(&ast, point, "Shape::this")));
    assert_eq!(member, Some(field_of(&ast, shape, "area")));
}

#[test]
fn test_member_through_qualified_reference_type() {
    let (ast, _) = resolve_fixture("cpp", "shapes.json", cpp());
    let point = record(&ast, "Point");
    let measure = query::find_first(
        &ast,
        ast.root().unwrap(),
        NodeKind::FunctionDeclaration,
        "measure",
    )
    .unwrap();
    let origin = variables_in(&ast, measure, "origin")[0];
    let access = query::find_first(&ast, measure, NodeKind::MemberExpression, "x").unwrap();

    let (base, member) = member_bindings(&ast, access);
    assert_eq!(base, Some(origin));
    assert_eq!(member, Some(field_of(&ast, point, "x")));
}

fn size_callee_resolution(config: ResolverConfig) -> (Resolution, Vec<scopebind::NodeId>) {
    let (ast, _) = resolve_fixture("cpp", "shapes.json", config);
    let shape = record(&ast, "Shape");
    let overloads = query::find_all_named(&ast, shape, NodeKind::MethodDeclaration, "size");
    let call = query::find_first(
        &ast,
        ast.root().unwrap(),
        NodeKind::CallExpression,
        "size",
    )
    .unwrap();
    let NodeData::Call(data) = ast[call].data() else {
        panic!("expected a call");
    };
    let resolution = ast.resolution(data.callee.unwrap()).unwrap().clone();
    (resolution, overloads)
}

#[test]
fn test_overloaded_method_call_keeps_all_candidates() {
    let (resolution, overloads) = size_callee_resolution(cpp());
    assert_eq!(overloads.len(), 2);
    assert_eq!(resolution, Resolution::Ambiguous(overloads));
}

#[test]
fn test_overloaded_method_call_first_policy() {
    let config = ResolverConfig {
        ambiguity_policy: AmbiguityPolicy::First,
        ..cpp()
    };
    let (resolution, overloads) = size_callee_resolution(config);
    assert_eq!(resolution, Resolution::Single(overloads[0]));
}

#[test]
fn test_overloaded_method_call_reject_policy() {
    let config = ResolverConfig {
        ambiguity_policy: AmbiguityPolicy::Reject,
        ..cpp()
    };
    let (resolution, _) = size_callee_resolution(config);
    assert_eq!(resolution, Resolution::Unresolved);
}

#[test]
fn test_method_body_field_gets_own_this() {
    let (ast, _) = resolve_fixture("cpp", "shapes.json", cpp());
    let shape = record(&ast, "Shape");
    let size = query::find_all_named(&ast, shape, NodeKind::MethodDeclaration, "size")[0];
    let ret = query::find_all(&ast, size, NodeKind::ReturnStatement)[0];
    let value = ast[ret].children()[0];

    let (base, member) = member_bindings(&ast, value);
    assert_eq!(base, Some(field_of(&ast, shape, "this")));
    assert_eq!(member, Some(field_of(&ast, shape, "area")));
}
