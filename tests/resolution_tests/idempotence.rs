//! Running the pass twice over the same tree.

use pretty_assertions::assert_eq;

use scopebind::ast::NodeKind;
use scopebind::discovery;
use scopebind::query;
use scopebind::{Resolution, Resolver};

use super::test_utils::*;
use crate::fixtures::get_test_fixture_path;

#[test]
fn test_second_run_yields_same_bindings() {
    let path = get_test_fixture_path("java", Some("scope_variables.json"));
    let mut ast = discovery::load_unit(&path).unwrap();
    let resolver = Resolver::with_config(java());

    let first = resolver.resolve(&mut ast).unwrap();
    let nodes_after_first = ast.len();
    let root = ast.root().unwrap();
    let snapshot: Vec<(scopebind::NodeId, Option<Resolution>)> = query::flatten(&ast, root)
        .into_iter()
        .map(|id| (id, ast.resolution(id).cloned()))
        .collect();

    let second = resolver.resolve(&mut ast).unwrap();
    assert_eq!(ast.len(), nodes_after_first);
    let again: Vec<(scopebind::NodeId, Option<Resolution>)> = query::flatten(&ast, root)
        .into_iter()
        .map(|id| (id, ast.resolution(id).cloned()))
        .collect();
    assert_eq!(snapshot, again);

    assert_eq!(first.unresolved(), second.unresolved());
    assert_eq!(first.implicit_members(), 3);
    assert_eq!(second.implicit_members(), 0);
    assert_eq!(first.duplicates(), second.duplicates());
}

#[test]
fn test_rewritten_members_are_not_rewritten_again() {
    let path = get_test_fixture_path("java", Some("scope_variables.json"));
    let mut ast = discovery::load_unit(&path).unwrap();
    let resolver = Resolver::new();
    resolver.resolve(&mut ast).unwrap();
    let root = ast.root().unwrap();
    let members = query::find_all(&ast, root, NodeKind::MemberExpression);

    resolver.resolve(&mut ast).unwrap();
    assert_eq!(query::find_all(&ast, root, NodeKind::MemberExpression), members);
}

#[test]
fn test_implicit_fields_are_not_duplicated() {
    let path = get_test_fixture_path("java", Some("scope_variables.json"));
    let mut ast = discovery::load_unit(&path).unwrap();
    let resolver = Resolver::new();
    resolver.resolve(&mut ast).unwrap();
    resolver.resolve(&mut ast).unwrap();

    let inner = record(&ast, "InnerClass");
    let implicit: Vec<&str> = ast[inner]
        .children()
        .into_iter()
        .filter(|&child| ast[child].data().is_implicit())
        .map(|child| ast[child].name())
        .collect();
    assert_eq!(implicit, vec!["this", "ScopeVariables.this"]);
}
