//! Java unit with an outer class, a nested inner class and variables named
//! `varName` in every kind of scope. Fixture: tests/fixtures/java/

use pretty_assertions::assert_eq;
use std::collections::HashMap;

use scopebind::ast::{Ast, NodeId, NodeKind};
use scopebind::engine::{PassState, ResolvedUnit};
use scopebind::query;
use scopebind::Resolution;

use super::test_utils::*;

struct Fixture {
    ast: Ast,
    unit: ResolvedUnit,
    logs: HashMap<String, NodeId>,
    outer: NodeId,
    inner: NodeId,
}

impl Fixture {
    fn load() -> Self {
        let (ast, unit) = resolve_fixture("java", "scope_variables.json", java());
        let logs = log_arguments(&ast);
        let outer = record(&ast, "ScopeVariables");
        let inner = record(&ast, "InnerClass");
        Self {
            ast,
            unit,
            logs,
            outer,
            inner,
        }
    }

    fn arg(&self, log_id: &str) -> NodeId {
        *self
            .logs
            .get(log_id)
            .unwrap_or_else(|| panic!("no printLog call with id {log_id}"))
    }

    /// The argument is still a plain reference; returns its binding.
    fn reference(&self, log_id: &str) -> Option<NodeId> {
        let arg = self.arg(log_id);
        assert_eq!(
            self.ast.kind(arg),
            Some(NodeKind::DeclaredReferenceExpression),
            "{log_id}"
        );
        declaration_of(&self.ast, arg)
    }

    fn member(&self, log_id: &str) -> (Option<NodeId>, Option<NodeId>) {
        member_bindings(&self.ast, self.arg(log_id))
    }

    fn method(&self, record: NodeId, name: &str) -> NodeId {
        method_of(&self.ast, record, name)
    }
}

#[test]
fn test_unit_is_resolved() {
    let fixture = Fixture::load();
    assert_eq!(fixture.unit.state(), PassState::Resolved);
    assert!(fixture.unit.duplicates().is_empty());
    assert_eq!(fixture.unit.implicit_members(), 3);
}

#[test]
fn test_outer_var_name_accessed_over_implicit_this() {
    let f = Fixture::load();
    let arg = f.arg("func1_impl_this_varName");
    assert!(member_parts(&f.ast, arg).unwrap().implicit_base);

    let (base, member) = f.member("func1_impl_this_varName");
    assert_eq!(base, Some(field_of(&f.ast, f.outer, "this")));
    assert_eq!(member, Some(field_of(&f.ast, f.outer, "varName")));
}

#[test]
fn test_static_field_accessed_without_receiver() {
    let f = Fixture::load();
    assert_eq!(
        f.reference("func1_static_staticVarName"),
        Some(field_of(&f.ast, f.outer, "staticVarName"))
    );
}

#[test]
fn test_sibling_loops_bind_their_own_variable() {
    let f = Fixture::load();
    let function1 = f.method(f.outer, "function1");
    let loops = query::find_all(&f.ast, function1, NodeKind::ForStatement);
    assert_eq!(loops.len(), 2);

    let first_loop_var = variables_in(&f.ast, loops[0], "varName")[0];
    let second_loop_var = variables_in(&f.ast, loops[1], "varName")[0];
    assert_eq!(f.reference("func1_first_loop_varName"), Some(first_loop_var));
    assert_eq!(f.reference("func1_second_loop_varName"), Some(second_loop_var));
}

#[test]
fn test_nested_block_shadows_loop_variable() {
    let f = Fixture::load();
    let function1 = f.method(f.outer, "function1");
    let loops = query::find_all(&f.ast, function1, NodeKind::ForStatement);
    let second_loop_vars = variables_in(&f.ast, loops[1], "varName");
    assert_eq!(second_loop_vars.len(), 2);

    assert_eq!(
        f.reference("func1_nested_block_shadowed_local_varName"),
        Some(second_loop_vars[1])
    );
}

#[test]
fn test_parameter_shadows_field() {
    let f = Fixture::load();
    let function2 = f.method(f.outer, "function2");
    let parameter = query::find_first(
        &f.ast,
        function2,
        NodeKind::ParameterDeclaration,
        "varName",
    );
    assert_eq!(f.reference("func2_param_varName"), parameter);
}

#[test]
fn test_explicit_this_reaches_field() {
    let f = Fixture::load();
    let arg = f.arg("func2_this_varName");
    assert!(!member_parts(&f.ast, arg).unwrap().implicit_base);

    let (base, member) = f.member("func2_this_varName");
    assert_eq!(base, Some(field_of(&f.ast, f.outer, "this")));
    assert_eq!(member, Some(field_of(&f.ast, f.outer, "varName")));
}

#[test]
fn test_if_condition_declaration() {
    let f = Fixture::load();
    let function2 = f.method(f.outer, "function2");
    let branch = query::find_all(&f.ast, function2, NodeKind::IfStatement)[0];
    let declaration = variables_in(&f.ast, branch, "varName")[0];
    assert_eq!(f.reference("func2_if_varName"), Some(declaration));
}

#[test]
fn test_catch_parameter() {
    let f = Fixture::load();
    let function2 = f.method(f.outer, "function2");
    let clause = query::find_all(&f.ast, function2, NodeKind::CatchClause)[0];
    let declaration = variables_in(&f.ast, clause, "varName")[0];
    assert_eq!(f.reference("func2_catch_varName"), Some(declaration));
}

#[test]
fn test_member_accessed_through_local_instance() {
    let f = Fixture::load();
    for (log_id, function) in [
        ("func2_instance_varName", "function2"),
        ("func3_instance_varName", "function3"),
    ] {
        let function = f.method(f.outer, function);
        let instance = variables_in(&f.ast, function, "scopeVariables")[0];
        let (base, member) = f.member(log_id);
        assert_eq!(base, Some(instance), "{log_id}");
        assert_eq!(member, Some(field_of(&f.ast, f.outer, "varName")), "{log_id}");
    }
}

#[test]
fn test_member_of_class_from_another_unit_is_unresolved() {
    let f = Fixture::load();
    let function3 = f.method(f.outer, "function3");
    let instance = variables_in(&f.ast, function3, "externalClass")[0];

    let (base, member) = f.member("func3_external_instance_varName");
    assert_eq!(base, Some(instance));
    assert_eq!(member, None);
    assert_eq!(
        f.ast.resolution(f.arg("func3_external_instance_varName")),
        Some(&Resolution::Unresolved)
    );
}

#[test]
fn test_static_access_through_class_name() {
    let f = Fixture::load();
    let (base, member) = f.member("func4_static_staticVarName");
    assert_eq!(base, Some(f.outer));
    assert_eq!(member, Some(field_of(&f.ast, f.outer, "staticVarName")));

    let (base, member) = f.member("func4_external_staticVarName");
    assert_eq!(base, None);
    assert_eq!(member, None);
}

#[test]
fn test_member_of_new_expression() {
    let f = Fixture::load();
    let arg = f.arg("func4_new_instance_varName");
    let data = member_parts(&f.ast, arg).unwrap();
    assert_eq!(f.ast.kind(data.base.unwrap()), Some(NodeKind::NewExpression));
    assert_eq!(
        declaration_of(&f.ast, data.member.unwrap()),
        Some(field_of(&f.ast, f.outer, "varName"))
    );
}

#[test]
fn test_unresolved_references_are_listed() {
    let f = Fixture::load();
    assert_eq!(f.unit.unresolved().len(), 3);
    for &id in f.unit.unresolved() {
        assert_eq!(f.ast.resolution(id), Some(&Resolution::Unresolved));
    }
}

#[test]
fn test_inner_field_over_implicit_this() {
    let f = Fixture::load();
    let (base, member) = f.member("func1_inner_imp_this_varName");
    assert_eq!(base, Some(field_of(&f.ast, f.inner, "this")));
    assert_eq!(member, Some(field_of(&f.ast, f.inner, "varName")));
}

#[test]
fn test_explicit_enclosing_instance() {
    let f = Fixture::load();
    let (base, member) = f.member("func1_outer_this_varName");
    assert_eq!(base, Some(field_of(&f.ast, f.inner, "ScopeVariables.this")));
    assert_eq!(member, Some(field_of(&f.ast, f.outer, "varName")));
}

#[test]
fn test_outer_static_through_class_name() {
    let f = Fixture::load();
    let (base, member) = f.member("func1_outer_static_staticVarName");
    assert_eq!(base, Some(f.outer));
    assert_eq!(member, Some(field_of(&f.ast, f.outer, "staticVarName")));
}

#[test]
fn test_inner_static_shadows_outer_static() {
    let f = Fixture::load();
    assert_eq!(
        f.reference("func1_inner_static_staticVarName"),
        Some(field_of(&f.ast, f.inner, "staticVarName"))
    );
}

#[test]
fn test_outer_field_gets_enclosing_instance_base() {
    let f = Fixture::load();
    let data = member_parts(&f.ast, f.arg("func1_outer_imp_outerOnly")).unwrap();
    assert!(data.implicit_base);
    assert_eq!(f.ast.name(data.base.unwrap()), Some("ScopeVariables.this"));

    let (base, member) = f.member("func1_outer_imp_outerOnly");
    assert_eq!(base, Some(field_of(&f.ast, f.inner, "ScopeVariables.this")));
    assert_eq!(member, Some(field_of(&f.ast, f.outer, "outerOnly")));
}

#[test]
fn test_instances_created_inside_inner_class() {
    let f = Fixture::load();
    let (_, member) = f.member("func2_inner_instance_varName");
    assert_eq!(member, Some(field_of(&f.ast, f.inner, "varName")));

    let (_, member) = f.member("func2_outer_instance_varName");
    assert_eq!(member, Some(field_of(&f.ast, f.outer, "varName")));
}

#[test]
fn test_local_in_static_main() {
    let f = Fixture::load();
    let main = f.method(f.outer, "main");
    let local = variables_in(&f.ast, main, "varName")[0];
    assert_eq!(f.reference("main_local_varName"), Some(local));
}

#[test]
fn test_print_log_callee_bound_from_both_classes() {
    let f = Fixture::load();
    let print_log = f.method(f.outer, "printLog");
    let root = f.ast.root().unwrap();
    let calls = query::find_all_named(&f.ast, root, NodeKind::CallExpression, "printLog");
    assert_eq!(calls.len(), f.logs.len());

    for call in calls {
        let callee = f.ast[call].children()[0];
        assert_eq!(declaration_of(&f.ast, callee), Some(print_log));
    }
}

#[test]
fn test_implicit_members_are_materialized() {
    let f = Fixture::load();
    let this = field_of(&f.ast, f.inner, "this");
    let outer_this = field_of(&f.ast, f.inner, "ScopeVariables.this");

    assert!(f.ast[this].data().is_implicit());
    assert_eq!(f.ast[this].data().type_name(), Some("ScopeVariables.InnerClass"));
    assert_eq!(f.ast[outer_this].data().type_name(), Some("ScopeVariables"));
    assert_eq!(
        f.unit.scopes().record_named("ScopeVariables.InnerClass"),
        Some(f.inner)
    );
}
