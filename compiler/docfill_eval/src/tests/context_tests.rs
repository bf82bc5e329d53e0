use pretty_assertions::assert_eq;

use docfill_diagnostic::errors::type_mismatch;
use docfill_diagnostic::{ErrorKind, Result};
use docfill_ir::Value;

use crate::{Environment, ExpressionResolver, FnResolver, VariableContext};

/// Answers `greeting` from the `who` binding of the requesting scope.
struct Greeter;

impl ExpressionResolver for Greeter {
    fn resolve_identifier(&self, name: &str, scope: &VariableContext<'_>) -> Result<Option<Value>> {
        if name != "greeting" {
            return Ok(None);
        }
        let who = scope.get("who")?.and_then(|v| v.as_str().map(str::to_string));
        Ok(Some(Value::from(format!("hello {}", who.unwrap_or_default()))))
    }
}

/// Fails every identifier lookup.
struct Broken;

impl ExpressionResolver for Broken {
    fn resolve_identifier(&self, _name: &str, _scope: &VariableContext<'_>) -> Result<Option<Value>> {
        Err(type_mismatch("configured source", "nothing"))
    }
}

#[test]
fn test_child_sees_parent_bindings() {
    let env = Environment::default();
    let root = VariableContext::root(&env).with("title", "Invoice");
    let mut child = root.child();
    child.bind("item", 1);

    assert_eq!(child.get("title").unwrap(), Some(Value::from("Invoice")));
    assert_eq!(child.get("item").unwrap(), Some(Value::from(1)));
    assert_eq!(root.get("item").unwrap(), None);
    assert_eq!(child.depth(), 1);
}

#[test]
fn test_child_shadows_parent() {
    let env = Environment::default();
    let root = VariableContext::root(&env).with("x", 1);
    let child = root.child().with("x", 2);
    assert_eq!(child.lookup("x"), Some(&Value::from(2)));
    assert_eq!(root.lookup("x"), Some(&Value::from(1)));
}

#[test]
fn test_rebinding_replaces_in_place() {
    let env = Environment::default();
    let mut scope = VariableContext::root(&env);
    scope.bind("a", 1);
    scope.bind("b", 2);
    scope.bind("a", 3);
    let names: Vec<&str> = scope.bindings().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(scope.lookup("a"), Some(&Value::from(3)));
}

#[test]
fn test_bindings_win_over_resolvers() {
    let env = Environment::builder()
        .resolver(FnResolver::new("consts").constant("rate", 5))
        .build();
    let root = VariableContext::root(&env);
    assert_eq!(root.get("rate").unwrap(), Some(Value::from(5)));
    let scoped = root.child().with("rate", 7);
    assert_eq!(scoped.get("rate").unwrap(), Some(Value::from(7)));
}

#[test]
fn test_resolvers_consulted_in_order() {
    let env = Environment::builder()
        .resolver(FnResolver::new("first").constant("who", "first"))
        .resolver(FnResolver::new("second").constant("who", "second").constant("only", "second"))
        .build();
    let scope = VariableContext::root(&env);
    assert_eq!(scope.get("who").unwrap(), Some(Value::from("first")));
    assert_eq!(scope.get("only").unwrap(), Some(Value::from("second")));
    assert_eq!(scope.get("missing").unwrap(), None);
}

#[test]
fn test_resolver_sees_requesting_scope() {
    let env = Environment::builder().resolver(Greeter).build();
    let root = VariableContext::root(&env);
    let child = root.child().with("who", "Ann");
    let grandchild = child.child();

    assert_eq!(grandchild.get("greeting").unwrap(), Some(Value::from("hello Ann")));
    assert_eq!(root.get("greeting").unwrap(), Some(Value::from("hello ")));
}

#[test]
fn test_resolver_failure_stops_the_chain() {
    let env = Environment::builder()
        .resolver(Broken)
        .resolver(FnResolver::new("fallback").constant("rate", 5))
        .build();
    let err = VariableContext::root(&env).get("rate").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_function_failure_stops_the_chain() {
    let env = Environment::builder()
        .resolver(FnResolver::new("strict").function("half", |_| Err(type_mismatch("number", "text"))))
        .resolver(FnResolver::new("lenient").function("half", |_| Ok(Some(Value::from(1)))))
        .build();
    let scope = VariableContext::root(&env);
    let err = scope.call("half", &[Value::from("x")]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_environment_is_shareable() {
    fn assert_sync<T: Send + Sync>() {}
    assert_sync::<Environment>();
}
