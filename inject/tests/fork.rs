mod common;

use common::init_tracing;
use fibre_inject::{injectable, Container, Error, Provider, Scope, Token};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[derive(Default)]
struct Client {
  endpoint: Option<Arc<String>>,
}

injectable! {
  Client {
    endpoint: String => "endpoint",
  }
}

#[test]
fn test_fork_shadows_and_delegates() {
  init_tracing();
  let parent = Container::new();
  let token1 = Token::symbol("token1");
  let token2 = Token::symbol("token2");
  let token3 = Token::symbol("token3");
  parent.register_value(token1.clone(), "A").unwrap();
  parent.register_value(token3.clone(), "D").unwrap();

  let child = parent.fork();
  child.register_value(token1.clone(), "B").unwrap();
  child.register_value(token2.clone(), "C").unwrap();

  assert_eq!(*child.resolve::<&str>(&token1).unwrap(), "B");
  assert_eq!(*child.resolve::<&str>(&token2).unwrap(), "C");
  assert_eq!(*child.resolve::<&str>(&token3).unwrap(), "D");
  assert_eq!(*parent.resolve::<&str>(&token1).unwrap(), "A");
  assert_eq!(
    parent.resolve::<&str>(&token2).unwrap_err(),
    Error::UnknownToken { token: token2 }
  );
}

#[test]
fn test_fork_reports_unknown_tokens_from_the_root() {
  let child = Container::new().fork().fork();
  let token = Token::named("nowhere");

  assert_eq!(
    child.resolve::<u8>(&token).unwrap_err(),
    Error::UnknownToken { token }
  );
}

#[test]
fn test_fork_starts_empty_and_keeps_parent() {
  let parent = Container::builder().name("app").default_scope(Scope::Transient).build();
  parent.register_value("x", 1_u8).unwrap();

  let child = parent.fork();

  assert!(child.is_empty());
  assert!(child.parent().unwrap().ptr_eq(&parent));
  assert_eq!(child.name(), Some("app/fork"));
  assert_eq!(child.default_scope(), Scope::Transient);
  assert!(!child.has(&Token::named("x")));
  assert!(child.contains(&Token::named("x")));
  assert_eq!(parent.fork_named("request-42").name(), Some("request-42"));
}

#[test]
fn test_child_registration_never_reaches_parent() {
  let parent = Container::new();
  let child = parent.fork();

  child.register_value("only_in_child", 5_i32).unwrap();
  child.clear();
  child.register_value("only_in_child", 6_i32).unwrap();

  assert!(parent.is_empty());
  assert!(!parent.contains(&Token::named("only_in_child")));
}

#[test]
fn test_parent_singletons_are_shared_with_children() {
  let parent = Container::new();
  let token = Token::named("pool");
  parent.register(token.clone(), Provider::from_fn(|| vec![1, 2, 3])).unwrap();

  let a = parent.fork().resolve::<Vec<i32>>(&token).unwrap();
  let b = parent.fork().resolve::<Vec<i32>>(&token).unwrap();
  let c = parent.resolve::<Vec<i32>>(&token).unwrap();

  assert!(Arc::ptr_eq(&a, &b));
  assert!(Arc::ptr_eq(&b, &c));
}

#[test]
fn test_child_class_sees_child_overrides() {
  let parent = Container::new();
  parent.register_value("endpoint", String::from("https://prod")).unwrap();
  parent.register_type::<Client>().unwrap();

  let child = parent.fork();
  child.register_value("endpoint", String::from("https://staging")).unwrap();
  child.register_type::<Client>().unwrap();

  let from_child = child.resolve_type::<Client>().unwrap();
  let from_parent = parent.resolve_type::<Client>().unwrap();

  assert_eq!(from_child.endpoint.as_deref().map(String::as_str), Some("https://staging"));
  assert_eq!(from_parent.endpoint.as_deref().map(String::as_str), Some("https://prod"));
}

#[test]
fn test_parent_bound_class_resolves_dependencies_in_parent() {
  // The first registry that holds a token owns its whole resolution.
  let parent = Container::new();
  parent.register_value("endpoint", String::from("https://prod")).unwrap();
  parent.register_type::<Client>().unwrap();

  let child = parent.fork();
  child.register_value("endpoint", String::from("https://staging")).unwrap();

  let client = child.resolve_type::<Client>().unwrap();

  assert_eq!(client.endpoint.as_deref().map(String::as_str), Some("https://prod"));
}

#[test]
fn test_cycle_across_fork_boundary() {
  // child: c -> a, parent: a -> b -> a. The loop lives entirely in the parent but is entered
  // from the child, so the same context has to follow the delegation.
  let parent = Container::new();
  parent
    .register("b", Provider::factory(["a"], |(a,): (Arc<u8>,)| *a))
    .unwrap();
  parent
    .register("a", Provider::factory(["b"], |(b,): (Arc<u8>,)| *b))
    .unwrap();

  let child = parent.fork();
  child
    .register("c", Provider::factory(["a"], |(a,): (Arc<u8>,)| *a))
    .unwrap();

  let err = child.resolve::<u8>(&Token::named("c")).unwrap_err();

  match err {
    Error::CircularDependency { token, path } => {
      assert_eq!(token, Token::named("a"));
      assert_eq!(
        path,
        vec![Token::named("c"), Token::named("a"), Token::named("b")]
      );
    }
    other => panic!("expected a circular dependency, got {}", other),
  }
}
