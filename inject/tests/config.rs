use fibre_inject::{Container, ContainerConfig, Provider, Scope, Token};
use pretty_assertions::assert_eq;

#[test]
fn test_config_from_json() {
  let config: ContainerConfig =
    serde_json::from_str(r#"{ "name": "worker", "default_scope": "transient" }"#).unwrap();

  assert_eq!(
    config,
    ContainerConfig {
      name: Some("worker".to_owned()),
      default_scope: Scope::Transient,
    }
  );

  let container = Container::with_config(config);
  container.register("id", Provider::from_fn(|| String::from("x"))).unwrap();

  let first = container.resolve::<String>(&Token::named("id")).unwrap();
  let second = container.resolve::<String>(&Token::named("id")).unwrap();
  assert!(!std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn test_empty_config_uses_defaults() {
  let config: ContainerConfig = serde_json::from_str("{}").unwrap();

  assert_eq!(config, ContainerConfig::default());
  assert_eq!(config.default_scope, Scope::Singleton);
}

#[test]
fn test_config_round_trips_scope_names() {
  let json = serde_json::to_string(&ContainerConfig {
    name: None,
    default_scope: Scope::Singleton,
  })
  .unwrap();

  assert_eq!(json, r#"{"name":null,"default_scope":"singleton"}"#);
}
