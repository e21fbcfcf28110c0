//! The global root container and access functions.

use crate::config::ContainerConfig;
use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access in a thread-safe manner.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(|| {
  Container::with_config(ContainerConfig {
    name: Some("global".to_owned()),
    ..ContainerConfig::default()
  })
});

/// Provides a reference to the process-wide root container.
///
/// Anything registered here is visible to every fork taken from it, which makes it a convenient
/// home for application-wide services.
///
/// # Examples
///
/// ```
/// use fibre_inject::{global, Token};
///
/// let token = Token::symbol("greeting");
/// global().register_value(token.clone(), String::from("Hello from global!")).unwrap();
///
/// let request_scope = global().fork();
/// assert_eq!(*request_scope.resolve::<String>(&token).unwrap(), "Hello from global!");
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
