//! Container configuration and its builder.

use crate::container::Container;
use crate::provider::Scope;

/// Settings applied when a container is created.
///
/// With the `serde` feature enabled this can be loaded from any serde format; missing fields
/// take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerConfig {
  /// A label attached to every log event the container emits.
  pub name: Option<String>,
  /// The scope used by registrations that do not name one.
  pub default_scope: Scope,
}

/// A builder for creating `Container` instances.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
  config: ContainerConfig,
  parent: Option<Container>,
}

impl ContainerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts from an existing configuration.
  pub fn from_config(config: ContainerConfig) -> Self {
    Self {
      config,
      parent: None,
    }
  }

  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.config.name = Some(name.into());
    self
  }

  /// Sets the scope `register` uses. Defaults to [`Scope::Singleton`].
  pub fn default_scope(mut self, scope: Scope) -> Self {
    self.config.default_scope = scope;
    self
  }

  /// Makes the built container a child of `parent`, as [`Container::fork`] does.
  pub fn parent(mut self, parent: &Container) -> Self {
    self.parent = Some(parent.clone());
    self
  }

  pub fn build(self) -> Container {
    Container::from_parts(self.config, self.parent)
  }
}
