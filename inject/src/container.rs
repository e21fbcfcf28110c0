//! The main `Container` struct and the resolution engine.

use crate::class::{Class, Injectable};
use crate::config::{ContainerBuilder, ContainerConfig};
use crate::core::{Registration, ResolutionContext};
use crate::error::{Error, Result};
use crate::provider::{downcast, Args, Factory, Instance, Provider, Scope};
use crate::registry::Registry;
use crate::token::Token;

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

struct Inner {
  name: Option<Arc<str>>,
  default_scope: Scope,
  registry: Registry,
  parent: Option<Container>,
}

/// The Inversion of Control (IoC) container.
///
/// A container owns a registry of token bindings and, optionally, a parent it falls back to for
/// tokens it does not bind itself. It is a cheap handle: clones share the same registry.
///
/// ```
/// use fibre_inject::{Container, Provider, Token};
///
/// let container = Container::new();
/// let answer = Token::named("answer");
/// container.register(answer.clone(), Provider::value(42_u32)).unwrap();
///
/// assert_eq!(*container.resolve::<u32>(&answer).unwrap(), 42);
/// ```
#[derive(Clone)]
pub struct Container {
  inner: Arc<Inner>,
}

impl Default for Container {
  fn default() -> Self {
    Self::new()
  }
}

impl Container {
  /// Creates a new, empty root `Container` with default configuration.
  pub fn new() -> Self {
    Self::with_config(ContainerConfig::default())
  }

  pub fn with_config(config: ContainerConfig) -> Self {
    Self::from_parts(config, None)
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::new()
  }

  pub(crate) fn from_parts(config: ContainerConfig, parent: Option<Container>) -> Self {
    Self {
      inner: Arc::new(Inner {
        name: config.name.map(Arc::from),
        default_scope: config.default_scope,
        registry: Registry::default(),
        parent,
      }),
    }
  }

  pub fn name(&self) -> Option<&str> {
    self.inner.name.as_deref()
  }

  /// The scope used by [`Container::register`].
  pub fn default_scope(&self) -> Scope {
    self.inner.default_scope
  }

  pub fn parent(&self) -> Option<&Container> {
    self.inner.parent.as_ref()
  }

  /// Whether two handles refer to the same container.
  pub fn ptr_eq(&self, other: &Container) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }

  fn label(&self) -> &str {
    self.name().unwrap_or("container")
  }

  // --- Registration ---

  /// Binds `token` to `provider` using the container's default scope.
  ///
  /// A bare [`Class`] is accepted as shorthand for [`Provider::Class`].
  ///
  /// # Errors
  ///
  /// [`Error::DuplicateProviderToken`](crate::Error::DuplicateProviderToken) if this container
  /// already binds `token`. Tokens bound only by a parent may be shadowed freely.
  pub fn register(&self, token: impl Into<Token>, provider: impl Into<Provider>) -> Result<()> {
    self.register_scoped(token, provider, self.inner.default_scope)
  }

  pub fn register_scoped(
    &self,
    token: impl Into<Token>,
    provider: impl Into<Provider>,
    scope: Scope,
  ) -> Result<()> {
    let token = token.into();
    let provider = provider.into();
    debug!(
      container = self.label(),
      token = %token,
      kind = provider.kind(),
      ?scope,
      "registering provider"
    );
    self.inner.registry.assign(token, provider, scope)
  }

  /// Binds `C`'s own type token to `C` as a class provider.
  pub fn register_type<C: Injectable>(&self) -> Result<()> {
    self.register(Token::of::<C>(), Class::of::<C>())
  }

  pub fn register_type_scoped<C: Injectable>(&self, scope: Scope) -> Result<()> {
    self.register_scoped(Token::of::<C>(), Class::of::<C>(), scope)
  }

  /// Binds `token` to a constant.
  pub fn register_value<T: Any + Send + Sync>(&self, token: impl Into<Token>, value: T) -> Result<()> {
    self.register(token, Provider::value(value))
  }

  /// Removes this container's binding for `token`, returning whether one existed.
  pub fn unregister(&self, token: &Token) -> bool {
    let removed = self.inner.registry.remove(token);
    if removed {
      debug!(container = self.label(), token = %token, "unregistered provider");
    }
    removed
  }

  /// Removes every binding of this container, including cached singletons. Parents are
  /// untouched.
  pub fn clear(&self) {
    debug!(
      container = self.label(),
      entries = self.inner.registry.len(),
      "clearing registry"
    );
    self.inner.registry.clear();
  }

  // --- Inspection ---

  /// Whether this container itself binds `token`.
  pub fn has(&self, token: &Token) -> bool {
    self.inner.registry.has(token)
  }

  /// Whether `token` resolves through this container or any ancestor.
  pub fn contains(&self, token: &Token) -> bool {
    self.has(token) || self.parent().map_or(false, |parent| parent.contains(token))
  }

  /// The number of bindings held by this container, excluding ancestors.
  pub fn len(&self) -> usize {
    self.inner.registry.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// A snapshot of the tokens bound by this container, in no particular order.
  pub fn tokens(&self) -> Vec<Token> {
    self.inner.registry.tokens()
  }

  // --- Forking ---

  /// Creates a child container that falls back to `self` for anything it does not bind.
  ///
  /// The child starts empty and its registrations never affect `self`.
  pub fn fork(&self) -> Container {
    let name = self.name().map(|name| format!("{}/fork", name));
    self.fork_with(name)
  }

  pub fn fork_named(&self, name: impl Into<String>) -> Container {
    self.fork_with(Some(name.into()))
  }

  fn fork_with(&self, name: Option<String>) -> Container {
    let config = ContainerConfig {
      name,
      default_scope: self.inner.default_scope,
    };
    let child = Container::from_parts(config, Some(self.clone()));
    debug!(parent = self.label(), child = child.label(), "forked container");
    child
  }

  // --- Resolution ---

  /// Resolves `token` and downcasts the result to `T`.
  ///
  /// # Errors
  ///
  /// Any [`Error`](crate::Error) raised while building the value or its dependencies, or
  /// `TypeMismatch` if the value is not a `T`.
  pub fn resolve<T: Any + Send + Sync>(&self, token: &Token) -> Result<Arc<T>> {
    let instance = self.resolve_instance(token)?;
    downcast(token, instance)
  }

  /// Resolves `C` through its own type token.
  pub fn resolve_type<C: Injectable>(&self) -> Result<Arc<C>> {
    self.resolve(&Token::of::<C>())
  }

  /// Resolves `token` without downcasting.
  pub fn resolve_instance(&self, token: &Token) -> Result<Instance> {
    let context = ResolutionContext::new();
    self.resolve_internal(token, &context)
  }

  fn resolve_internal(&self, token: &Token, context: &ResolutionContext) -> Result<Instance> {
    // Delegation is decided by the same lookup that yields the registration.
    let Some(registration) = self.inner.registry.get(token) else {
      return match &self.inner.parent {
        Some(parent) => {
          trace!(container = self.label(), token = %token, "delegating to parent");
          parent.resolve_internal(token, context)
        }
        None => Err(Error::UnknownToken {
          token: token.clone(),
        }),
      };
    };

    let _guard = context.enter(token).map_err(|err| {
      warn!(container = self.label(), token = %token, "circular dependency detected");
      err
    })?;

    trace!(
      container = self.label(),
      token = %token,
      kind = registration.provider.kind(),
      depth = context.depth(),
      "resolving"
    );

    match &registration.provider {
      Provider::Value(value) => Ok(value.clone()),
      Provider::Factory(factory) => self.apply_scope(token, &registration, || {
        self.invoke_factory(token, factory, context)
      }),
      Provider::Class(class) => {
        self.apply_scope(token, &registration, || self.instantiate(class, context))
      }
    }
  }

  fn apply_scope(
    &self,
    token: &Token,
    registration: &Registration,
    build: impl FnOnce() -> Result<Instance>,
  ) -> Result<Instance> {
    match registration.scope {
      Scope::Transient => build(),
      Scope::Singleton => {
        if let Some(cached) = registration.cached() {
          trace!(container = self.label(), token = %token, "singleton cache hit");
          return Ok(cached.clone());
        }
        registration.get_or_try_init(|| {
          trace!(container = self.label(), token = %token, "constructing singleton");
          build()
        })
      }
    }
  }

  fn invoke_factory(
    &self,
    token: &Token,
    factory: &Factory,
    context: &ResolutionContext,
  ) -> Result<Instance> {
    let mut values = Vec::with_capacity(factory.inject().len());
    for dependency in factory.inject() {
      let value = self.resolve_internal(dependency, context)?;
      values.push((dependency.clone(), value));
    }
    factory.invoke(Args::new(token.clone(), values))
  }

  fn instantiate(&self, class: &Class, context: &ResolutionContext) -> Result<Instance> {
    let dependencies = class.property_dependencies()?;
    class.instantiate(&dependencies, &mut |dependency: &Token| {
      self.resolve_internal(dependency, context)
    })
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("name", &self.inner.name)
      .field("default_scope", &self.inner.default_scope)
      .field("entries", &self.inner.registry.len())
      .field("has_parent", &self.inner.parent.is_some())
      .finish()
  }
}
