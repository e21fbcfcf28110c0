//! Property-injection metadata for types the container constructs itself.
//!
//! A type opts in by implementing [`Injectable`]: it supplies a zero-argument constructor,
//! declares which of its properties need which tokens, and accepts the resolved values one
//! property at a time. The container never inspects a type beyond what [`Class`] exposes.
//!
//! Rust has no inheritance, so a type that embeds a "base" type and forwards injection to it
//! reports that base through [`Injectable::base`]. Descriptors are collected from the concrete
//! type first and then from each base in turn.

use crate::error::{Error, Result};
use crate::provider::{downcast, Instance};
use crate::token::Token;

use std::any::{self, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// One `{token, property}` pair declared by a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDependency {
  pub token: Token,
  pub property: &'static str,
}

impl PropertyDependency {
  pub fn new(token: impl Into<Token>, property: &'static str) -> Self {
    Self {
      token: token.into(),
      property,
    }
  }

  /// Downcasts a value resolved for this dependency.
  pub fn downcast<T: Any + Send + Sync>(&self, value: Instance) -> Result<Arc<T>> {
    downcast(&self.token, value)
  }
}

/// The declarations a single type makes about itself, excluding its bases.
#[derive(Debug, Clone, Default)]
pub struct ClassMetadata {
  properties: Vec<PropertyDependency>,
  constructor_params: Vec<Token>,
}

impl ClassMetadata {
  /// Declares that `property` receives the value resolved for `token`.
  pub fn property(&mut self, token: impl Into<Token>, property: &'static str) -> &mut Self {
    self.properties.push(PropertyDependency::new(token, property));
    self
  }

  /// Declares that `property` receives the value bound to `T`'s own type token, for
  /// properties whose declared type is the token.
  pub fn property_of<T: ?Sized + Any>(&mut self, property: &'static str) -> &mut Self {
    self.property(Token::of::<T>(), property)
  }

  /// Declares a constructor parameter. Constructor injection is unsupported, so any declared
  /// parameter makes the class unusable.
  pub fn constructor_param(&mut self, token: impl Into<Token>) -> &mut Self {
    self.constructor_params.push(token.into());
    self
  }

  pub fn properties(&self) -> &[PropertyDependency] {
    &self.properties
  }
}

/// A type the container can construct with no arguments and then property-inject.
///
/// ```
/// use fibre_inject::{ClassMetadata, Injectable, Instance, PropertyDependency, Result, Token};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Greeter {
///   greeting: Option<Arc<String>>,
/// }
///
/// impl Injectable for Greeter {
///   fn construct() -> Self {
///     Self::default()
///   }
///
///   fn declare(metadata: &mut ClassMetadata) {
///     metadata.property(Token::named("greeting"), "greeting");
///   }
///
///   fn inject(&mut self, dependency: &PropertyDependency, value: Instance) -> Result<()> {
///     self.greeting = Some(dependency.downcast(value)?);
///     Ok(())
///   }
/// }
/// ```
pub trait Injectable: Send + Sync + Sized + 'static {
  fn construct() -> Self;

  /// Declares this type's own property dependencies.
  fn declare(_metadata: &mut ClassMetadata) {}

  /// The embedded base type whose declarations are inherited, if any.
  fn base() -> Option<Class> {
    None
  }

  /// Stores the value resolved for `dependency`.
  fn inject(&mut self, dependency: &PropertyDependency, _value: Instance) -> Result<()> {
    Err(Error::UnknownProperty {
      class: any::type_name::<Self>(),
      property: dependency.property.to_owned(),
    })
  }
}

type InstantiateFn =
  fn(&[PropertyDependency], &mut dyn FnMut(&Token) -> Result<Instance>) -> Result<Instance>;

/// A type-erased handle to an [`Injectable`] type.
#[derive(Clone, Copy)]
pub struct Class {
  name: &'static str,
  type_id: TypeId,
  own_dependencies: fn() -> Result<Vec<PropertyDependency>>,
  base: fn() -> Option<Class>,
  instantiate: InstantiateFn,
}

impl Class {
  pub fn of<C: Injectable>() -> Self {
    Self {
      name: any::type_name::<C>(),
      type_id: TypeId::of::<C>(),
      own_dependencies: own_dependencies_of::<C>,
      base: C::base,
      instantiate: instantiate::<C>,
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  /// The token naming this class.
  pub fn token(&self) -> Token {
    Token::Type {
      id: self.type_id,
      name: self.name,
    }
  }

  pub fn base(&self) -> Option<Class> {
    (self.base)()
  }

  /// Descriptors declared by this class alone.
  pub fn own_dependencies(&self) -> Result<Vec<PropertyDependency>> {
    (self.own_dependencies)()
  }

  /// Every descriptor that applies to this class: its own first, then each base's in turn.
  ///
  /// Injection assigns in this order, so when a base declares a property that the derived type
  /// also declares, the base's token is the one that sticks.
  pub fn property_dependencies(&self) -> Result<Vec<PropertyDependency>> {
    let mut all = Vec::new();
    let mut visited = Vec::new();
    let mut current = Some(*self);
    while let Some(class) = current {
      // A base chain that loops back on itself ends at the first repeat.
      if visited.contains(&class.type_id) {
        break;
      }
      visited.push(class.type_id);
      all.extend(class.own_dependencies()?);
      current = class.base();
    }
    Ok(all)
  }

  pub(crate) fn instantiate(
    &self,
    dependencies: &[PropertyDependency],
    resolve: &mut dyn FnMut(&Token) -> Result<Instance>,
  ) -> Result<Instance> {
    (self.instantiate)(dependencies, resolve)
  }
}

impl PartialEq for Class {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for Class {}

impl fmt::Debug for Class {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Class").field(&self.name).finish()
  }
}

fn own_dependencies_of<C: Injectable>() -> Result<Vec<PropertyDependency>> {
  let mut metadata = ClassMetadata::default();
  C::declare(&mut metadata);
  if !metadata.constructor_params.is_empty() {
    return Err(Error::ConstructorInjectionNotImplemented {
      class: any::type_name::<C>(),
    });
  }
  Ok(metadata.properties)
}

fn instantiate<C: Injectable>(
  dependencies: &[PropertyDependency],
  resolve: &mut dyn FnMut(&Token) -> Result<Instance>,
) -> Result<Instance> {
  let mut instance = C::construct();
  for dependency in dependencies {
    let value = resolve(&dependency.token)?;
    instance.inject(dependency, value)?;
  }
  Ok(Arc::new(instance))
}
