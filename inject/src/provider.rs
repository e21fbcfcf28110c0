//! Provider recipes and the scope policy attached to a registration.

use crate::class::Class;
use crate::error::{Error, Result};
use crate::token::Token;

use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

/// A type-erased, shareable value produced by the container.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Controls whether a provider's result is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scope {
  /// The first resolution builds the value; every later resolution returns it.
  #[default]
  Singleton,
  /// Every resolution builds a new value.
  Transient,
}

/// Downcasts an erased instance, reporting `token` on failure.
pub(crate) fn downcast<T: Any + Send + Sync>(token: &Token, instance: Instance) -> Result<Arc<T>> {
  instance.downcast::<T>().map_err(|_| Error::TypeMismatch {
    token: token.clone(),
    expected: any::type_name::<T>(),
  })
}

/// The resolved dependencies handed to a factory, in declared order.
#[derive(Clone)]
pub struct Args {
  owner: Token,
  values: Vec<(Token, Instance)>,
}

impl Args {
  pub(crate) fn new(owner: Token, values: Vec<(Token, Instance)>) -> Self {
    Self { owner, values }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Returns the argument at `index` as `T`.
  ///
  /// Asking past the end of the inject list is a provider error, not a lookup miss.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
    let (token, instance) = self.values.get(index).ok_or_else(|| Error::InvalidProvider {
      token: self.owner.clone(),
      reason: format!(
        "factory reads argument {} but only {} tokens are injected",
        index,
        self.values.len()
      ),
    })?;
    downcast(token, instance.clone())
  }

  /// The untyped argument at `index`.
  pub fn instance(&self, index: usize) -> Option<&Instance> {
    self.values.get(index).map(|(_, instance)| instance)
  }

  fn expect_arity(&self, arity: usize) -> Result<()> {
    if self.values.len() == arity {
      return Ok(());
    }
    Err(Error::InvalidProvider {
      token: self.owner.clone(),
      reason: format!(
        "factory takes {} arguments but {} tokens are injected",
        arity,
        self.values.len()
      ),
    })
  }
}

/// Conversion from the positional argument list into a factory's parameter type.
///
/// Implemented for [`Args`] itself and for tuples of `Arc<T>` up to six elements.
pub trait FromArgs: Sized {
  fn from_args(args: Args) -> Result<Self>;
}

impl FromArgs for Args {
  fn from_args(args: Args) -> Result<Self> {
    Ok(args)
  }
}

impl FromArgs for () {
  fn from_args(args: Args) -> Result<Self> {
    args.expect_arity(0)
  }
}

macro_rules! impl_from_args_for_tuple {
  ($arity:expr; $($ty:ident => $idx:tt),+) => {
    impl<$($ty: Any + Send + Sync),+> FromArgs for ($(Arc<$ty>,)+) {
      fn from_args(args: Args) -> Result<Self> {
        args.expect_arity($arity)?;
        Ok(($(args.get::<$ty>($idx)?,)+))
      }
    }
  };
}

impl_from_args_for_tuple!(1; A => 0);
impl_from_args_for_tuple!(2; A => 0, B => 1);
impl_from_args_for_tuple!(3; A => 0, B => 1, C => 2);
impl_from_args_for_tuple!(4; A => 0, B => 1, C => 2, D => 3);
impl_from_args_for_tuple!(5; A => 0, B => 1, C => 2, D => 3, E => 4);
impl_from_args_for_tuple!(6; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5);

type FactoryFn = Box<dyn Fn(Args) -> Result<Instance> + Send + Sync>;

/// A function plus the tokens whose values it receives as arguments.
pub struct Factory {
  inject: Vec<Token>,
  call: FactoryFn,
}

impl Factory {
  pub fn inject(&self) -> &[Token] {
    &self.inject
  }

  pub(crate) fn invoke(&self, args: Args) -> Result<Instance> {
    (self.call)(args)
  }
}

/// How a registration produces its value.
pub enum Provider {
  /// A precomputed constant, returned as-is on every resolution.
  Value(Instance),
  Factory(Factory),
  /// A type built with no arguments and then property-injected.
  Class(Class),
}

impl Provider {
  pub fn value<T: Any + Send + Sync>(value: T) -> Self {
    Provider::Value(Arc::new(value))
  }

  /// A value provider for an already-erased instance.
  pub fn instance(instance: Instance) -> Self {
    Provider::Value(instance)
  }

  /// A factory without dependencies.
  pub fn from_fn<T, F>(factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn() -> T + Send + Sync + 'static,
  {
    Provider::Factory(Factory {
      inject: Vec::new(),
      call: Box::new(move |args: Args| {
        <() as FromArgs>::from_args(args)?;
        Ok(Arc::new(factory()) as Instance)
      }),
    })
  }

  /// A factory receiving the values of `inject`, resolved in order.
  ///
  /// ```
  /// use fibre_inject::{Provider, Token};
  /// use std::sync::Arc;
  ///
  /// let provider = Provider::factory(
  ///   [Token::named("port"), Token::named("host")],
  ///   |(port, host): (Arc<u16>, Arc<String>)| format!("{}:{}", host, port),
  /// );
  /// # drop(provider);
  /// ```
  pub fn factory<I, A, T, F>(inject: I, factory: F) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Token>,
    A: FromArgs,
    T: Any + Send + Sync,
    F: Fn(A) -> T + Send + Sync + 'static,
  {
    Self::try_factory(inject, move |args: A| Ok(factory(args)))
  }

  /// Like [`Provider::factory`], for factories that can fail.
  pub fn try_factory<I, A, T, F>(inject: I, factory: F) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Token>,
    A: FromArgs,
    T: Any + Send + Sync,
    F: Fn(A) -> Result<T> + Send + Sync + 'static,
  {
    Provider::Factory(Factory {
      inject: inject.into_iter().map(Into::into).collect(),
      call: Box::new(move |args: Args| {
        let value = factory(A::from_args(args)?)?;
        Ok(Arc::new(value) as Instance)
      }),
    })
  }

  pub fn class(class: Class) -> Self {
    Provider::Class(class)
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Provider::Value(_) => "value",
      Provider::Factory(_) => "factory",
      Provider::Class(_) => "class",
    }
  }
}

impl From<Class> for Provider {
  fn from(class: Class) -> Self {
    Provider::Class(class)
  }
}

impl fmt::Debug for Provider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Provider::Value(_) => f.write_str("Value(..)"),
      Provider::Factory(factory) => f
        .debug_struct("Factory")
        .field("inject", &factory.inject)
        .finish_non_exhaustive(),
      Provider::Class(class) => f.debug_tuple("Class").field(&class.name()).finish(),
    }
  }
}
