//! Public macros for resolution and for declaring injectable types.

/// Resolves a value from the global container, panicking on failure.
///
/// With only a type, the type's own token is used. A second argument supplies the token
/// explicitly (anything convertible into a [`Token`](crate::Token)).
///
/// # Panics
///
/// Panics if resolution fails for any reason. For a fallible version use
/// `global().resolve(...)` or [`maybe_resolve!`].
///
/// # Examples
///
/// ```
/// use fibre_inject::{global, resolve, Token};
///
/// let token = Token::symbol("motd");
/// global().register_value(token.clone(), String::from("hello")).unwrap();
///
/// let message = resolve!(String, &token);
/// assert_eq!(*message, "hello");
/// ```
#[macro_export]
macro_rules! resolve {
  ($type:ty) => {
    $crate::resolve_from!($crate::global(), $type)
  };
  ($type:ty, $token:expr) => {
    $crate::resolve_from!($crate::global(), $type, $token)
  };
}

/// Like [`resolve!`], against an explicit container.
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, $type:ty) => {
    $crate::resolve_from!($container, $type, $crate::Token::of::<$type>())
  };
  ($container:expr, $type:ty, $token:expr) => {{
    let token: $crate::Token = ::core::convert::From::from($token);
    $container
      .resolve::<$type>(&token)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service {} for '{}': {}",
          ::core::any::type_name::<$type>(),
          token,
          err
        )
      })
  }};
}

/// Resolves a value from the global container, yielding `None` on failure.
#[macro_export]
macro_rules! maybe_resolve {
  ($type:ty) => {
    $crate::maybe_resolve_from!($crate::global(), $type)
  };
  ($type:ty, $token:expr) => {
    $crate::maybe_resolve_from!($crate::global(), $type, $token)
  };
}

/// Like [`maybe_resolve!`], against an explicit container.
#[macro_export]
macro_rules! maybe_resolve_from {
  ($container:expr, $type:ty) => {
    $crate::maybe_resolve_from!($container, $type, $crate::Token::of::<$type>())
  };
  ($container:expr, $type:ty, $token:expr) => {{
    let token: $crate::Token = ::core::convert::From::from($token);
    $container.resolve::<$type>(&token).ok()
  }};
}

/// Implements [`Injectable`](crate::Injectable) for a struct whose injected fields are
/// `Option<Arc<T>>`.
///
/// Each entry reads `field: Type => token`, or just `field: Type` to inject whatever is bound to
/// `Type`'s own token. The struct must implement `Default`, which serves as its zero-argument
/// constructor. The `extends` form names an embedded field whose type is itself
/// injectable; its declarations are inherited and properties this type does not know are
/// forwarded to it.
///
/// ```
/// use fibre_inject::{injectable, Container, Token};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Repository {
///   url: Option<Arc<String>>,
/// }
///
/// injectable! {
///   Repository {
///     url: String => "database_url",
///   }
/// }
///
/// let container = Container::new();
/// container.register_value("database_url", String::from("postgres://localhost")).unwrap();
/// container.register_type::<Repository>().unwrap();
///
/// let repository = container.resolve_type::<Repository>().unwrap();
/// assert_eq!(repository.url.as_deref().map(String::as_str), Some("postgres://localhost"));
/// ```
#[macro_export]
macro_rules! injectable {
  ($name:ident { $($field:ident : $ty:ty $(=> $token:expr)?),* $(,)? }) => {
    impl $crate::Injectable for $name {
      fn construct() -> Self {
        ::core::default::Default::default()
      }

      fn declare(metadata: &mut $crate::ClassMetadata) {
        let _ = &metadata;
        $( $crate::__injectable_declare!(metadata, $field, $ty $(, $token)?); )*
      }

      fn inject(
        &mut self,
        dependency: &$crate::PropertyDependency,
        value: $crate::Instance,
      ) -> $crate::Result<()> {
        $(
          if dependency.property == ::core::stringify!($field) {
            self.$field = ::core::option::Option::Some(dependency.downcast::<$ty>(value)?);
            return ::core::result::Result::Ok(());
          }
        )*
        ::core::mem::drop(value);
        ::core::result::Result::Err($crate::Error::UnknownProperty {
          class: ::core::any::type_name::<Self>(),
          property: dependency.property.to_owned(),
        })
      }
    }
  };

  ($name:ident extends $base_field:ident : $base:ty { $($field:ident : $ty:ty $(=> $token:expr)?),* $(,)? }) => {
    impl $crate::Injectable for $name {
      fn construct() -> Self {
        ::core::default::Default::default()
      }

      fn declare(metadata: &mut $crate::ClassMetadata) {
        let _ = &metadata;
        $( $crate::__injectable_declare!(metadata, $field, $ty $(, $token)?); )*
      }

      fn base() -> ::core::option::Option<$crate::Class> {
        ::core::option::Option::Some($crate::Class::of::<$base>())
      }

      fn inject(
        &mut self,
        dependency: &$crate::PropertyDependency,
        value: $crate::Instance,
      ) -> $crate::Result<()> {
        $(
          if dependency.property == ::core::stringify!($field) {
            self.$field = ::core::option::Option::Some(dependency.downcast::<$ty>(value)?);
            return ::core::result::Result::Ok(());
          }
        )*
        $crate::Injectable::inject(&mut self.$base_field, dependency, value)
      }
    }
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __injectable_declare {
  ($metadata:ident, $field:ident, $ty:ty, $token:expr) => {
    $metadata.property($token, ::core::stringify!($field));
  };
  ($metadata:ident, $field:ident, $ty:ty) => {
    $metadata.property_of::<$ty>(::core::stringify!($field));
  };
}
