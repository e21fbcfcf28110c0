use crate::token::Token;
use thiserror::Error;

/// The error type for registration and resolution.
///
/// Every variant describes a wiring mistake. Nothing here is transient, so callers are expected
/// to surface these at application start-up rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("A provider entry already exists for '{token}'.")]
  DuplicateProviderToken { token: Token },

  #[error("Token '{token}' has not been registered with the container.")]
  UnknownToken { token: Token },

  /// `path` lists the in-flight tokens, outermost first, at the moment `token` was revisited.
  #[error("Circular dependency detected while resolving '{token}'.")]
  CircularDependency { token: Token, path: Vec<Token> },

  #[error("The provider registered for '{token}' is invalid: {reason}")]
  InvalidProvider { token: Token, reason: String },

  #[error("Constructor injection is not implemented, please use property injection (for '{class}').")]
  ConstructorInjectionNotImplemented { class: &'static str },

  #[error("Value resolved for '{token}' is not of the requested type '{expected}'.")]
  TypeMismatch { token: Token, expected: &'static str },

  #[error("Class '{class}' has no injectable property named '{property}'.")]
  UnknownProperty { class: &'static str, property: String },
}

/// A specialized `Result` type for `fibre_inject` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
