//! Registry keys.

use std::any::{self, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// A unique, opaque identifier.
///
/// Every call to [`Symbol::new`] yields a symbol that is equal only to itself and its clones,
/// even when two symbols share a description.
#[derive(Clone)]
pub struct Symbol {
  id: u64,
  description: Arc<str>,
}

impl Symbol {
  pub fn new(description: impl Into<Arc<str>>) -> Self {
    Self {
      id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
      description: description.into(),
    }
  }

  pub fn description(&self) -> &str {
    &self.description
  }
}

impl PartialEq for Symbol {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for Symbol {}

impl Hash for Symbol {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Symbol#{}({})", self.id, self.description)
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Symbol({})", self.description)
  }
}

/// Identifies a binding inside a container.
///
/// A token is either a Rust type (the "constructor" form, usually paired with a class provider),
/// a string name, or a [`Symbol`].
#[derive(Clone)]
pub enum Token {
  Type { id: TypeId, name: &'static str },
  Name(Arc<str>),
  Symbol(Symbol),
}

impl Token {
  /// The token for the type `T`.
  pub fn of<T: ?Sized + Any>() -> Self {
    Token::Type {
      id: TypeId::of::<T>(),
      name: any::type_name::<T>(),
    }
  }

  pub fn named(name: impl Into<Arc<str>>) -> Self {
    Token::Name(name.into())
  }

  /// A fresh symbol token. See [`Symbol::new`].
  pub fn symbol(description: impl Into<Arc<str>>) -> Self {
    Token::Symbol(Symbol::new(description))
  }

  /// Whether this token names a type rather than an opaque string or symbol.
  pub fn is_constructor(&self) -> bool {
    matches!(self, Token::Type { .. })
  }
}

impl PartialEq for Token {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Token::Type { id: a, .. }, Token::Type { id: b, .. }) => a == b,
      (Token::Name(a), Token::Name(b)) => a == b,
      (Token::Symbol(a), Token::Symbol(b)) => a == b,
      _ => false,
    }
  }
}

impl Eq for Token {}

impl Hash for Token {
  fn hash<H: Hasher>(&self, state: &mut H) {
    std::mem::discriminant(self).hash(state);
    match self {
      Token::Type { id, .. } => id.hash(state),
      Token::Name(name) => name.hash(state),
      Token::Symbol(symbol) => symbol.hash(state),
    }
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Token::Type { name, .. } => f.write_str(name),
      Token::Name(name) => f.write_str(name),
      Token::Symbol(symbol) => fmt::Display::fmt(symbol, f),
    }
  }
}

impl fmt::Debug for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Token::Type { name, .. } => write!(f, "Type({})", name),
      Token::Name(name) => write!(f, "Name({:?})", name),
      Token::Symbol(symbol) => fmt::Debug::fmt(symbol, f),
    }
  }
}

impl From<&str> for Token {
  fn from(name: &str) -> Self {
    Token::named(name)
  }
}

impl From<String> for Token {
  fn from(name: String) -> Self {
    Token::named(name)
  }
}

impl From<Symbol> for Token {
  fn from(symbol: Symbol) -> Self {
    Token::Symbol(symbol)
  }
}

impl From<&Token> for Token {
  fn from(token: &Token) -> Self {
    token.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn test_symbols_with_same_description_are_distinct() {
    let a = Token::symbol("MY_TOKEN");
    let b = Token::symbol("MY_TOKEN");
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
  }

  #[test]
  fn test_type_tokens_compare_by_type() {
    struct Example;
    assert_eq!(Token::of::<Example>(), Token::of::<Example>());
    assert_ne!(Token::of::<Example>(), Token::of::<String>());
    assert!(Token::of::<Example>().is_constructor());
    assert!(!Token::named("Example").is_constructor());
  }

  #[test]
  fn test_names_and_symbols_never_collide() {
    let mut set = HashSet::new();
    set.insert(Token::named("x"));
    set.insert(Token::symbol("x"));
    set.insert(Token::from("x"));
    assert_eq!(set.len(), 2);
  }

  #[test]
  fn test_symbol_keeps_its_description() {
    let symbol = Symbol::new("db");
    let token = Token::from(symbol.clone());
    assert_eq!(symbol.description(), "db");
    match token {
      Token::Symbol(inner) => {
        assert_eq!(inner, symbol);
        assert_eq!(inner.description(), "db");
      }
      other => panic!("expected a symbol token, got {:?}", other),
    }
    assert_ne!(Symbol::new("db"), symbol);
  }

  #[test]
  fn test_display_forms() {
    assert_eq!(Token::named("config").to_string(), "config");
    assert_eq!(Token::symbol("db").to_string(), "Symbol(db)");
    assert_eq!(Token::of::<u32>().to_string(), "u32");
  }
}
