//! The per-container token map.

use crate::core::Registration;
use crate::error::{Error, Result};
use crate::provider::{Provider, Scope};
use crate::token::Token;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Maps each token to exactly one registration.
///
/// Lookups hand out an `Arc` to the record so the engine never holds a map guard while it
/// recurses into other tokens.
#[derive(Default)]
pub(crate) struct Registry {
  entries: DashMap<Token, Arc<Registration>>,
}

impl Registry {
  pub(crate) fn assign(&self, token: Token, provider: Provider, scope: Scope) -> Result<()> {
    match self.entries.entry(token) {
      Entry::Occupied(occupied) => Err(Error::DuplicateProviderToken {
        token: occupied.key().clone(),
      }),
      Entry::Vacant(vacant) => {
        vacant.insert(Arc::new(Registration::new(provider, scope)));
        Ok(())
      }
    }
  }

  pub(crate) fn get(&self, token: &Token) -> Option<Arc<Registration>> {
    self.entries.get(token).map(|entry| entry.value().clone())
  }

  pub(crate) fn has(&self, token: &Token) -> bool {
    self.entries.contains_key(token)
  }

  pub(crate) fn remove(&self, token: &Token) -> bool {
    self.entries.remove(token).is_some()
  }

  pub(crate) fn clear(&self) {
    self.entries.clear();
  }

  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }

  pub(crate) fn tokens(&self) -> Vec<Token> {
    self.entries.iter().map(|entry| entry.key().clone()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_can_assign_a_token_to_an_entry() {
    let registry = Registry::default();
    let token = Token::symbol("MY_TOKEN");

    registry
      .assign(token.clone(), Provider::value(100_i32), Scope::Singleton)
      .unwrap();

    assert!(registry.has(&token));
    assert!(registry.get(&token).is_some());
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn test_can_be_cleared() {
    let registry = Registry::default();
    let token = Token::symbol("MY_TOKEN");
    registry
      .assign(token.clone(), Provider::value(100_i32), Scope::Singleton)
      .unwrap();

    registry.clear();

    assert!(!registry.has(&token));
    assert!(registry.get(&token).is_none());
    assert_eq!(registry.len(), 0);
  }

  #[test]
  fn test_cannot_assign_multiple_providers_to_a_single_token() {
    let registry = Registry::default();
    let token = Token::symbol("MY_TOKEN");
    registry
      .assign(token.clone(), Provider::value(100_i32), Scope::Singleton)
      .unwrap();

    let err = registry
      .assign(token.clone(), Provider::value(100_i32), Scope::Singleton)
      .unwrap_err();

    assert_eq!(err, Error::DuplicateProviderToken { token });
  }

  #[test]
  fn test_returns_the_correct_provider_for_a_given_token() {
    let registry = Registry::default();
    let token_a = Token::symbol("MY_TOKEN_A");
    let token_b = Token::symbol("MY_TOKEN_B");
    registry
      .assign(token_a.clone(), Provider::value("token_a_value"), Scope::Singleton)
      .unwrap();
    registry
      .assign(token_b.clone(), Provider::value("token_b_value"), Scope::Transient)
      .unwrap();

    let a = registry.get(&token_a).unwrap();
    let b = registry.get(&token_b).unwrap();

    match (&a.provider, &b.provider) {
      (Provider::Value(a), Provider::Value(b)) => {
        assert_eq!(a.downcast_ref::<&str>(), Some(&"token_a_value"));
        assert_eq!(b.downcast_ref::<&str>(), Some(&"token_b_value"));
      }
      other => panic!("unexpected providers: {:?}", other),
    }
    assert_eq!(b.scope, Scope::Transient);
  }

  #[test]
  fn test_remove_frees_the_token() {
    let registry = Registry::default();
    let token = Token::named("config");
    registry
      .assign(token.clone(), Provider::value(1_u8), Scope::Singleton)
      .unwrap();

    assert!(registry.remove(&token));
    assert!(!registry.remove(&token));
    assert!(registry
      .assign(token.clone(), Provider::value(2_u8), Scope::Singleton)
      .is_ok());
    assert_eq!(registry.tokens(), vec![token]);
  }
}
