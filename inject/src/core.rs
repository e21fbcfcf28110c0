//! Core, non-public data structures for the resolution engine.

use crate::error::{Error, Result};
use crate::provider::{Instance, Provider, Scope};
use crate::token::Token;

use once_cell::sync::OnceCell;
use std::cell::RefCell;

/// The tokens in flight for one top-level `resolve` call, outermost first.
///
/// A context is created per call and threaded through every recursive step, including
/// delegation to parent containers, so a cycle that crosses a fork boundary is still seen.
#[derive(Default)]
pub(crate) struct ResolutionContext {
  stack: RefCell<Vec<Token>>,
}

impl ResolutionContext {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn contains(&self, token: &Token) -> bool {
    self.stack.borrow().contains(token)
  }

  /// Pushes `token`, failing if it is already being resolved further up the path.
  pub(crate) fn enter(&self, token: &Token) -> Result<ResolutionGuard<'_>> {
    if self.contains(token) {
      return Err(Error::CircularDependency {
        token: token.clone(),
        path: self.stack.borrow().clone(),
      });
    }
    self.stack.borrow_mut().push(token.clone());
    Ok(ResolutionGuard { context: self })
  }

  pub(crate) fn depth(&self) -> usize {
    self.stack.borrow().len()
  }
}

/// An RAII guard marking a token as in flight.
///
/// Dropping it pops the token, so the context only ever holds the current path from the root
/// call. Siblings that share a dependency therefore do not look like a cycle.
pub(crate) struct ResolutionGuard<'a> {
  context: &'a ResolutionContext,
}

impl Drop for ResolutionGuard<'_> {
  fn drop(&mut self) {
    self.context.stack.borrow_mut().pop();
  }
}

/// A registry record: the provider, its scope, and the singleton slot.
pub(crate) struct Registration {
  pub(crate) provider: Provider,
  pub(crate) scope: Scope,
  cell: OnceCell<Instance>,
}

impl Registration {
  pub(crate) fn new(provider: Provider, scope: Scope) -> Self {
    Self {
      provider,
      scope,
      cell: OnceCell::new(),
    }
  }

  pub(crate) fn cached(&self) -> Option<&Instance> {
    self.cell.get()
  }

  /// Returns the cached instance or builds and stores it. Concurrent callers block until the
  /// single winner finishes; a failed build leaves the slot empty.
  ///
  /// Cycle detection is per call, so it cannot see another thread's path. Two threads entering
  /// a singleton cycle from opposite ends each hold one slot while waiting on the other's, and
  /// deadlock instead of returning `CircularDependency`. A single thread always gets the error.
  pub(crate) fn get_or_try_init(&self, build: impl FnOnce() -> Result<Instance>) -> Result<Instance> {
    self.cell.get_or_try_init(build).cloned()
  }
}
