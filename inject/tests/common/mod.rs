#![allow(dead_code)]

use fibre_inject::{injectable, ClassMetadata, Injectable, Token};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Routes the container's tracing output to the test harness. Set `RUST_LOG=fibre_inject=trace`
/// to see every resolution step.
pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

// --- Cycle fixtures: A -> B -> C -> A ---

#[derive(Default)]
pub struct CycleA {
  pub b: Option<Arc<CycleB>>,
}

#[derive(Default)]
pub struct CycleB {
  pub c: Option<Arc<CycleC>>,
}

#[derive(Default)]
pub struct CycleC {
  pub a: Option<Arc<CycleA>>,
}

injectable! { CycleA { b: CycleB => Token::of::<CycleB>() } }
injectable! { CycleB { c: CycleC => Token::of::<CycleC>() } }
injectable! { CycleC { a: CycleA => Token::of::<CycleA>() } }

/// A class with no dependencies.
pub struct Plain;

impl Injectable for Plain {
  fn construct() -> Self {
    Plain
  }
}

/// A class that asks for constructor injection.
#[derive(Debug)]
pub struct WantsConstructorArgs;

impl Injectable for WantsConstructorArgs {
  fn construct() -> Self {
    WantsConstructorArgs
  }

  fn declare(metadata: &mut ClassMetadata) {
    metadata.constructor_param(Token::named("config"));
  }
}
