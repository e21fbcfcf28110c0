//! # Fibre Inject
//!
//! A token-based Inversion of Control (IoC) container for Rust with property injection,
//! singleton/transient scopes and forkable child containers.
//!
//! ## Core Concepts
//!
//! - **Token**: the key a binding is registered under. A Rust type ([`Token::of`]), a string
//!   name ([`Token::named`]) or a unique [`Symbol`].
//! - **Provider**: how a token's value is produced. A constant ([`Provider::value`]), a
//!   factory whose arguments are other tokens ([`Provider::factory`]), or a [`Class`] that the
//!   container constructs and then property-injects.
//! - **Scope**: [`Scope::Singleton`] builds once and caches; [`Scope::Transient`] rebuilds on
//!   every resolution.
//! - **Fork**: [`Container::fork`] creates a child that may shadow its parent's bindings while
//!   falling back to the parent for everything else.
//!
//! Circular dependencies are reported as [`Error::CircularDependency`] instead of overflowing
//! the stack, including cycles that cross fork boundaries.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{injectable, Container, Provider, Scope, Token};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Greeter {
//!   greeting: Option<Arc<String>>,
//! }
//!
//! injectable! {
//!   Greeter {
//!     greeting: String => "greeting",
//!   }
//! }
//!
//! let container = Container::new();
//! container
//!   .register("greeting", Provider::factory([Token::named("name")], |(name,): (Arc<String>,)| {
//!     format!("Hello, {}!", name)
//!   }))
//!   .unwrap();
//! container.register_value("name", String::from("World")).unwrap();
//! container.register_type_scoped::<Greeter>(Scope::Transient).unwrap();
//!
//! let greeter = container.resolve_type::<Greeter>().unwrap();
//! assert_eq!(greeter.greeting.as_deref().map(String::as_str), Some("Hello, World!"));
//!
//! // A fork overrides a binding without touching the parent.
//! let scoped = container.fork();
//! scoped.register_value("greeting", String::from("Hi!")).unwrap();
//! assert_eq!(*scoped.resolve::<String>(&Token::named("greeting")).unwrap(), "Hi!");
//! assert_eq!(*container.resolve::<String>(&Token::named("greeting")).unwrap(), "Hello, World!");
//! ```

mod class;
mod config;
mod container;
mod core;
mod error;
mod global;
mod macros;
mod provider;
mod registry;
mod token;

pub use class::{Class, ClassMetadata, Injectable, PropertyDependency};
pub use config::{ContainerBuilder, ContainerConfig};
pub use container::Container;
pub use error::{Error, Result};
pub use global::global;
pub use provider::{Args, Factory, FromArgs, Instance, Provider, Scope};
pub use token::{Symbol, Token};
