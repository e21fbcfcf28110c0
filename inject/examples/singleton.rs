use fibre_inject::{Container, Provider, Scope, Token};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  let container = Container::new();

  // --- Singleton Registration ---
  // This factory will only be called ONCE.
  container
    .register(
      "singleton_tracker",
      Provider::from_fn(|| {
        println!("Creating SINGLETON RequestTracker...");
        RequestTracker {
          id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
        }
      }),
    )
    .unwrap();

  // --- Transient Registration ---
  // This factory will be called EVERY time the service is resolved.
  container
    .register_scoped(
      "transient_tracker",
      Provider::from_fn(|| {
        println!("Creating TRANSIENT RequestTracker...");
        RequestTracker {
          id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
        }
      }),
      Scope::Transient,
    )
    .unwrap();

  let singleton = Token::named("singleton_tracker");
  let transient = Token::named("transient_tracker");

  println!("--- Resolving Singletons ---");
  let s1 = container.resolve::<RequestTracker>(&singleton).unwrap();
  let s2 = container.resolve::<RequestTracker>(&singleton).unwrap();
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("--- Resolving Transients ---");
  let t1 = container.resolve::<RequestTracker>(&transient).unwrap();
  let t2 = container.resolve::<RequestTracker>(&transient).unwrap();
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);
  assert!(!Arc::ptr_eq(&t1, &t2), "Transient instances should be different");
}
