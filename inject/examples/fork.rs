use fibre_inject::{Container, Provider, Token};
use std::sync::Arc;

// Application-wide settings live in the root container; each request forks it and overrides
// only what differs.
fn handle_request(root: &Container, user: &str) -> String {
  let request = root.fork_named(format!("request:{}", user));
  request.register_value("user", user.to_owned()).unwrap();

  let greeting = request.resolve::<String>(&Token::named("greeting")).unwrap();
  let user = request.resolve::<String>(&Token::named("user")).unwrap();
  format!("{}, {}!", greeting, user)
}

fn main() {
  tracing_subscriber::fmt().with_env_filter("fibre_inject=trace").init();

  let root = Container::builder().name("app").build();
  root
    .register(
      "greeting",
      Provider::factory([Token::named("language")], |(language,): (Arc<&'static str>,)| {
        match *language {
          "de" => String::from("Hallo"),
          _ => String::from("Hello"),
        }
      }),
    )
    .unwrap();
  root.register_value("language", "en").unwrap();

  println!("{}", handle_request(&root, "alice"));
  println!("{}", handle_request(&root, "bob"));

  // The root never saw the per-request bindings.
  assert!(!root.contains(&Token::named("user")));
}
