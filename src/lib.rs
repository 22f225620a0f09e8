/*!

# message_board

A minimal GraphQL API server built with [Juniper][Juniper]: a `User`/`Message`
type graph resolved over an in-memory record store, served over HTTP with
[axum][axum].

The queryable surface:

* `users`, `user(id)`, `me` — user lookups; `me` answers with the viewer
  carried in the per-request context.
* `messages`, `message(id)` — message lookups.
* `User.messages` and `Message.user` — the relationship fields linking the
  two types through the shared store.

The store is seeded once at startup and never mutated, so a single instance
is shared across requests without locking. There are no mutations,
subscriptions or persistence.

## Links

* [Juniper][Juniper]
* [axum][axum]
* [GraphQL][GraphQL]

## License

This project is under the MIT license.

[Juniper]: https://github.com/graphql-rust/juniper
[axum]: https://github.com/tokio-rs/axum
[GraphQL]: http://graphql.org

*/

pub mod context;
pub mod http;
pub mod schema;
pub mod server;
pub mod store;
pub mod types;

pub use crate::context::Context;
pub use crate::http::GraphQLRequest;
pub use crate::schema::{schema, Query, Schema};
pub use crate::store::Store;
pub use crate::types::{Message, User};
