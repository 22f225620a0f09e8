//! HTTP wiring: routes, CORS and per-request context construction.

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use http::method::Method;
use juniper::{graphql_value, FieldError};
use tower_http::cors::CorsLayer;

use crate::context::Context;
use crate::http::{error, graphiql_source, playground_source, GraphQLRequest};
use crate::schema::Schema;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub schema: Arc<Schema>,
    pub store: Arc<Store>,
    /// id of the user answering `me`; resolved against the store per request
    pub viewer_id: Option<String>,
}

impl AppState {
    pub fn new(schema: Schema, store: Arc<Store>, viewer_id: Option<String>) -> Self {
        Self {
            schema: Arc::new(schema),
            store,
            viewer_id,
        }
    }
}

///
/// Build the application router: the GraphQL endpoint on GET and POST plus
/// the interactive IDE pages, everything behind a permissive CORS policy.
///
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(graphql).post(graphql))
        .route("/graphiql", get(graphiql))
        .route("/playground", get(playground))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn graphql(
    State(state): State<AppState>,
    method: Method,
    RawQuery(raw_query): RawQuery,
    body: String,
) -> Response {
    let request = match method {
        Method::GET => GraphQLRequest::from_get(raw_query.as_deref().unwrap_or("")),
        _ => GraphQLRequest::from_post(&body),
    };
    match request {
        Ok(request) => {
            tracing::debug!(operations = ?request.operation_names(), "executing graphql request");
            let viewer = state
                .viewer_id
                .as_deref()
                .and_then(|id| state.store.user(id))
                .map(ToOwned::to_owned);
            let context = Context::new(Arc::clone(&state.store), viewer);
            request.execute(&state.schema, &context)
        }
        Err(err) => {
            tracing::debug!(%err, "rejecting malformed graphql request");
            error(FieldError::new(err.to_string(), graphql_value!(None)))
        }
    }
}

async fn graphiql() -> Response {
    graphiql_source("/graphql")
}

async fn playground() -> Response {
    playground_source("/graphql")
}
