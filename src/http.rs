//! GraphQL-over-HTTP request handling.
//!
//! Adapts the wire format (single or batched query documents, GET and POST
//! flavors) to juniper execution and renders the resulting response body.

use std::collections::HashMap;
use std::convert::{TryFrom, TryInto};

use axum::response::{IntoResponse, Response};
use failure::{Error as Failure, Fail};
use http::{header, status::StatusCode};
use juniper::{
    http as juniper_http, DefaultScalarValue, FieldError, GraphQLType, InputValue, RootNode,
    ScalarRefValue, ScalarValue,
};
use juniper_http::GraphQLRequest as GqlR;
use serde::Deserialize;

#[derive(Debug, Fail)]
enum Error {
    #[fail(display = "Missing query argument")]
    MissingQuery,
    #[fail(display = "Missing post body")]
    MissingPostBody,
    #[fail(display = "Invalid body")]
    InvalidBody,
    #[fail(display = "Prohibit extra field")]
    ProhibitExtraField(String),
    #[fail(display = "Query parameter must not occur more than once")]
    MultipleQueryParameter,
    #[fail(display = "Operation name parameter must not occur more than once")]
    MultipleOperationNameParameter,
    #[fail(display = "Variables parameter must not occur more than once")]
    MultipleVariablesParameter,
    #[fail(display = "Invalid variables parameter")]
    InvalidVariablesParameter,
}

#[derive(Debug, serde_derive::Deserialize, PartialEq)]
#[serde(untagged)]
#[serde(bound = "InputValue<S>: Deserialize<'de>")]
enum GraphQLBatchRequest<S = DefaultScalarValue>
where
    S: ScalarValue,
{
    Single(juniper_http::GraphQLRequest<S>),
    Batch(Vec<juniper_http::GraphQLRequest<S>>),
}

impl<S> GraphQLBatchRequest<S>
where
    S: ScalarValue,
    for<'b> &'b S: ScalarRefValue<'b>,
{
    pub fn execute<'a, CtxT, QueryT, MutationT>(
        &'a self,
        root_node: &'a RootNode<QueryT, MutationT, S>,
        context: &CtxT,
    ) -> GraphQLBatchResponse<'a, S>
    where
        QueryT: GraphQLType<S, Context = CtxT>,
        MutationT: GraphQLType<S, Context = CtxT>,
    {
        match self {
            &GraphQLBatchRequest::Single(ref request) => {
                GraphQLBatchResponse::Single(request.execute(root_node, context))
            }
            &GraphQLBatchRequest::Batch(ref requests) => GraphQLBatchResponse::Batch(
                requests
                    .iter()
                    .map(|request| request.execute(root_node, context))
                    .collect(),
            ),
        }
    }

    pub fn operation_names(&self) -> Vec<Option<&str>> {
        match self {
            GraphQLBatchRequest::Single(req) => vec![req.operation_name()],
            GraphQLBatchRequest::Batch(reqs) => {
                reqs.iter().map(|req| req.operation_name()).collect()
            }
        }
    }
}

#[derive(serde_derive::Serialize)]
#[serde(untagged)]
enum GraphQLBatchResponse<'a, S = DefaultScalarValue>
where
    S: ScalarValue,
{
    Single(juniper_http::GraphQLResponse<'a, S>),
    Batch(Vec<juniper_http::GraphQLResponse<'a, S>>),
}

impl<'a, S> GraphQLBatchResponse<'a, S>
where
    S: ScalarValue,
{
    fn is_ok(&self) -> bool {
        match self {
            &GraphQLBatchResponse::Single(ref response) => response.is_ok(),
            &GraphQLBatchResponse::Batch(ref responses) => responses
                .iter()
                .fold(true, |ok, response| ok && response.is_ok()),
        }
    }
}

fn response(status_code: StatusCode, content_type: &'static str, body: String) -> Response {
    (
        status_code,
        [(header::CONTENT_TYPE, content_type)],
        body,
    )
        .into_response()
}

fn html(body: String) -> Response {
    response(StatusCode::OK, "text/html", body)
}

fn json(status_code: StatusCode, body: String) -> Response {
    response(status_code, "application/json", body)
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(deny_unknown_fields)]
struct GetGraphQLRequest {
    query: String,
    operation_name: Option<String>,
    variables: Option<String>,
}

impl<S> TryFrom<GetGraphQLRequest> for GqlR<S>
where
    S: ScalarValue,
{
    type Error = Failure;

    fn try_from(get_req: GetGraphQLRequest) -> Result<Self, Self::Error> {
        let GetGraphQLRequest {
            query,
            operation_name,
            variables,
        } = get_req;
        let variables = match variables {
            Some(variables) => match serde_json::from_str(&variables) {
                Ok(variables) => Some(variables),
                Err(_) => return Err(Error::InvalidVariablesParameter.into()),
            },
            None => None,
        };
        Ok(Self::new(query, operation_name, variables))
    }
}

/// Simple wrapper around an incoming GraphQL request
///
/// Constructed from either a POST body (single request or batch) or a GET
/// query string (`query`, `operation_name`, `variables` parameters, the
/// latter JSON-encoded).
#[derive(Debug, PartialEq)]
pub struct GraphQLRequest<S = DefaultScalarValue>(GraphQLBatchRequest<S>)
where
    S: ScalarValue;

impl<S> GraphQLRequest<S>
where
    S: ScalarValue,
{
    pub fn from_get(raw_query: &str) -> Result<Self, Failure> {
        let mut parameters: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(raw_query.as_bytes()) {
            parameters
                .entry(key.into_owned())
                .or_insert_with(Vec::new)
                .push(value.into_owned());
        }
        let mut query: Option<String> = None;
        let mut operation_name: Option<String> = None;
        let mut variables: Option<String> = None;
        for (key, value) in &parameters {
            match key.as_str() {
                "query" => {
                    if value.len() > 1 {
                        return Err(Error::MultipleQueryParameter.into());
                    } else {
                        query.replace(value[0].to_owned());
                    }
                }
                "operation_name" => {
                    if value.len() > 1 {
                        return Err(Error::MultipleOperationNameParameter.into());
                    } else {
                        operation_name.replace(value[0].to_owned());
                    }
                }
                "variables" => {
                    if value.len() > 1 {
                        return Err(Error::MultipleVariablesParameter.into());
                    } else {
                        variables.replace(value[0].to_owned());
                    }
                }
                _ => return Err(Error::ProhibitExtraField(key.to_owned()).into()),
            }
        }
        let query = match query {
            Some(query) => query,
            None => return Err(Error::MissingQuery.into()),
        };
        let req = GetGraphQLRequest {
            variables,
            operation_name,
            query,
        };
        Ok(Self(GraphQLBatchRequest::Single(req.try_into()?)))
    }

    pub fn from_post(body: &str) -> Result<Self, Failure>
    where
        InputValue<S>: for<'de> Deserialize<'de>,
    {
        if body.is_empty() {
            return Err(Error::MissingPostBody.into());
        }
        match serde_json::from_str::<GraphQLBatchRequest<S>>(body) {
            Ok(request) => Ok(Self(request)),
            Err(_) => Err(Error::InvalidBody.into()),
        }
    }
}

impl<S> GraphQLRequest<S>
where
    S: ScalarValue,
    for<'b> &'b S: ScalarRefValue<'b>,
{
    /// Execute an incoming GraphQL query
    pub fn execute<CtxT, QueryT, MutationT>(
        &self,
        root_node: &RootNode<QueryT, MutationT, S>,
        context: &CtxT,
    ) -> Response
    where
        QueryT: GraphQLType<S, Context = CtxT>,
        MutationT: GraphQLType<S, Context = CtxT>,
    {
        let response = self.0.execute(root_node, context);
        let status_code = if response.is_ok() {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        let body = serde_json::to_string(&response).unwrap();

        json(status_code, body)
    }

    /// Returns the operation names associated with this request.
    ///
    /// For batch requests there will be multiple names.
    pub fn operation_names(&self) -> Vec<Option<&str>> {
        self.0.operation_names()
    }
}

/// Constructs an error response outside of the normal execution flow
pub fn error(error: FieldError) -> Response {
    let response = juniper_http::GraphQLResponse::error(error);
    let body = serde_json::to_string(&response).unwrap();
    json(StatusCode::BAD_REQUEST, body)
}

/// Generate an HTML page containing GraphiQL
pub fn graphiql_source(graphql_endpoint_url: &str) -> Response {
    html(juniper::http::graphiql::graphiql_source(
        graphql_endpoint_url,
    ))
}

/// Generate an HTML page containing GraphQL Playground
pub fn playground_source(graphql_endpoint_url: &str) -> Response {
    html(juniper::http::playground::playground_source(
        graphql_endpoint_url,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    type Request = GraphQLRequest<DefaultScalarValue>;

    #[test]
    fn post_single_request() {
        let req = Request::from_post(r#"{"query": "{ users { id } }"}"#).unwrap();
        assert_eq!(
            req,
            GraphQLRequest(GraphQLBatchRequest::Single(GqlR::new(
                "{ users { id } }".into(),
                None,
                None,
            )))
        );
    }

    #[test]
    fn post_request_with_operation_name_and_variables() {
        let body = r#"{
            "query": "query Hero($id: String!) { user(id: $id) { id } }",
            "operationName": "Hero",
            "variables": {"id": "1"}
        }"#;
        let req = Request::from_post(body).unwrap();
        assert_eq!(req.operation_names(), vec![Some("Hero")]);
    }

    #[test]
    fn post_batch_request() {
        let body = r#"[{"query": "{ users { id } }"}, {"query": "{ messages { id } }"}]"#;
        let req = Request::from_post(body).unwrap();
        assert_eq!(req.operation_names().len(), 2);
    }

    #[test]
    fn post_rejects_empty_and_malformed_bodies() {
        assert!(Request::from_post("").is_err());
        assert!(Request::from_post("not json").is_err());
        assert!(Request::from_post(r#"{"queries": "{ users { id } }"}"#).is_err());
    }

    #[test]
    fn get_request_from_query_string() {
        let req = Request::from_get("query=%7B%20users%20%7B%20id%20%7D%20%7D").unwrap();
        assert_eq!(
            req,
            GraphQLRequest(GraphQLBatchRequest::Single(GqlR::new(
                "{ users { id } }".into(),
                None,
                None,
            )))
        );
    }

    #[test]
    fn get_request_decodes_variables_parameter() {
        let req = Request::from_get(
            "query=query%20Hero(%24id%3A%20String!)%20%7B%20user(id%3A%20%24id)%20%7B%20id%20%7D%20%7D\
             &operation_name=Hero&variables=%7B%22id%22%3A%20%221%22%7D",
        )
        .unwrap();
        assert_eq!(req.operation_names(), vec![Some("Hero")]);
    }

    #[test]
    fn get_request_parameter_errors() {
        assert!(Request::from_get("").is_err());
        assert!(Request::from_get("operation_name=Hero").is_err());
        assert!(Request::from_get("query=%7B%7D&query=%7B%7D").is_err());
        assert!(Request::from_get("query=%7B%7D&variables=not-json").is_err());
        assert!(Request::from_get("query=%7B%7D&extra=1").is_err());
    }
}
