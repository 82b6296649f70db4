// crates/infra/src/graphql/client.rs
use log::{debug, error};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};

use deckhand_shared_kernel::{InfrastructureError, Result};

use super::transport::GraphQlTransport;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    path: Option<Vec<Value>>,
}

/// Thin GraphQL client: one POST per operation, no caching.
pub struct GraphQlClient<T> {
    transport: T,
}

impl<T: GraphQlTransport> GraphQlClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs `document` and decodes the `operation` root field.
    ///
    /// A response with GraphQL `errors`, or without the root field, is
    /// logged and yields `Ok(None)`.
    pub fn execute<R: DeserializeOwned>(&self, operation: &str, document: &str, variables: Value) -> Result<Option<R>> {
        let endpoint = self.transport.endpoint();
        debug!("graphql {operation} -> {endpoint}");
        let response = self.transport.post(&json!({ "query": document, "variables": variables }))?;

        match response.status {
            200..=299 => {}
            401 => return Err(InfrastructureError::Unauthenticated { endpoint: endpoint.to_string() }.into()),
            status => {
                return Err(InfrastructureError::HttpStatus { endpoint: endpoint.to_string(), status }.into());
            }
        }

        let envelope: Envelope = serde_json::from_str(&response.body)?;
        let errors = envelope.errors.unwrap_or_default();
        if !errors.is_empty() {
            for err in &errors {
                error!("graphql {operation} failed: {} (path {:?})", err.message, err.path.as_deref().unwrap_or_default());
            }
            return Ok(None);
        }

        let field = envelope
            .data
            .and_then(|mut data| data.get_mut(operation).map(Value::take))
            .filter(|value| !value.is_null());
        match field {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => {
                debug!("graphql {operation} returned no data");
                Ok(None)
            }
        }
    }

    /// Like [`GraphQlClient::execute`], but missing data is an error.
    pub fn require<R: DeserializeOwned>(&self, operation: &str, document: &str, variables: Value) -> Result<R> {
        self.execute(operation, document, variables)?
            .ok_or_else(|| InfrastructureError::EmptyResponse { operation: operation.to_string() }.into())
    }
}
