// crates/infra/src/graphql/transport.rs
use reqwest::{blocking::Client, header::ACCEPT};
use serde_json::Value;

use deckhand_shared_kernel::{InfrastructureError, Result};

use crate::config::ClientConfig;

/// Raw HTTP answer; status handling is left to the GraphQL client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Posts a JSON body to the GraphQL endpoint.
pub trait GraphQlTransport: Send + Sync {
    fn endpoint(&self) -> &str;
    fn post(&self, body: &Value) -> Result<TransportResponse>;
}

pub struct HttpTransport {
    endpoint: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        let client = Client::builder().timeout(config.timeout).build().map_err(|err| {
            InfrastructureError::Transport {
                endpoint: endpoint.clone(),
                details: "could not build HTTP client".into(),
                source: Some(Box::new(err)),
            }
        })?;
        Ok(Self { endpoint, client })
    }
}

impl GraphQlTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post(&self, body: &Value) -> Result<TransportResponse> {
        let transport_error = |details: &str, err: reqwest::Error| InfrastructureError::Transport {
            endpoint: self.endpoint.clone(),
            details: format!("{details}: {err}"),
            source: Some(Box::new(err)),
        };

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .map_err(|err| transport_error("request failed", err))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|err| transport_error("unreadable body", err))?;
        Ok(TransportResponse { status, body })
    }
}
