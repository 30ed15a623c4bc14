use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::{GraphqlError, Result};

/// Executes one GraphQL document and returns its `data` object
#[async_trait]
pub trait GraphqlExecutor: Send + Sync {
    async fn execute(&self, query: &str, token: &str) -> Result<Value>;
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// Take a top-level field out of a `data` object
pub fn take_field(mut data: Value, field: &str) -> Result<Value> {
    data.get_mut(field)
        .map(Value::take)
        .ok_or_else(|| GraphqlError::MissingField(field.to_string()))
}

/// GraphQL over HTTP POST with a bearer token
pub struct HttpGraphqlClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpGraphqlClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphqlExecutor for HttpGraphqlClient {
    async fn execute(&self, query: &str, token: &str) -> Result<Value> {
        tracing::debug!(endpoint = %self.endpoint, query = query, "Executing GraphQL document");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                endpoint = %self.endpoint,
                status = %status,
                "GraphQL backend returned non-success status"
            );
            return Err(GraphqlError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GraphqlResponse = response.json().await?;
        if !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed.errors.into_iter().map(|e| e.message).collect();
            tracing::warn!(errors = ?messages, "GraphQL backend reported errors");
            return Err(GraphqlError::Errors(messages));
        }

        parsed
            .data
            .filter(|d| !d.is_null())
            .ok_or_else(|| GraphqlError::MissingField("data".to_string()))
    }
}
