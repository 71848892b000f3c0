use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::queries;
use super::rate_limit::CallKind;
use crate::error::{GraphqlError, MigrateError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// The fixed set of GraphQL operations the migration issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateIssue,
    AddComment,
    AddProjectItem,
    UpdateFieldValue,
    ListIssues,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::CreateIssue => "createIssue",
            Operation::AddComment => "addComment",
            Operation::AddProjectItem => "addProjectV2ItemById",
            Operation::UpdateFieldValue => "updateProjectV2ItemFieldValue",
            Operation::ListIssues => "listIssues",
        }
    }

    pub fn query(self) -> &'static str {
        match self {
            Operation::CreateIssue => queries::CREATE_ISSUE,
            Operation::AddComment => queries::ADD_COMMENT,
            Operation::AddProjectItem => queries::ADD_PROJECT_ITEM,
            Operation::UpdateFieldValue => queries::UPDATE_FIELD_VALUE,
            Operation::ListIssues => queries::LIST_ISSUES,
        }
    }

    pub fn kind(self) -> CallKind {
        match self {
            Operation::CreateIssue => CallKind::Creation,
            _ => CallKind::General,
        }
    }
}

/// Sends one GraphQL operation and returns its `data` payload.
///
/// Implementations issue exactly one request per call and never dedupe
/// mutations; pacing and retries belong to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, operation: Operation, variables: &Value) -> Result<Value>;
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphqlError>>,
}

/// Map a successfully received response body onto `data` or a typed failure.
pub fn parse_response(operation: Operation, body: &str) -> Result<Value> {
    let response: GraphqlResponse =
        serde_json::from_str(body).map_err(|e| MigrateError::UnexpectedResponse {
            operation: operation.name(),
            detail: format!("invalid JSON: {e}"),
        })?;

    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        return Err(MigrateError::from_graphql_errors(errors));
    }

    response.data.ok_or_else(|| MigrateError::UnexpectedResponse {
        operation: operation.name(),
        detail: "no data in response".into(),
    })
}

pub struct HttpTransport {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, reqwest::Client::new())
    }

    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, operation: Operation, variables: &Value) -> Result<Value> {
        tracing::debug!(operation = operation.name(), "sending GraphQL request");
        let body = serde_json::json!({
            "query": operation.query(),
            "variables": variables,
        });
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header("User-Agent", "tracker-migrate")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(MigrateError::Transport { status, body: text });
        }

        parse_response(operation, &text)
    }
}
