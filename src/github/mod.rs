pub mod pagination;
pub mod queries;
pub mod rate_limit;
pub mod retry;
pub mod transport;
pub mod types;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{MigrateError, Result};
use crate::fields::{FieldValue, TypedValue};
use rate_limit::RateLimiter;
use retry::RetryPolicy;
use transport::{Operation, Transport};
use types::{AddProjectItemData, CreateIssueData, IssuePage, IssueSummary, ListIssuesData};

/// GraphQL client for the migration. Every call is paced by the
/// [`RateLimiter`] and retried by the [`RetryPolicy`].
pub struct GitHubClient<T> {
    transport: T,
    limiter: RateLimiter,
    retry: RetryPolicy,
}

impl<T: Transport> GitHubClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, RateLimiter::default(), RetryPolicy::default())
    }

    pub fn with_policy(transport: T, limiter: RateLimiter, retry: RetryPolicy) -> Self {
        Self {
            transport,
            limiter,
            retry,
        }
    }

    async fn execute(&self, operation: Operation, variables: Value) -> Result<Value> {
        let variables = &variables;
        self.retry
            .run(
                move || async move {
                    self.limiter.acquire(operation.kind()).await;
                    self.transport.send(operation, variables).await
                },
                |attempt, wait, err| {
                    tracing::warn!(
                        "{} rejected ({err}), cooling down for {:?} (attempt {attempt})",
                        operation.name(),
                        wait
                    );
                },
            )
            .await
    }

    async fn execute_as<D: DeserializeOwned>(
        &self,
        operation: Operation,
        variables: Value,
    ) -> Result<D> {
        let data = self.execute(operation, variables).await?;
        serde_json::from_value(data).map_err(|e| MigrateError::UnexpectedResponse {
            operation: operation.name(),
            detail: e.to_string(),
        })
    }

    pub async fn create_issue(
        &self,
        repository_id: &str,
        title: &str,
        body: &str,
    ) -> Result<IssueSummary> {
        let variables = json!({
            "input": { "repositoryId": repository_id, "title": title, "body": body }
        });
        let data: CreateIssueData = self.execute_as(Operation::CreateIssue, variables).await?;
        Ok(data.create_issue.issue)
    }

    pub async fn add_comment(&self, issue_id: &str, body: &str) -> Result<()> {
        let variables = json!({ "issueId": issue_id, "body": body });
        self.execute(Operation::AddComment, variables).await?;
        Ok(())
    }

    /// Returns the project item id.
    pub async fn add_issue_to_project(&self, project_id: &str, issue_id: &str) -> Result<String> {
        let variables = json!({
            "input": { "projectId": project_id, "contentId": issue_id }
        });
        let data: AddProjectItemData = self
            .execute_as(Operation::AddProjectItem, variables)
            .await?;
        Ok(data.add_item.item.id)
    }

    pub async fn update_field_value(
        &self,
        project_id: &str,
        item_id: &str,
        field: &FieldValue,
        value: &TypedValue,
    ) -> Result<()> {
        let Some(field_id) = field.github_field_id.as_deref() else {
            return Ok(());
        };
        let variables = json!({
            "input": {
                "projectId": project_id,
                "itemId": item_id,
                "fieldId": field_id,
                "value": field.payload(value),
            }
        });
        self.execute(Operation::UpdateFieldValue, variables).await?;
        Ok(())
    }

    pub async fn list_issues_page(
        &self,
        owner: &str,
        name: &str,
        after: &str,
    ) -> Result<IssuePage> {
        let variables = json!({ "after": after, "owner": owner, "name": name });
        let data: ListIssuesData = self.execute_as(Operation::ListIssues, variables).await?;
        Ok(data.into())
    }
}
