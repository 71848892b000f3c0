use crate::config::ProjectConfig;
use crate::error::Result;
use crate::fingerprint::{ExistingIssueIndex, Fingerprint};
use crate::github::transport::Transport;
use crate::github::GitHubClient;
use crate::model::record::SourceRecord;
use crate::model::work_result::{Outcome, WorkResult};
use crate::render;

/// Drives each source record through existence check, creation, comments,
/// project linking and field updates, one record at a time.
pub struct Migrator<'a, T> {
    client: &'a GitHubClient<T>,
    project: &'a ProjectConfig,
    repository_id: String,
    index: ExistingIssueIndex,
}

impl<'a, T: Transport> Migrator<'a, T> {
    pub fn new(
        client: &'a GitHubClient<T>,
        project: &'a ProjectConfig,
        repository_id: String,
        index: ExistingIssueIndex,
    ) -> Self {
        Self {
            client,
            project,
            repository_id,
            index,
        }
    }

    /// Stops at the first error; records already processed stay on GitHub.
    pub async fn run(&mut self, records: &[SourceRecord]) -> Result<Vec<WorkResult>> {
        let mut works = Vec::with_capacity(records.len());
        for record in records {
            works.push(self.process(record).await?);
        }
        Ok(works)
    }

    pub async fn process(&mut self, record: &SourceRecord) -> Result<WorkResult> {
        let title = render::issue_title(record);

        let fingerprint = Fingerprint::of(&title);
        tracing::debug!(fingerprint = fingerprint.as_str(), "checking {title}");
        if let Some(existing) = self.index.get(&fingerprint) {
            tracing::info!("{title} already exists");
            return Ok(WorkResult {
                title,
                source_url: record.url().to_string(),
                target_url: existing.url.clone(),
                outcome: Outcome::Exists,
            });
        }

        tracing::info!("{title} is being created");
        let body = render::issue_body(record, &self.project.columns);
        let issue = self
            .client
            .create_issue(&self.repository_id, &title, &body)
            .await?;

        for comment in record.merge_columns("Comment") {
            self.client
                .add_comment(&issue.id, &render::comment_body(comment))
                .await?;
        }

        let project_id = &self.project.github_project_id;
        let item_id = self.client.add_issue_to_project(project_id, &issue.id).await?;

        for (name, column) in &self.project.columns {
            let Some(field) = &column.field_value else {
                continue;
            };
            match field.resolve(record.get(name))? {
                Some(value) => {
                    self.client
                        .update_field_value(project_id, &item_id, field, &value)
                        .await?
                }
                None => tracing::debug!("{title}: no value for field {name}, skipping"),
            }
        }

        tracing::info!("{title} created as #{}", issue.number);
        let result = WorkResult {
            title,
            source_url: record.url().to_string(),
            target_url: issue.url.clone(),
            outcome: Outcome::Created,
        };
        self.index.insert_as(fingerprint, issue);
        Ok(result)
    }
}
