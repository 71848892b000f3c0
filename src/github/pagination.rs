use super::transport::Transport;
use super::types::IssueSummary;
use super::GitHubClient;
use crate::error::Result;

/// Fetch every issue in `owner/name`, following cursors until GitHub
/// reports no further page. Returns the repository id from the first page.
pub async fn list_all_issues<T: Transport>(
    client: &GitHubClient<T>,
    owner: &str,
    name: &str,
) -> Result<(String, Vec<IssueSummary>)> {
    let mut cursor = String::new();
    let mut repository_id: Option<String> = None;
    let mut issues = Vec::new();
    let mut pages = 0usize;

    loop {
        let page = client.list_issues_page(owner, name, &cursor).await?;
        pages += 1;
        let repo_id = repository_id.get_or_insert(page.repository_id);
        tracing::debug!(
            repository_id = %repo_id,
            page = pages,
            count = page.issues.len(),
            "fetched issue page"
        );
        issues.extend(page.issues);

        if !page.has_next_page {
            break;
        }
        cursor = page.end_cursor.unwrap_or_default();
    }

    Ok((repository_id.unwrap_or_default(), issues))
}
