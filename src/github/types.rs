use serde::{Deserialize, Serialize};

/// An issue as returned by `createIssue` and the issue listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub id: String,
    pub title: String,
    pub number: u64,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateIssueData {
    #[serde(rename = "createIssue")]
    pub create_issue: CreateIssuePayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateIssuePayload {
    pub issue: IssueSummary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddProjectItemData {
    #[serde(rename = "addProjectV2ItemById")]
    pub add_item: AddProjectItemPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddProjectItemPayload {
    pub item: NodeId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListIssuesData {
    pub repository: RepositoryPage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryPage {
    pub id: String,
    pub issues: IssueConnection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueConnection {
    pub edges: Vec<IssueEdge>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueEdge {
    pub node: IssueSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// One page of the repository's issue listing.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuePage {
    pub repository_id: String,
    pub issues: Vec<IssueSummary>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

impl From<ListIssuesData> for IssuePage {
    fn from(data: ListIssuesData) -> Self {
        let repo = data.repository;
        IssuePage {
            repository_id: repo.id,
            issues: repo.issues.edges.into_iter().map(|e| e.node).collect(),
            end_cursor: repo.issues.page_info.end_cursor,
            has_next_page: repo.issues.page_info.has_next_page,
        }
    }
}
