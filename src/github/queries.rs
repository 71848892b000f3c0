pub const CREATE_ISSUE: &str = r#"
mutation CreateIssue($input: CreateIssueInput!) {
  createIssue(input: $input) {
    issue { id title number url }
  }
}"#;

pub const ADD_COMMENT: &str = r#"
mutation AddComment($issueId: ID!, $body: String!) {
  addComment(input: { subjectId: $issueId, body: $body }) {
    commentEdge { node { id } }
  }
}"#;

pub const ADD_PROJECT_ITEM: &str = r#"
mutation AddProjectItem($input: AddProjectV2ItemByIdInput!) {
  addProjectV2ItemById(input: $input) {
    item { id }
  }
}"#;

pub const UPDATE_FIELD_VALUE: &str = r#"
mutation UpdateFieldValue($input: UpdateProjectV2ItemFieldValueInput!) {
  updateProjectV2ItemFieldValue(input: $input) {
    projectV2Item { id }
  }
}"#;

// GitHub treats an empty `after` as "from the start".
pub const LIST_ISSUES: &str = r#"
query ListIssues($after: String!, $owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
    issues(first: 100, after: $after) {
      edges { node { id title number url } }
      pageInfo { endCursor hasNextPage }
    }
  }
}"#;
