//! Projects v2 GraphQL documents
//!
//! Projects are always selected through `ProjectSummary` and items through
//! `ItemDetails`, so every tool returns the same attributes for the same
//! object.

/// Page size for connection queries (GitHub's maximum)
pub const PAGE_SIZE: u32 = 100;

macro_rules! project_summary {
    () => {
        r#"
fragment ProjectSummary on ProjectV2 {
  id
  number
  title
  shortDescription
  public
  closed
  url
  owner {
    __typename
    ... on User { login }
    ... on Organization { login }
  }
}
"#
    };
}

macro_rules! item_details {
    () => {
        r#"
fragment ItemDetails on ProjectV2Item {
  id
  type
  isArchived
  project { id }
  content {
    __typename
    ... on Issue {
      id
      number
      title
      body
      state
      url
      repository { nameWithOwner }
    }
    ... on PullRequest {
      id
      number
      title
      body
      state
      url
      repository { nameWithOwner }
    }
    ... on DraftIssue {
      id
      title
      body
    }
  }
  fieldValues(first: 50) {
    nodes {
      __typename
      ... on ProjectV2ItemFieldTextValue {
        text
        field { ... on ProjectV2FieldCommon { name } }
      }
      ... on ProjectV2ItemFieldNumberValue {
        number
        field { ... on ProjectV2FieldCommon { name } }
      }
      ... on ProjectV2ItemFieldDateValue {
        date
        field { ... on ProjectV2FieldCommon { name } }
      }
      ... on ProjectV2ItemFieldSingleSelectValue {
        name
        field { ... on ProjectV2FieldCommon { name } }
      }
      ... on ProjectV2ItemFieldIterationValue {
        title
        field { ... on ProjectV2FieldCommon { name } }
      }
    }
  }
}
"#
    };
}

pub const LIST_OWNER_PROJECTS: &str = concat!(
    r#"
query ListOwnerProjects($owner: String!, $first: Int!, $after: String) {
  repositoryOwner(login: $owner) {
    __typename
    ... on ProjectV2Owner {
      projectsV2(first: $first, after: $after) {
        nodes { ...ProjectSummary }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}
"#,
    project_summary!()
);

pub const LIST_REPOSITORY_PROJECTS: &str = concat!(
    r#"
query ListRepositoryProjects($owner: String!, $repo: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $repo) {
    projectsV2(first: $first, after: $after) {
      nodes { ...ProjectSummary }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#,
    project_summary!()
);

pub const GET_PROJECT: &str = concat!(
    r#"
query GetProject($projectId: ID!) {
  node(id: $projectId) {
    __typename
    ...ProjectSummary
  }
}
"#,
    project_summary!()
);

pub const LIST_PROJECT_ITEMS: &str = concat!(
    r#"
query ListProjectItems($projectId: ID!, $first: Int!, $after: String) {
  node(id: $projectId) {
    __typename
    ... on ProjectV2 {
      items(first: $first, after: $after) {
        nodes { ...ItemDetails }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}
"#,
    item_details!()
);

pub const GET_PROJECT_ITEM: &str = concat!(
    r#"
query GetProjectItem($itemId: ID!) {
  node(id: $itemId) {
    __typename
    ...ItemDetails
  }
}
"#,
    item_details!()
);

pub const LIST_PROJECT_FIELDS: &str = r#"
query ListProjectFields($projectId: ID!) {
  node(id: $projectId) {
    __typename
    ... on ProjectV2 {
      fields(first: 100) {
        nodes {
          __typename
          ... on ProjectV2FieldCommon { id name dataType }
          ... on ProjectV2SingleSelectField { options { id name } }
          ... on ProjectV2IterationField {
            configuration {
              iterations { id title }
              completedIterations { id title }
            }
          }
        }
      }
    }
  }
}
"#;

pub const ADD_ITEM_BY_ID: &str = concat!(
    r#"
mutation AddItemById($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: {projectId: $projectId, contentId: $contentId}) {
    item { ...ItemDetails }
  }
}
"#,
    item_details!()
);

pub const ADD_DRAFT_ISSUE: &str = concat!(
    r#"
mutation AddDraftIssue($projectId: ID!, $title: String!, $body: String) {
  addProjectV2DraftIssue(input: {projectId: $projectId, title: $title, body: $body}) {
    projectItem { ...ItemDetails }
  }
}
"#,
    item_details!()
);

pub const UPDATE_ITEM_FIELD: &str = r#"
mutation UpdateItemField($projectId: ID!, $itemId: ID!, $fieldId: ID!, $value: ProjectV2FieldValue!) {
  updateProjectV2ItemFieldValue(
    input: {projectId: $projectId, itemId: $itemId, fieldId: $fieldId, value: $value}
  ) {
    projectV2Item { id }
  }
}
"#;

pub const CLEAR_ITEM_FIELD: &str = r#"
mutation ClearItemField($projectId: ID!, $itemId: ID!, $fieldId: ID!) {
  clearProjectV2ItemFieldValue(
    input: {projectId: $projectId, itemId: $itemId, fieldId: $fieldId}
  ) {
    projectV2Item { id }
  }
}
"#;

pub const DELETE_ITEM: &str = r#"
mutation DeleteItem($projectId: ID!, $itemId: ID!) {
  deleteProjectV2Item(input: {projectId: $projectId, itemId: $itemId}) {
    deletedItemId
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::executor::operation_name;

    #[test]
    fn test_fragments_are_attached() {
        assert!(LIST_OWNER_PROJECTS.contains("fragment ProjectSummary"));
        assert!(GET_PROJECT.contains("fragment ProjectSummary"));
        assert!(LIST_PROJECT_ITEMS.contains("fragment ItemDetails"));
        assert!(ADD_DRAFT_ISSUE.contains("fragment ItemDetails"));
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(operation_name(LIST_OWNER_PROJECTS), "ListOwnerProjects");
        assert_eq!(operation_name(LIST_REPOSITORY_PROJECTS), "ListRepositoryProjects");
        assert_eq!(operation_name(GET_PROJECT), "GetProject");
        assert_eq!(operation_name(ADD_ITEM_BY_ID), "AddItemById");
        assert_eq!(operation_name(UPDATE_ITEM_FIELD), "UpdateItemField");
        assert_eq!(operation_name(DELETE_ITEM), "DeleteItem");
    }
}
