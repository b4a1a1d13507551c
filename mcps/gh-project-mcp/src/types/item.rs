//! Project item type definitions
//!
//! Items are resolved to a typed content variant and a map of typed field
//! values. The `Raw*` structs mirror the `ItemDetails` GraphQL fragment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// GitHub's `ProjectV2ItemType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Issue,
    PullRequest,
    DraftIssue,
    /// The viewer cannot see the backing content
    Redacted,
}

/// Issue or pull request backing an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedContent {
    pub id: String,
    pub number: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub state: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

/// Draft issue living only inside the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftContent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Content variant of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemContent {
    Issue(LinkedContent),
    PullRequest(LinkedContent),
    DraftIssue(DraftContent),
}

/// Current value of one project field on an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    /// ISO date, `YYYY-MM-DD`
    Date(String),
    /// Name of the selected option
    SingleSelect(String),
    /// Title of the iteration
    Iteration(String),
}

/// An entry in a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub id: String,
    pub project_id: String,
    pub item_type: ItemType,
    pub archived: bool,
    /// `None` for redacted items
    pub content: Option<ItemContent>,
    /// Field name → value, for fields that have a value
    pub field_values: BTreeMap<String, FieldValue>,
}

/// Result of `delete_project_item`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedItem {
    pub deleted_item_id: String,
}

// ============================================================================
// Raw GraphQL shapes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRepository {
    name_with_owner: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawLinked {
    id: String,
    number: u64,
    title: String,
    #[serde(default)]
    body: Option<String>,
    state: String,
    url: String,
    #[serde(default)]
    repository: Option<RawRepository>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDraft {
    id: String,
    title: String,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
enum RawContent {
    Issue(RawLinked),
    PullRequest(RawLinked),
    DraftIssue(RawDraft),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawFieldRef {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
enum RawFieldValue {
    #[serde(rename = "ProjectV2ItemFieldTextValue")]
    Text {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        field: Option<RawFieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldNumberValue")]
    Number {
        #[serde(default)]
        number: Option<f64>,
        #[serde(default)]
        field: Option<RawFieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldDateValue")]
    Date {
        #[serde(default)]
        date: Option<String>,
        #[serde(default)]
        field: Option<RawFieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldSingleSelectValue")]
    SingleSelect {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        field: Option<RawFieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldIterationValue")]
    Iteration {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        field: Option<RawFieldRef>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFieldValues {
    #[serde(default)]
    nodes: Vec<Option<RawFieldValue>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawProjectRef {
    id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawItem {
    id: String,
    #[serde(rename = "type")]
    item_type: ItemType,
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    project: Option<RawProjectRef>,
    #[serde(default)]
    content: Option<RawContent>,
    #[serde(default)]
    field_values: Option<RawFieldValues>,
}

impl RawItem {
    pub(crate) fn project_id(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.id.as_str())
    }

    /// Convert to the tool-facing item; `fallback_project_id` is used when
    /// the response did not select the parent project
    pub(crate) fn into_item(self, fallback_project_id: &str) -> ProjectItem {
        let project_id = self
            .project
            .map(|p| p.id)
            .unwrap_or_else(|| fallback_project_id.to_string());

        let content = self.content.and_then(RawContent::into_content);

        let field_values = self
            .field_values
            .map(|fv| {
                fv.nodes
                    .into_iter()
                    .flatten()
                    .filter_map(RawFieldValue::into_entry)
                    .collect()
            })
            .unwrap_or_default();

        ProjectItem {
            id: self.id,
            project_id,
            item_type: self.item_type,
            archived: self.is_archived,
            content,
            field_values,
        }
    }
}

impl From<RawLinked> for LinkedContent {
    fn from(raw: RawLinked) -> Self {
        Self {
            id: raw.id,
            number: raw.number,
            title: raw.title,
            body: raw.body.filter(|b| !b.is_empty()),
            state: raw.state,
            url: raw.url,
            repository: raw.repository.map(|r| r.name_with_owner),
        }
    }
}

impl RawContent {
    fn into_content(self) -> Option<ItemContent> {
        match self {
            RawContent::Issue(raw) => Some(ItemContent::Issue(raw.into())),
            RawContent::PullRequest(raw) => Some(ItemContent::PullRequest(raw.into())),
            RawContent::DraftIssue(raw) => Some(ItemContent::DraftIssue(DraftContent {
                id: raw.id,
                title: raw.title,
                body: raw.body.filter(|b| !b.is_empty()),
            })),
            RawContent::Unsupported => None,
        }
    }
}

impl RawFieldValue {
    fn into_entry(self) -> Option<(String, FieldValue)> {
        let (field, value) = match self {
            RawFieldValue::Text { text, field } => (field, text.map(FieldValue::Text)),
            RawFieldValue::Number { number, field } => (field, number.map(FieldValue::Number)),
            RawFieldValue::Date { date, field } => (field, date.map(FieldValue::Date)),
            RawFieldValue::SingleSelect { name, field } => {
                (field, name.map(FieldValue::SingleSelect))
            }
            RawFieldValue::Iteration { title, field } => {
                (field, title.map(FieldValue::Iteration))
            }
            RawFieldValue::Unsupported => return None,
        };
        let name = field.and_then(|f| f.name).filter(|n| !n.is_empty())?;
        Some((name, value?))
    }
}
