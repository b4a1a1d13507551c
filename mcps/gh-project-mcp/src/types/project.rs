//! Project type definitions
//!
//! `Project` is the tool-facing view; `RawProject` mirrors the
//! `ProjectSummary` GraphQL fragment.

use serde::{Deserialize, Serialize};

/// Kind of account owning a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerKind {
    User,
    Organization,
}

/// Account owning a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOwner {
    pub login: String,
    pub kind: OwnerKind,
}

/// A GitHub Projects v2 project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Opaque node id (`PVT_...`)
    pub id: String,
    /// Project number, unique per owner
    pub number: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub public: bool,
    pub closed: bool,
    pub url: String,
    pub owner: ProjectOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOwner {
    #[serde(rename = "__typename")]
    typename: String,
    login: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProject {
    id: String,
    number: u64,
    title: String,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    public: bool,
    #[serde(default)]
    closed: bool,
    url: String,
    owner: RawOwner,
}

impl From<RawOwner> for ProjectOwner {
    fn from(raw: RawOwner) -> Self {
        let kind = match raw.typename.as_str() {
            "Organization" => OwnerKind::Organization,
            _ => OwnerKind::User,
        };
        Self {
            login: raw.login,
            kind,
        }
    }
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        Self {
            id: raw.id,
            number: raw.number,
            title: raw.title,
            short_description: raw.short_description.filter(|d| !d.is_empty()),
            public: raw.public,
            closed: raw.closed,
            url: raw.url,
            owner: raw.owner.into(),
        }
    }
}
