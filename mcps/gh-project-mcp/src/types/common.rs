//! GraphQL connection shapes shared by paginated queries

use serde::Deserialize;

/// Cursor state of a connection page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor for the next page, if GitHub says there is one
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}

/// A `{ nodes, pageInfo }` connection; GitHub may return null nodes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    pub fn into_parts(self) -> (Vec<T>, PageInfo) {
        (self.nodes.into_iter().flatten().collect(), self.page_info)
    }
}
