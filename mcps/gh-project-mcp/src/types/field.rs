//! Project field definitions
//!
//! Needed to turn a `field name → value` update into the field id and
//! `ProjectV2FieldValue` input GitHub's mutation expects.

use serde::Deserialize;

/// GitHub's `ProjectV2FieldType`, restricted to what we distinguish
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldDataType {
    Text,
    Number,
    Date,
    SingleSelect,
    Iteration,
    /// Assignees, labels, milestone, repository, title, reviewers, ...
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Iteration {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationConfiguration {
    #[serde(default)]
    pub iterations: Vec<Iteration>,
    #[serde(default)]
    pub completed_iterations: Vec<Iteration>,
}

/// One field of a project
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectField {
    pub id: String,
    pub name: String,
    pub data_type: FieldDataType,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub configuration: Option<IterationConfiguration>,
}

impl ProjectField {
    /// Find a single-select option by id or case-insensitive name
    pub fn find_option(&self, wanted: &str) -> Option<&SelectOption> {
        self.options
            .iter()
            .find(|o| o.id == wanted)
            .or_else(|| self.options.iter().find(|o| o.name.eq_ignore_ascii_case(wanted)))
    }

    /// Find an iteration (active or completed) by id or case-insensitive title
    pub fn find_iteration(&self, wanted: &str) -> Option<&Iteration> {
        let config = self.configuration.as_ref()?;
        let all = || config.iterations.iter().chain(config.completed_iterations.iter());
        all()
            .find(|i| i.id == wanted)
            .or_else(|| all().find(|i| i.title.eq_ignore_ascii_case(wanted)))
    }

    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_field() -> ProjectField {
        serde_json::from_value(json!({
            "__typename": "ProjectV2SingleSelectField",
            "id": "PVTSSF_1",
            "name": "Status",
            "dataType": "SINGLE_SELECT",
            "options": [
                { "id": "opt_todo", "name": "Todo" },
                { "id": "opt_done", "name": "Done" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_find_option_by_name_or_id() {
        let field = status_field();
        assert_eq!(field.find_option("done").map(|o| o.id.as_str()), Some("opt_done"));
        assert_eq!(field.find_option("opt_todo").map(|o| o.name.as_str()), Some("Todo"));
        assert!(field.find_option("Blocked").is_none());
        assert_eq!(field.option_names(), vec!["Todo", "Done"]);
    }

    #[test]
    fn test_unknown_data_type() {
        let field: ProjectField = serde_json::from_value(json!({
            "id": "PVTF_9", "name": "Assignees", "dataType": "ASSIGNEES"
        }))
        .unwrap();
        assert_eq!(field.data_type, FieldDataType::Unsupported);
    }

    #[test]
    fn test_find_iteration_includes_completed() {
        let field: ProjectField = serde_json::from_value(json!({
            "id": "PVTIF_1",
            "name": "Sprint",
            "dataType": "ITERATION",
            "configuration": {
                "iterations": [{ "id": "it_3", "title": "Sprint 3" }],
                "completedIterations": [{ "id": "it_2", "title": "Sprint 2" }]
            }
        }))
        .unwrap();
        assert_eq!(field.find_iteration("sprint 2").map(|i| i.id.as_str()), Some("it_2"));
        assert_eq!(field.find_iteration("it_3").map(|i| i.title.as_str()), Some("Sprint 3"));
        assert!(field.find_iteration("Sprint 9").is_none());
    }
}
