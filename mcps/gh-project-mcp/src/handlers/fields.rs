//! Field-update resolution
//!
//! Turns `field name → JSON value` into field ids and `ProjectV2FieldValue`
//! inputs. Everything here is local: a bad update is rejected before any
//! mutation is sent.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mcp_common::{ToolError, ToolResult};
use serde_json::{json, Value};

use crate::types::{FieldDataType, ProjectField};

/// What to do with one field
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldChange {
    /// Set to this `ProjectV2FieldValue` input object
    Set(Value),
    Clear,
}

/// A field update ready to send
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedUpdate {
    /// Name as the caller wrote it
    pub field_name: String,
    pub field_id: String,
    pub change: FieldChange,
}

fn find_field<'a>(fields: &'a [ProjectField], name: &str) -> Option<&'a ProjectField> {
    fields
        .iter()
        .find(|f| f.name == name)
        .or_else(|| fields.iter().find(|f| f.name.eq_ignore_ascii_case(name)))
}

fn expect_str<'a>(value: &'a Value, what: &str) -> Result<&'a str, String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("expected a non-empty string ({}), got {}", what, value))
}

fn resolve_value(field: &ProjectField, value: &Value) -> Result<FieldChange, String> {
    if value.is_null() {
        return Ok(FieldChange::Clear);
    }

    let input = match field.data_type {
        FieldDataType::Text => {
            let text = value
                .as_str()
                .ok_or_else(|| format!("expected a string, got {}", value))?;
            json!({ "text": text })
        }
        FieldDataType::Number => {
            let number = value
                .as_f64()
                .ok_or_else(|| format!("expected a number, got {}", value))?;
            json!({ "number": number })
        }
        FieldDataType::Date => {
            let date = expect_str(value, "YYYY-MM-DD")?;
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| format!("'{}' is not a date in YYYY-MM-DD form", date))?;
            json!({ "date": date })
        }
        FieldDataType::SingleSelect => {
            let wanted = expect_str(value, "option name")?;
            let option = field.find_option(wanted).ok_or_else(|| {
                format!(
                    "'{}' is not an option; choose one of: {}",
                    wanted,
                    field.option_names().join(", ")
                )
            })?;
            json!({ "singleSelectOptionId": option.id })
        }
        FieldDataType::Iteration => {
            let wanted = expect_str(value, "iteration title")?;
            let iteration = field
                .find_iteration(wanted)
                .ok_or_else(|| format!("no iteration titled '{}'", wanted))?;
            json!({ "iterationId": iteration.id })
        }
        FieldDataType::Unsupported => {
            return Err("this field type cannot be set through the projects API".to_string())
        }
    };

    Ok(FieldChange::Set(input))
}

/// Resolve every update or fail on the first bad one
pub(crate) fn resolve_updates(
    fields: &[ProjectField],
    updates: &BTreeMap<String, Value>,
) -> ToolResult<Vec<ResolvedUpdate>> {
    updates
        .iter()
        .map(|(name, value)| {
            let field = find_field(fields, name).ok_or_else(|| {
                ToolError::validation(format!("project has no field named '{}'", name))
                    .with_field(name.clone())
            })?;
            let change = resolve_value(field, value).map_err(|reason| {
                ToolError::validation(format!("invalid value for field '{}': {}", name, reason))
                    .with_field(name.clone())
            })?;
            Ok(ResolvedUpdate {
                field_name: name.clone(),
                field_id: field.id.clone(),
                change,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_common::ErrorKind;

    fn fields() -> Vec<ProjectField> {
        serde_json::from_value(json!([
            { "id": "F_title", "name": "Title", "dataType": "TITLE" },
            { "id": "F_notes", "name": "Notes", "dataType": "TEXT" },
            { "id": "F_est", "name": "Estimate", "dataType": "NUMBER" },
            { "id": "F_due", "name": "Due", "dataType": "DATE" },
            {
                "id": "F_status", "name": "Status", "dataType": "SINGLE_SELECT",
                "options": [{ "id": "o1", "name": "Todo" }, { "id": "o2", "name": "Done" }]
            },
            {
                "id": "F_sprint", "name": "Sprint", "dataType": "ITERATION",
                "configuration": { "iterations": [{ "id": "it1", "title": "Sprint 1" }] }
            }
        ]))
        .unwrap()
    }

    fn one(name: &str, value: Value) -> ToolResult<Vec<ResolvedUpdate>> {
        let mut updates = BTreeMap::new();
        updates.insert(name.to_string(), value);
        resolve_updates(&fields(), &updates)
    }

    #[test]
    fn test_text_number_date() {
        assert_eq!(one("Notes", json!("hi")).unwrap()[0].change, FieldChange::Set(json!({ "text": "hi" })));
        assert_eq!(
            one("Estimate", json!(5)).unwrap()[0].change,
            FieldChange::Set(json!({ "number": 5.0 }))
        );
        assert_eq!(
            one("Due", json!("2024-06-30")).unwrap()[0].change,
            FieldChange::Set(json!({ "date": "2024-06-30" }))
        );
    }

    #[test]
    fn test_single_select_by_name_case_insensitive() {
        let resolved = one("status", json!("done")).unwrap();
        assert_eq!(resolved[0].field_id, "F_status");
        assert_eq!(resolved[0].field_name, "status");
        assert_eq!(
            resolved[0].change,
            FieldChange::Set(json!({ "singleSelectOptionId": "o2" }))
        );
    }

    #[test]
    fn test_iteration() {
        assert_eq!(
            one("Sprint", json!("sprint 1")).unwrap()[0].change,
            FieldChange::Set(json!({ "iterationId": "it1" }))
        );
    }

    #[test]
    fn test_null_clears() {
        assert_eq!(one("Status", Value::Null).unwrap()[0].change, FieldChange::Clear);
    }

    #[test]
    fn test_unknown_field() {
        let err = one("Priority", json!("P1")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.field.as_deref(), Some("Priority"));
    }

    #[test]
    fn test_wrong_types() {
        assert!(one("Estimate", json!("five")).is_err());
        assert!(one("Notes", json!(3)).is_err());
        assert!(one("Due", json!("30/06/2024")).is_err());
    }

    #[test]
    fn test_unknown_option_lists_choices() {
        let err = one("Status", json!("Blocked")).unwrap_err();
        assert!(err.message.contains("Todo, Done"));
    }

    #[test]
    fn test_read_only_field_type() {
        let err = one("Title", json!("New title")).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("Title"));
    }
}
