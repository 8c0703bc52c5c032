use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label used when neither the task list nor the task lookup names a column
pub const UNKNOWN_COLUMN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Task {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default)]
    pub column_name: Option<String>,

    /// Unix timestamp; Kanboard uses 0 for "no due date"
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub date_due: Option<i64>,
}

impl Task {
    pub fn has_column(&self) -> bool {
        self.column_name
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }

    pub fn column_label(&self) -> &str {
        match self.column_name.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNKNOWN_COLUMN,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let ts = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) => n.as_i64(),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().parse::<i64>().map_err(de::Error::custom)?),
        other => {
            return Err(de::Error::custom(format!(
                "expected timestamp, got {}",
                other
            )))
        }
    };

    Ok(ts.filter(|t| *t != 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kanboard_strings() {
        let json = r#"{"id": "12", "title": "Ship it", "column_name": "Dev", "date_due": "1767225600", "color_id": "yellow"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "12");
        assert_eq!(task.date_due, Some(1_767_225_600));
        assert_eq!(task.column_label(), "Dev");
    }

    #[test]
    fn test_parse_numbers_and_zero_due() {
        let json = r#"{"id": 7, "title": "Fix", "date_due": 0}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "7");
        assert_eq!(task.date_due, None);
        assert!(!task.has_column());
        assert_eq!(task.column_label(), UNKNOWN_COLUMN);
    }

    #[test]
    fn test_missing_and_null_due() {
        let missing: Task = serde_json::from_str(r#"{"id": 1, "title": "a"}"#).unwrap();
        let null: Task = serde_json::from_str(r#"{"id": 1, "title": "a", "date_due": null}"#).unwrap();
        let empty: Task = serde_json::from_str(r#"{"id": 1, "title": "a", "date_due": ""}"#).unwrap();
        assert_eq!(missing.date_due, None);
        assert_eq!(null.date_due, None);
        assert_eq!(empty.date_due, None);
    }

    #[test]
    fn test_null_title_decodes_as_empty() {
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[{"id": 1, "title": null, "column_name": "Dev"}, {"id": 2, "title": "b"}]"#,
        )
        .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "");
        assert_eq!(tasks[0].column_label(), "Dev");
        assert_eq!(tasks[1].title, "b");
    }

    #[test]
    fn test_garbage_due_is_rejected() {
        let result = serde_json::from_str::<Task>(r#"{"id": 1, "title": "a", "date_due": "soon"}"#);
        assert!(result.is_err());
    }
}
