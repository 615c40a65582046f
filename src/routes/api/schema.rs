//! Request bodies, response bodies and the input checks shared by the
//! category and task handlers.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    db::entities::{category, task},
    error::AppError,
};

pub const NAME_REQUIRED: &str = "Name is required";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const INVALID_DATE: &str = "Invalid date format";

pub const DEFAULT_PRIORITY: &str = "medium";
pub const DEFAULT_STATUS: &str = "pending";

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Body of `POST` and `PUT` on `/api/categories`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body of `POST` and `PUT` on `/api/tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct TaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub category_id: Option<i32>,
    pub due_date: Option<String>,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

impl From<task::Model> for TaskResponse {
    fn from(model: task::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            priority: model.priority,
            status: model.status,
            category_id: model.category_id,
            due_date: model.due_date.map(|due| due.to_rfc3339()),
        }
    }
}

// A key that is present (even as `null`) deserialises to `Some`; a missing
// key falls back to `Default`, i.e. `None`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A required field counts as missing when absent, `null` or `""`. Any other
/// string, whitespace included, is taken as given.
pub fn require_text<'a>(value: Option<&'a str>, message: &'static str) -> Result<&'a str, AppError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(AppError::bad_request(message)),
    }
}

/// `null`, `false` and `""` mean "no due date"; strings must be ISO-8601.
pub fn parse_due_date(value: &Value) -> Result<Option<DateTimeWithTimeZone>, AppError> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(text) if text.is_empty() => Ok(None),
        Value::String(text) => parse_timestamp(text)
            .map(Some)
            .ok_or_else(|| AppError::bad_request(INVALID_DATE)),
        _ => Err(AppError::bad_request(INVALID_DATE)),
    }
}

/// Accepts RFC 3339, naive date-times (read as UTC) and bare dates.
pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{TaskPayload, parse_due_date, parse_timestamp, require_text};

    #[test]
    fn only_absent_or_empty_text_is_missing() {
        assert!(require_text(None, "Name is required").is_err());
        assert!(require_text(Some(""), "Name is required").is_err());
        assert_eq!(require_text(Some("   "), "Name is required").unwrap(), "   ");
        assert_eq!(require_text(Some(" Work "), "Name is required").unwrap(), " Work ");
    }

    #[test]
    fn parses_the_common_iso_shapes() {
        let expected = Utc.with_ymd_and_hms(2030, 1, 15, 9, 30, 0).unwrap();

        for text in [
            "2030-01-15T09:30:00",
            "2030-01-15T09:30:00Z",
            "2030-01-15T11:30:00+02:00",
            "2030-01-15 09:30:00",
            "2030-01-15T09:30",
        ] {
            let parsed = parse_timestamp(text).unwrap_or_else(|| panic!("{text} should parse"));
            assert_eq!(parsed, expected, "{text}");
        }

        let with_fraction = parse_timestamp("2030-01-15T09:30:00.250000").unwrap();
        assert_eq!(with_fraction.timestamp_subsec_millis(), 250);

        let date_only = parse_timestamp("2030-01-15").unwrap();
        assert_eq!(date_only, Utc.with_ymd_and_hms(2030, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_timestamp("invalid-date").is_none());
        assert!(parse_timestamp("2030-13-45").is_none());
        assert!(parse_due_date(&json!("invalid-date")).is_err());
        assert!(parse_due_date(&json!(12345)).is_err());
    }

    #[test]
    fn falsy_due_dates_clear_the_value() {
        assert_eq!(parse_due_date(&json!(null)).unwrap(), None);
        assert_eq!(parse_due_date(&json!("")).unwrap(), None);
        assert_eq!(parse_due_date(&json!(false)).unwrap(), None);
    }

    #[test]
    fn distinguishes_absent_keys_from_null() {
        let absent: TaskPayload = serde_json::from_value(json!({ "title": "x" })).unwrap();
        assert_eq!(absent.category_id, None);
        assert_eq!(absent.due_date, None);

        let cleared: TaskPayload =
            serde_json::from_value(json!({ "category_id": null, "due_date": null })).unwrap();
        assert_eq!(cleared.category_id, Some(None));
        assert_eq!(cleared.due_date, Some(serde_json::Value::Null));

        let set: TaskPayload = serde_json::from_value(json!({ "category_id": 3 })).unwrap();
        assert_eq!(set.category_id, Some(Some(3)));
    }
}
