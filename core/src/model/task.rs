use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned task identifier.
pub type TaskId = u64;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[serde(rename = "low", alias = "låg")]
    Low,
    #[default]
    #[serde(rename = "medium", alias = "medel")]
    Medium,
    #[serde(rename = "high", alias = "hög")]
    High,
    /// Any value this client does not recognise. Never offered for selection.
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Unknown => "unknown",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High | Priority::Unknown => Priority::Low,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Priority::Low | Priority::Unknown => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l" | "low" | "låg" => Ok(Priority::Low),
            "m" | "med" | "medium" | "medel" => Ok(Priority::Medium),
            "h" | "high" | "hög" => Ok(Priority::High),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "pending", alias = "ej påbörjad")]
    Pending,
    #[serde(rename = "in-progress", alias = "pågående")]
    InProgress,
    #[serde(rename = "done", alias = "klar")]
    Done,
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Done => "done",
            Status::Unknown => "unknown",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Status::Pending => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done | Status::Unknown => Status::Pending,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Status::Pending | Status::Unknown => Status::Done,
            Status::InProgress => Status::Pending,
            Status::Done => Status::InProgress,
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "p" | "pending" | "todo" | "ej påbörjad" => Ok(Status::Pending),
            "i" | "in-progress" | "doing" | "pågående" => Ok(Status::InProgress),
            "d" | "done" | "klar" => Ok(Status::Done),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as owned by the remote API. The client only ever holds
/// short-lived copies of these.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
}

/// Records written by older clients carry `null` where a value is optional.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for create and update: every editable field, no id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
}

/// `dueDate` travels as `YYYY-MM-DD` or `null`. Older records store `""`
/// for "no deadline" and some writers send a full timestamp.
pub(crate) mod due_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse(text).map(Some).map_err(de::Error::custom),
        }
    }

    pub fn parse(text: &str) -> Result<NaiveDate, String> {
        if let Ok(date) = NaiveDate::parse_from_str(text, FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.date_naive())
            .map_err(|_| format!("invalid date '{}'", text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_task_with_date() {
        let task: Task = serde_json::from_value(json!({
            "id": 42,
            "title": "X",
            "description": "desc",
            "status": "in-progress",
            "priority": "high",
            "dueDate": "2025-12-20"
        }))
        .unwrap();

        assert_eq!(task.id, 42);
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 12, 20));
    }

    #[test]
    fn test_decode_legacy_values() {
        let task: Task = serde_json::from_value(json!({
            "id": 1,
            "title": "Slutför DevOps-uppgift",
            "description": "",
            "status": "pågående",
            "priority": "hög",
            "dueDate": ""
        }))
        .unwrap();

        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_decode_null_and_missing_due_date() {
        let with_null: Task = serde_json::from_value(json!({
            "id": 2, "title": "a", "status": "done", "priority": "low", "dueDate": null
        }))
        .unwrap();
        let missing: Task = serde_json::from_value(json!({
            "id": 3, "title": "b", "status": "done", "priority": "low"
        }))
        .unwrap();

        assert_eq!(with_null.due_date, None);
        assert_eq!(missing.due_date, None);
        assert_eq!(missing.description, "");
    }

    #[test]
    fn test_decode_timestamp_due_date() {
        let task: Task = serde_json::from_value(json!({
            "id": 4, "title": "a", "status": "done", "priority": "low",
            "dueDate": "2025-01-31T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 1, 31));
    }

    #[test]
    fn test_decode_tolerates_nulls_and_unknown_values() {
        let task: Task = serde_json::from_value(json!({
            "id": 5,
            "title": "a",
            "description": null,
            "status": "blocked",
            "priority": null,
            "dueDate": null
        }))
        .unwrap();

        assert_eq!(task.description, "");
        assert_eq!(task.status, Status::Unknown);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(Status::Unknown.next(), Status::Pending);
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = TaskPayload {
            title: "Buy milk".to_string(),
            description: String::new(),
            status: Status::Pending,
            priority: Priority::Low,
            due_date: None,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "title": "Buy milk",
                "description": "",
                "status": "pending",
                "priority": "low",
                "dueDate": null
            })
        );
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("H".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medel".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Status::Done.next(), Status::Pending);
        assert_eq!(Status::Pending.previous(), Status::Done);
        assert_eq!(Priority::High.next(), Priority::Low);
    }
}
