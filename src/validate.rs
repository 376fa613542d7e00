//! Shape validation of the raw review API response.
//!
//! The client hands over an untyped JSON document; this module checks it has
//! the expected structure and extracts the homework records plus the
//! server-supplied `current_date` stamp the cursor advances to.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// One homework as reported by the review API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: String,
}

/// A validated response: records in the order the API returned them, plus
/// the server's "as of" timestamp when it was present.
#[derive(Debug)]
pub struct ReviewBatch {
    pub homeworks: Vec<HomeworkRecord>,
    pub as_of: Option<i64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidateError {
    #[error("review API response is not a JSON object")]
    Shape,
    #[error("review API response has no \"homeworks\" list")]
    MissingField,
}

/// Validate a raw API response.
///
/// A malformed entry inside an otherwise valid `homeworks` list is skipped
/// with a warning rather than failing the whole batch, so one bad record
/// never blocks updates for the others.
pub fn validate(raw: &Value) -> Result<ReviewBatch, ValidateError> {
    let top = raw.as_object().ok_or(ValidateError::Shape)?;

    let homeworks = top
        .get("homeworks")
        .and_then(Value::as_array)
        .ok_or(ValidateError::MissingField)?;

    let mut records = Vec::with_capacity(homeworks.len());
    for (index, entry) in homeworks.iter().enumerate() {
        match parse_record(entry) {
            Some(record) => records.push(record),
            None => warn!("Skipping malformed homework entry at index {}", index),
        }
    }

    let as_of = top.get("current_date").and_then(Value::as_i64);

    Ok(ReviewBatch {
        homeworks: records,
        as_of,
    })
}

fn parse_record(entry: &Value) -> Option<HomeworkRecord> {
    let entry = entry.as_object()?;
    let name = entry.get("homework_name")?.as_str()?;
    let status = entry.get("status")?.as_str()?;
    if name.is_empty() || status.is_empty() {
        return None;
    }
    Some(HomeworkRecord {
        name: name.to_string(),
        status: status.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_homeworks_list_is_valid() {
        let raw = json!({ "homeworks": [], "current_date": 1_700_000_000 });

        let batch = validate(&raw).unwrap();

        assert!(batch.homeworks.is_empty());
        assert_eq!(batch.as_of, Some(1_700_000_000));
    }

    #[test]
    fn test_top_level_list_is_shape_error() {
        let raw = json!([{ "homework_name": "hw1", "status": "approved" }]);

        assert_eq!(validate(&raw).unwrap_err(), ValidateError::Shape);
    }

    #[test]
    fn test_top_level_string_is_shape_error() {
        let raw = json!("homeworks");

        assert_eq!(validate(&raw).unwrap_err(), ValidateError::Shape);
    }

    #[test]
    fn test_missing_homeworks_key() {
        let raw = json!({ "current_date": 1_700_000_000 });

        assert_eq!(validate(&raw).unwrap_err(), ValidateError::MissingField);
    }

    #[test]
    fn test_homeworks_not_a_list() {
        let raw = json!({ "homeworks": { "homework_name": "hw1" } });

        assert_eq!(validate(&raw).unwrap_err(), ValidateError::MissingField);
    }

    #[test]
    fn test_preserves_api_order() {
        let raw = json!({
            "homeworks": [
                { "homework_name": "hw2", "status": "reviewing" },
                { "homework_name": "hw1", "status": "approved" },
            ],
            "current_date": 1_700_000_000,
        });

        let batch = validate(&raw).unwrap();

        let names: Vec<&str> = batch.homeworks.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["hw2", "hw1"]);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let raw = json!({
            "homeworks": [
                { "homework_name": "hw1", "status": "approved" },
                { "homework_name": "hw2" },
                { "homework_name": "", "status": "reviewing" },
                "not an object",
                { "homework_name": "hw3", "status": "rejected" },
            ],
        });

        let batch = validate(&raw).unwrap();

        let names: Vec<&str> = batch.homeworks.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["hw1", "hw3"]);
    }

    #[test]
    fn test_missing_current_date() {
        let raw = json!({ "homeworks": [] });

        let batch = validate(&raw).unwrap();

        assert_eq!(batch.as_of, None);
    }
}
