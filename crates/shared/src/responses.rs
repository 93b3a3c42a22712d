//! Outbound response bodies.
//!
//! Field names follow the public JSON contract (camelCase).

use chrono::{DateTime, Utc};
use rpssl_domain::{Choice, Outcome, PlayRecord};
use serde::{Deserialize, Serialize};

/// A single choice as listed by `GET /choices` and `GET /random`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceResponse {
    pub id: i32,
    pub name: String,
}

impl From<Choice> for ChoiceResponse {
    fn from(choice: Choice) -> Self {
        Self {
            id: choice.id(),
            name: choice.name().to_string(),
        }
    }
}

/// Result of `POST /play`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResponse {
    pub results: Outcome,
    pub player: i32,
    pub computer: i32,
}

/// One entry of `GET /results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponse {
    pub play_time: DateTime<Utc>,
    pub username: String,
    pub result: Outcome,
}

impl From<PlayRecord> for ResultResponse {
    fn from(record: PlayRecord) -> Self {
        Self {
            play_time: record.played_at,
            username: record.username,
            result: record.outcome,
        }
    }
}

/// Body returned for unhandled failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: String,
}

impl ErrorResponse {
    pub fn new(errors: impl Into<String>) -> Self {
        Self {
            errors: errors.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn choice_response_uses_id_and_name() {
        let response = ChoiceResponse::from(Choice::Lizard);
        assert_eq!(response.id, 4);
        assert_eq!(response.name, "Lizard");
    }

    #[test]
    fn play_response_json_shape() {
        let response = PlayResponse {
            results: Outcome::Win,
            player: 1,
            computer: 3,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"results": "Win", "player": 1, "computer": 3})
        );
    }

    #[test]
    fn result_response_maps_record_fields() {
        let played_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = PlayRecord::new("carol", played_at, Outcome::Tie).unwrap();

        let json = serde_json::to_value(ResultResponse::from(record)).unwrap();
        assert_eq!(json["username"], "carol");
        assert_eq!(json["result"], "Tie");
        assert!(json["playTime"].as_str().unwrap().starts_with("2024-05-01T12:00:00"));
    }
}
