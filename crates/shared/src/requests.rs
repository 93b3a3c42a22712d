//! Inbound request bodies.

use rpssl_domain::{Choice, DomainError};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Body of `POST /play`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    /// Identifier of the choice the player selected. Missing reads as 0.
    #[serde(default)]
    #[validate(range(
        min = 1,
        max = 5,
        message = "Move not valid. It has to be one of the possible choices."
    ))]
    pub player_choice: i32,

    /// Name of the user playing the game. Missing or null reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    pub username: String,
}

impl PlayRequest {
    pub fn new(player_choice: i32, username: impl Into<String>) -> Self {
        Self {
            player_choice,
            username: username.into(),
        }
    }

    /// The requested move as a domain choice.
    pub fn choice(&self) -> Result<Choice, DomainError> {
        Choice::try_from(self.player_choice)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("Username must not be empty.".into());
        return Err(error);
    }
    Ok(())
}

/// Query string of `DELETE /play`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetQuery {
    #[serde(default)]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_known_choice() {
        for choice in Choice::ALL {
            let request = PlayRequest::new(choice.id(), "alice");
            assert!(request.validate().is_ok());
            assert_eq!(request.choice().unwrap(), choice);
        }
    }

    #[test]
    fn rejects_choice_outside_the_set() {
        let errors = PlayRequest::new(6, "alice").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("player_choice"));

        let errors = PlayRequest::new(0, "alice").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("player_choice"));
    }

    #[test]
    fn rejects_blank_username() {
        let errors = PlayRequest::new(1, "   ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn deserializes_camel_case_body() {
        let request: PlayRequest =
            serde_json::from_str(r#"{"playerChoice": 4, "username": "bob"}"#).unwrap();
        assert_eq!(request.player_choice, 4);
        assert_eq!(request.username, "bob");
    }

    #[test]
    fn missing_choice_and_null_username_fail_validation() {
        let request: PlayRequest = serde_json::from_str(r#"{"username": null}"#).unwrap();
        assert_eq!(request.player_choice, 0);
        assert_eq!(request.username, "");

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("player_choice"));
        assert!(errors.field_errors().contains_key("username"));
    }
}
