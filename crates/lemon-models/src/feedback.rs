use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A feedback entry submitted by a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: i64,
    pub rating: i64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub submitted: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFeedbackDto {
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    #[validate(length(max = 4000))]
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64))]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackCreated {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_type_field_name() {
        let dto: CreateFeedbackDto =
            serde_json::from_str(r#"{"rating":4,"description":"fun","type":"bug"}"#).unwrap();
        assert_eq!(dto.kind, "bug");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_rating_out_of_range_fails_validation() {
        let dto: CreateFeedbackDto =
            serde_json::from_str(r#"{"rating":9,"type":"bug"}"#).unwrap();
        assert!(dto.validate().is_err());
    }
}
