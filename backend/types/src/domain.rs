use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

pub const INDUSTRIES: [&str; 8] = [
    "restaurant",
    "fashion",
    "beauty",
    "fitness",
    "retail",
    "software",
    "consulting",
    "other",
];

#[derive(Debug, Clone, Validate, Deserialize, Serialize)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LoginResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Validate, Deserialize, Serialize)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_business_name"))]
    pub business_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(custom(function = "validate_industry"))]
    pub industry: String,
    pub target_audience: String,
    pub brand_voice: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RegisterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

/// Body of every non-2xx answer from the backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Deserialize, Serialize)]
pub struct Profile {
    pub email: String,
    pub business_name: String,
    pub industry: String,
    pub target_audience: String,
    pub brand_voice: String,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub database: String,
}

/// Failure text carried by an answer, `detail` first, then `message`.
/// Empty strings count as absent.
pub trait FailureText {
    fn detail(&self) -> Option<&str>;
    fn message(&self) -> Option<&str>;

    fn failure_text(&self) -> Option<&str> {
        self.detail()
            .filter(|text| !text.is_empty())
            .or_else(|| self.message().filter(|text| !text.is_empty()))
    }
}

impl FailureText for LoginResponse {
    fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl FailureText for RegisterResponse {
    fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

fn validate_business_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(ValidationError::new("business_name_too_short"));
    }
    Ok(())
}

fn validate_industry(industry: &str) -> Result<(), ValidationError> {
    if !INDUSTRIES.contains(&industry) {
        return Err(ValidationError::new("unknown_industry"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            business_name: "Cafe Mori".to_string(),
            email: "owner@mori.cafe".to_string(),
            password: "password123".to_string(),
            industry: "restaurant".to_string(),
            target_audience: "locals".to_string(),
            brand_voice: "warm".to_string(),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register_request().validate().is_ok());

        let mut request = register_request();
        request.business_name = "  M ".to_string();
        assert!(request.validate().is_err());

        let mut request = register_request();
        request.industry = "mining".to_string();
        assert!(request.validate().is_err());

        let mut request = register_request();
        request.password = "short".to_string();
        assert!(request.validate().is_err());

        let mut request = register_request();
        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_failure_text_precedence() {
        let response = LoginResponse {
            detail: Some("bad credentials".to_string()),
            message: Some("ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(response.failure_text(), Some("bad credentials"));

        let response = RegisterResponse {
            success: Some(false),
            detail: Some(String::new()),
            message: Some("email exists".to_string()),
        };
        assert_eq!(response.failure_text(), Some("email exists"));

        assert_eq!(RegisterResponse::default().failure_text(), None);
    }

    #[test]
    fn test_login_response_accepts_partial_bodies() -> Result<(), serde_json::Error> {
        let response: LoginResponse = serde_json::from_str(r#"{"access_token":"T"}"#)?;
        assert_eq!(response.access_token.as_deref(), Some("T"));
        assert_eq!(response.detail, None);

        let response: LoginResponse = serde_json::from_str(r#"{"detail":"bad credentials"}"#)?;
        assert_eq!(response.access_token, None);
        Ok(())
    }
}
