use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::ErrorBody;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Either email format is invalid or password length is less than 8")]
    InvalidEmailOrPassword,
    #[error("Email format is invalid")]
    InvalidEmail,
    #[error("Business name must be at least 2 characters and industry one of: {0}")]
    InvalidBusiness(String),
    #[error("Authentication required")]
    Unauthorized,
    #[error("User not found")]
    UserNotFound,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::EmailAlreadyExists => StatusCode::CONFLICT,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::InvalidEmailOrPassword => StatusCode::BAD_REQUEST,
            Error::InvalidEmail => StatusCode::BAD_REQUEST,
            Error::InvalidBusiness(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::UserNotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn into_response_tuple(self) -> (StatusCode, ErrorBody) {
        (
            self.status_code(),
            ErrorBody {
                detail: self.to_string(),
            },
        )
    }
}
