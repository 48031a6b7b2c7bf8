use thiserror::Error;

use types::domain::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

pub use reqwest::StatusCode;

/// A decoded answer together with the HTTP status it came with.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub body: T,
}

impl<T> Reply<T> {
    pub fn new(status: StatusCode, body: T) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// The exchange could not be completed: no answer, or an answer that is not JSON.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response body is not JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<Reply<LoginResponse>, TransportError>;

    async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<Reply<RegisterResponse>, TransportError>;
}
