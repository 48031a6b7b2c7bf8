use eyre::{bail, Result};
use log::debug;
use reqwest::Client as ReqwestClient;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{AuthApi, Reply, TransportError};
use types::domain::{
    AckResponse, ErrorBody, HealthReport, LoginRequest, LoginResponse, Profile, RegisterRequest,
    RegisterResponse,
};
use types::error::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const BASE_URL_VAR: &str = "INSTAMARK_API_URL";

pub struct Client {
    pub client: ReqwestClient,
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Uses `INSTAMARK_API_URL` when set.
    pub fn new() -> Self {
        let base_url =
            std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: ReqwestClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<Req, Res>(&self, path: &str, request: &Req) -> Result<Reply<Res>, TransportError>
    where
        Req: Serialize + Sync,
        Res: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(request).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("POST {} answered {}", path, status);
        let body = serde_json::from_slice(&bytes)?;
        Ok(Reply::new(status, body))
    }

    /// A 401 comes back as [`Error::Unauthorized`].
    pub async fn get_profile(&self, token: &str) -> Result<Profile> {
        let response = self
            .client
            .get(self.url("/api/me"))
            .bearer_auth(token)
            .send()
            .await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized.into()),
            _ => bail!(failure_detail(response).await?),
        }
    }

    pub async fn logout(&self, token: &str) -> Result<AckResponse> {
        let response = self
            .client
            .post(self.url("/api/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized.into()),
            _ => bail!(failure_detail(response).await?),
        }
    }

    pub async fn health(&self) -> Result<HealthReport> {
        let response = self.client.get(self.url("/health")).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            _ => bail!(failure_detail(response).await?),
        }
    }
}

#[async_trait::async_trait]
impl AuthApi for Client {
    async fn login(&self, request: LoginRequest) -> Result<Reply<LoginResponse>, TransportError> {
        self.post_json("/api/login", &request).await
    }

    async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<Reply<RegisterResponse>, TransportError> {
        self.post_json("/api/register", &request).await
    }
}

async fn failure_detail(response: Response) -> Result<String> {
    let status = response.status();
    let text = response.text().await?;
    Ok(detail_or_text(status, &text))
}

fn detail_or_text(status: StatusCode, text: &str) -> String {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => body.detail,
        Err(_) if text.is_empty() => status.to_string(),
        Err(_) => text.to_string(),
    }
}
