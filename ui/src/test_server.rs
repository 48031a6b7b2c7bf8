//! A throwaway backend on a loopback port, answering the calls the screens make.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use client::client::Client;
use tokio::net::TcpListener;
use types::domain::{ErrorBody, LoginResponse, Profile, RegisterResponse};

pub const TOKEN: &str = "session-token";

pub fn profile() -> Profile {
    Profile {
        email: "owner@mori.cafe".to_string(),
        business_name: "Cafe Mori".to_string(),
        industry: "restaurant".to_string(),
        target_audience: "general customers".to_string(),
        brand_voice: "friendly and professional".to_string(),
        last_login: None,
    }
}

async fn login() -> Json<LoginResponse> {
    Json(LoginResponse {
        success: Some(true),
        access_token: Some(TOKEN.to_string()),
        token_type: Some("bearer".to_string()),
        ..Default::default()
    })
}

async fn register() -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: Some(true),
            message: Some("Registration complete".to_string()),
            detail: None,
        }),
    )
}

async fn rejected() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody {
            detail: "Authentication required".to_string(),
        }),
    )
}

/// Every call succeeds.
pub fn accepting() -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/me", get(|| async { Json(profile()) }))
}

/// Logins succeed, but no session is ever accepted.
pub fn rejecting() -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/me", get(rejected))
}

pub async fn serve(router: Router) -> Client {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    Client::with_base_url(format!("http://{}", address))
}
