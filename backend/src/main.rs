use std::str::FromStr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use eyre::Result;
use log::info;
use refinery::config::Config as MigrationConfig;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::error::{rejection_into_response, report_into_response};
use crate::extensions::ExtractUserFromToken;
use crate::repository::auth::AuthUserRepository;
use crate::repository::businesses::BusinessRepository;
use crate::routes::Api;
use crate::service::auth::AuthService;
use crate::service::businesses::BusinessService;
use types::domain::{AckResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

mod config;
mod domain;
mod error;
mod extensions;
mod repository;
mod routes;
mod service;

refinery::embed_migrations!("migrations");

#[tokio::main]
async fn main() -> Result<()> {
    // setup env and log
    dotenvy::dotenv().ok();
    env_logger::init();
    info!("server starts with logging");
    let config = Config::from_env()?;

    // run migrations
    let mut migration_config = MigrationConfig::from_str(&config.database_url)?;
    migrations::runner().run_async(&mut migration_config).await?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // repositories
    let auth_repository = Arc::new(AuthUserRepository::new(pool.clone()));
    let business_repository = Arc::new(BusinessRepository::new(pool));

    // API
    let api = Api {
        auth_service: AuthService { auth_repository },
        business_service: BusinessService {
            business_repository,
        },
    };

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("listening on {}", config.bind_address());
    axum::serve(listener, router(api)).await?;
    Ok(())
}

fn router(api: Api) -> Router {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/me", get(get_me))
        .route("/health", get(health))
        .layer(Extension(api))
}

async fn register(
    Extension(api): Extension<Api>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_into_response(rejection).into_response(),
    };
    match api.register(payload).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                success: Some(true),
                message: Some("Registration complete".to_string()),
                detail: None,
            }),
        )
            .into_response(),
        Err(e) => report_into_response(e).into_response(),
    }
}

async fn login(
    Extension(api): Extension<Api>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_into_response(rejection).into_response(),
    };
    match api.login(payload).await {
        Ok(token) => (
            StatusCode::OK,
            Json(LoginResponse {
                success: Some(true),
                access_token: Some(token.to_string()),
                token_type: Some("bearer".to_string()),
                message: Some("Login successful".to_string()),
                detail: None,
            }),
        )
            .into_response(),
        Err(e) => report_into_response(e).into_response(),
    }
}

async fn logout(
    ExtractUserFromToken(user_id): ExtractUserFromToken,
    Extension(api): Extension<Api>,
) -> Response {
    match api.logout(user_id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(AckResponse {
                success: true,
                message: "Logged out".to_string(),
            }),
        )
            .into_response(),
        Err(e) => report_into_response(e).into_response(),
    }
}

async fn get_me(
    ExtractUserFromToken(user_id): ExtractUserFromToken,
    Extension(api): Extension<Api>,
) -> Response {
    match api.get_profile(user_id).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => report_into_response(e).into_response(),
    }
}

async fn health(Extension(api): Extension<Api>) -> impl IntoResponse {
    (StatusCode::OK, Json(api.health().await))
}
