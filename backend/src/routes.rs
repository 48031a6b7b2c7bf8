use eyre::{ContextCompat, Result};
use sqlx::types::Uuid;
use validator::{Validate, ValidationErrors};

use types::domain::{HealthReport, LoginRequest, Profile, RegisterRequest, INDUSTRIES};
use types::error::Error;

use crate::domain::auth::AuthUser;
use crate::service::auth::AuthService;
use crate::service::businesses::BusinessService;

#[derive(Clone)]
pub struct Api {
    pub auth_service: AuthService,
    pub business_service: BusinessService,
}

impl Api {
    pub async fn register(&self, request: RegisterRequest) -> Result<()> {
        request.validate().map_err(rejected_registration)?;
        self.auth_service.register(request).await?;
        Ok(())
    }

    pub async fn login(&self, request: LoginRequest) -> Result<Uuid> {
        // password length is a registration rule only
        request.validate().map_err(|_| Error::InvalidEmail)?;
        self.auth_service
            .login(request.email, request.password)
            .await
    }

    pub async fn logout(&self, user_id: Uuid) -> Result<()> {
        self.auth_service.logout(user_id).await
    }

    pub async fn get_user_by_session_token(&self, token: Uuid) -> Result<Option<AuthUser>> {
        self.auth_service.get_user_by_session_token(token).await
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile> {
        self.business_service
            .get_profile(user_id)
            .await?
            .wrap_err(Error::UserNotFound)
    }

    pub async fn health(&self) -> HealthReport {
        let database = if self.auth_service.database_is_up().await {
            "healthy"
        } else {
            "error"
        };
        HealthReport {
            status: "healthy".to_string(),
            database: database.to_string(),
        }
    }
}

fn rejected_registration(errors: ValidationErrors) -> Error {
    let fields = errors.field_errors();
    if fields.contains_key("email") || fields.contains_key("password") {
        Error::InvalidEmailOrPassword
    } else {
        Error::InvalidBusiness(INDUSTRIES.join(", "))
    }
}
