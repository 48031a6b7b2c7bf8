use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use eyre::{ensure, ContextCompat, Result};
use log::debug;
use sqlx::types::Uuid;

use crate::domain::auth::AuthUser;
use crate::domain::business::NewBusiness;
use crate::repository::auth::AuthUserRepository;
use types::domain::RegisterRequest;
use types::error::Error;

#[derive(Clone)]
pub struct AuthService {
    pub auth_repository: Arc<AuthUserRepository>,
}

impl AuthService {
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthUser> {
        ensure!(
            !self.auth_repository.exists(request.email.clone()).await?,
            Error::EmailAlreadyExists
        );
        let business = NewBusiness::from(&request);
        let hashed_password = hash(request.password, DEFAULT_COST)?;
        self.auth_repository
            .create_user_with_business(request.email, hashed_password, business)
            .await
    }

    /// Unknown email and wrong password answer the same way.
    pub async fn login(&self, email: String, password: String) -> Result<Uuid> {
        let user = self
            .auth_repository
            .get(email)
            .await?
            .wrap_err(Error::InvalidCredentials)?;
        ensure!(
            verify(password, &user.hashed_password)?,
            Error::InvalidCredentials
        );
        let token = Uuid::new_v4();
        self.auth_repository.start_session(user.id, token).await?;
        debug!("User {} started a session", user.id);

        Ok(token)
    }

    pub async fn logout(&self, user_id: Uuid) -> Result<()> {
        self.auth_repository.end_session(user_id).await?;
        debug!("User {} ended the session", user_id);
        Ok(())
    }

    pub async fn get_user_by_session_token(&self, token: Uuid) -> Result<Option<AuthUser>> {
        self.auth_repository.get_by_session_token(token).await
    }

    pub async fn database_is_up(&self) -> bool {
        self.auth_repository.ping().await.is_ok()
    }
}
