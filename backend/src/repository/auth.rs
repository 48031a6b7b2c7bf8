use eyre::Result;
use sqlx::types::Uuid;
use sqlx::{PgPool, Row};

use crate::domain::auth::AuthUser;
use crate::domain::business::NewBusiness;
use types::error::Error;

#[cfg_attr(test, faux::create)]
pub struct AuthUserRepository {
    pool: PgPool,
}

#[cfg_attr(test, faux::methods)]
impl AuthUserRepository {
    pub fn new(pool: PgPool) -> Self {
        AuthUserRepository { pool }
    }

    /// Inserts the auth user and its business row in one transaction.
    pub async fn create_user_with_business(
        &self,
        email: String,
        hashed_password: String,
        business: NewBusiness,
    ) -> Result<AuthUser> {
        let mut tx = self.pool.begin().await?;
        let user: AuthUser = sqlx::query_as(
            r#"
            INSERT INTO auth_users (id, email, hashed_password)
            VALUES ($1, $2, $3) RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&mut *tx)
        .await
        .map_err(email_conflict)?;

        sqlx::query(
            r#"
            INSERT INTO businesses (id, user_id, business_name, industry, target_audience, brand_voice)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.id)
        .bind(business.business_name)
        .bind(business.industry)
        .bind(business.target_audience)
        .bind(business.brand_voice)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn get(&self, email: String) -> Result<Option<AuthUser>> {
        sqlx::query_as(
            r#"
            SELECT * FROM auth_users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    pub async fn exists(&self, email: String) -> Result<bool> {
        sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM auth_users
                WHERE email = $1
            )
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map(|row| row.get(0))
        .map_err(Into::into)
    }

    /// Replaces the session token and stamps the login time.
    pub async fn start_session(&self, user_id: Uuid, token: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE auth_users
            SET session_token = $1, last_login = now(), updated_at = now()
            WHERE id = $2
            "#,
        )
        .bind(token)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn end_session(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE auth_users
            SET session_token = NULL, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_by_session_token(&self, token: Uuid) -> Result<Option<AuthUser>> {
        sqlx::query_as(
            r#"
            SELECT * FROM auth_users
            WHERE session_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// two concurrent registrations can both pass the exists() check
fn email_conflict(e: sqlx::Error) -> eyre::Report {
    let is_unique_violation = e
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation());
    if is_unique_violation {
        Error::EmailAlreadyExists.into()
    } else {
        e.into()
    }
}
