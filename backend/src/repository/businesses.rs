use eyre::Result;
use sqlx::types::Uuid;
use sqlx::PgPool;

use types::domain::Profile;

#[cfg_attr(test, faux::create)]
pub struct BusinessRepository {
    pool: PgPool,
}

#[cfg_attr(test, faux::methods)]
impl BusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        sqlx::query_as(
            r#"
            SELECT a.email, b.business_name, b.industry, b.target_audience, b.brand_voice, a.last_login
            FROM auth_users a
            JOIN businesses b ON b.user_id = a.id
            WHERE a.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }
}
