use eyre::Result;
use sqlx::types::Uuid;
use std::sync::Arc;

use crate::repository::businesses::BusinessRepository;
use types::domain::Profile;

#[derive(Clone)]
pub struct BusinessService {
    pub business_repository: Arc<BusinessRepository>,
}

impl BusinessService {
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        self.business_repository.get_profile(user_id).await
    }
}
