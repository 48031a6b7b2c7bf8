use types::domain::RegisterRequest;

/// Business details captured at registration, stored beside the auth user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBusiness {
    pub business_name: String,
    pub industry: String,
    pub target_audience: String,
    pub brand_voice: String,
}

impl From<&RegisterRequest> for NewBusiness {
    fn from(request: &RegisterRequest) -> Self {
        Self {
            business_name: request.business_name.trim().to_string(),
            industry: request.industry.clone(),
            target_audience: request.target_audience.clone(),
            brand_voice: request.brand_voice.clone(),
        }
    }
}
