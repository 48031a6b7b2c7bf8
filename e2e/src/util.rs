use rand::distr::Alphanumeric;
use rand::{rng, Rng};
use tap::TapFallible;

use client::api::AuthApi;
use client::client::Client;
use types::domain::{LoginRequest, RegisterRequest};

pub const PASSWORD: &str = "password123";

pub fn random_email() -> String {
    // generate a random email
    let random_string: String = rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();

    format!("{}@instamark.test", random_string.to_lowercase())
}

pub fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        business_name: "Cafe Mori".to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        industry: "restaurant".to_string(),
        target_audience: "general customers".to_string(),
        brand_voice: "friendly and professional".to_string(),
    }
}

/// Registers a fresh account and logs in, returning the client, the email and the token.
pub async fn registered_session() -> eyre::Result<(Client, String, String)> {
    let client = Client::new();
    let email = random_email();
    client.register(register_request(&email)).await?;

    let reply = client
        .login(LoginRequest {
            email: email.clone(),
            password: PASSWORD.to_string(),
        })
        .await
        .tap_err(|e| println!("Error: {:?}", e))?;
    let token = reply
        .body
        .access_token
        .ok_or_else(|| eyre::eyre!("login answered {} without a token", reply.status))?;
    Ok((client, email, token))
}
