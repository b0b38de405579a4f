use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiResult;
use crate::api::{ApiClient, AuthApi, decode};
use crate::domain::auth::User;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Tokens and profile issued on a successful login.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LoginData {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
    /// Greeting sent alongside the tokens.
    #[serde(skip)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct LoginEnvelope {
    data: LoginData,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginData> {
        let envelope: LoginEnvelope = self
            .send_json(Method::POST, "/auth/login", None, credentials)
            .await?;
        Ok(LoginData {
            message: envelope.message,
            ..envelope.data
        })
    }

    /// The refresh token travels as the bearer credential.
    async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenPair> {
        let body = self
            .execute(self.request(Method::POST, "/auth/refresh", Some(refresh_token)))
            .await?;
        decode(&body)
    }

    async fn logout(&self, access_token: &str) -> ApiResult<()> {
        self.send_empty(Method::POST, "/auth/logout", Some(access_token))
            .await
    }
}
