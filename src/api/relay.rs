//! Third-party form collector used by the public registration and contact
//! forms.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::ACCEPT;
use serde::Serialize;

use crate::api::errors::{ApiError, ApiResult};
use crate::api::{FormRelay, REQUEST_TIMEOUT};
use crate::domain::contact::ContactMessage;
use crate::domain::registration::RegistrationPayload;

#[derive(Clone, Debug)]
pub struct RelayClient {
    http: reqwest::Client,
    registration_url: String,
    contact_url: String,
}

impl RelayClient {
    pub fn new(registration_url: &str, contact_url: &str) -> ApiResult<Self> {
        for url in [registration_url, contact_url] {
            Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))?;
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            registration_url: registration_url.to_string(),
            contact_url: contact_url.to_string(),
        })
    }

    async fn post<B: Serialize + Sync + ?Sized>(&self, url: &str, body: &B) -> ApiResult<()> {
        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                message: String::new(),
            })
        }
    }
}

#[async_trait]
impl FormRelay for RelayClient {
    async fn submit_registration(&self, payload: &RegistrationPayload) -> ApiResult<()> {
        self.post(&self.registration_url, payload).await
    }

    async fn submit_contact(&self, message: &ContactMessage) -> ApiResult<()> {
        self.post(&self.contact_url, message).await
    }
}
