//! Client for the organization's REST API and the traits services use to
//! reach it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode, Url, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::auth::{Credentials, LoginData, TokenPair};
use crate::api::errors::{ApiError, ApiResult};
use crate::domain::banner::{Banner, NewBanner};
use crate::domain::contact::{Contact, ContactMessage};
use crate::domain::document::{Document, DownloadCount, NewDocument};
use crate::domain::event::{Event, EventRegistration, NewEvent};
use crate::domain::member::{Member, NewMember, UploadedFile};
use crate::domain::project::{NewProject, Project};
use crate::domain::registration::RegistrationPayload;
use crate::domain::types::{BannerId, ContactId, DocumentId, EventId, MemberId, ProjectId};

pub mod auth;
pub mod banners;
pub mod contacts;
pub mod documents;
pub mod errors;
pub mod events;
pub mod members;
pub mod projects;
pub mod relay;

#[cfg(feature = "test-mocks")]
pub mod mock;

/// Every outbound call is abandoned after this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// File received from an admin upload, forwarded as multipart data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub(crate) fn into_part(self) -> ApiResult<multipart::Part> {
        let part = multipart::Part::bytes(self.bytes).file_name(self.file_name);
        match self.content_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| ApiError::Transport(format!("invalid content type {mime}: {e}"))),
            None => Ok(part),
        }
    }
}

/// Builds a multipart form from text fields and an optional file part.
pub(crate) fn multipart_form(
    fields: Vec<(&'static str, String)>,
    file_field: &'static str,
    file: Option<UploadFile>,
) -> ApiResult<multipart::Form> {
    let mut form = fields
        .into_iter()
        .fold(multipart::Form::new(), |form, (name, value)| {
            form.text(name, value)
        });
    if let Some(file) = file {
        form = form.part(file_field, file.into_part()?);
    }
    Ok(form)
}

/// Response bodies arrive either wrapped as `{data, message}` or bare.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    fn into_inner(self) -> T {
        match self {
            Payload::Wrapped { data, .. } => data,
            Payload::Bare(data) => data,
        }
    }
}

#[derive(serde::Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Decodes a response body accepting both the enveloped and the bare shape.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    let payload: Payload<T> = serde_json::from_slice(body)?;
    Ok(payload.into_inner())
}

/// Decodes a collection, treating a null or missing `data` as empty.
pub fn decode_list<T: DeserializeOwned>(body: &[u8]) -> ApiResult<Vec<T>> {
    Ok(decode::<Option<Vec<T>>>(body)?.unwrap_or_default())
}

fn error_for_status(status: StatusCode, body: &[u8]) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => {
            let body: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
            ApiError::Status {
                status: status.as_u16(),
                message: body.message.or(body.error).unwrap_or_default(),
            }
        }
    }
}

/// HTTP client bound to the configured API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.http.request(method, self.url(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> ApiResult<Vec<u8>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        if status.is_success() {
            Ok(body)
        } else {
            Err(error_for_status(status, &body))
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> ApiResult<T> {
        let body = self.execute(self.request(Method::GET, path, token)).await?;
        decode(&body)
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> ApiResult<Vec<T>> {
        let body = self.execute(self.request(Method::GET, path, token)).await?;
        decode_list(&body)
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        payload: &B,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path, token).json(payload);
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// Sends a JSON body and ignores whatever the API answers on success.
    pub(crate) async fn send_json_unit<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        payload: &B,
    ) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(method, path, token).json(payload);
        self.execute(request).await.map(|_| ())
    }

    pub(crate) async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        form: multipart::Form,
    ) -> ApiResult<Vec<u8>> {
        let request = self.request(method, path, token).multipart(form);
        self.execute(request).await
    }

    pub(crate) async fn send_empty(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> ApiResult<()> {
        self.execute(self.request(method, path, token))
            .await
            .map(|_| ())
    }
}

#[async_trait]
pub trait EventReader {
    async fn list_events(&self) -> ApiResult<Vec<Event>>;
    async fn get_event(&self, id: EventId) -> ApiResult<Event>;
}

#[async_trait]
pub trait EventWriter {
    async fn create_event(&self, token: &str, event: &NewEvent) -> ApiResult<()>;
    async fn update_event(&self, token: &str, id: EventId, event: &NewEvent) -> ApiResult<()>;
    async fn delete_event(&self, token: &str, id: EventId) -> ApiResult<()>;
    async fn upload_event_image(&self, token: &str, file: UploadFile) -> ApiResult<UploadedFile>;
    /// Public registration; the API accepts it without a token.
    async fn register_for_event(
        &self,
        id: EventId,
        registration: &EventRegistration,
    ) -> ApiResult<()>;
}

#[async_trait]
pub trait ProjectReader {
    async fn list_projects(&self) -> ApiResult<Vec<Project>>;
    async fn get_project(&self, id: ProjectId) -> ApiResult<Project>;
}

#[async_trait]
pub trait ProjectWriter {
    async fn create_project(&self, token: &str, project: &NewProject) -> ApiResult<()>;
    async fn update_project(
        &self,
        token: &str,
        id: ProjectId,
        project: &NewProject,
    ) -> ApiResult<()>;
    async fn delete_project(&self, token: &str, id: ProjectId) -> ApiResult<()>;
}

#[async_trait]
pub trait MemberReader {
    async fn list_members(&self) -> ApiResult<Vec<Member>>;
}

#[async_trait]
pub trait MemberWriter {
    async fn create_member(&self, token: &str, member: &NewMember) -> ApiResult<()>;
    async fn update_member(&self, token: &str, id: MemberId, member: &NewMember) -> ApiResult<()>;
    async fn delete_member(&self, token: &str, id: MemberId) -> ApiResult<()>;
    async fn pin_member(&self, token: &str, id: MemberId) -> ApiResult<()>;
    async fn unpin_member(&self, token: &str, id: MemberId) -> ApiResult<()>;
    async fn upload_avatar(&self, token: &str, file: UploadFile) -> ApiResult<UploadedFile>;
}

#[async_trait]
pub trait DocumentReader {
    async fn list_documents(&self) -> ApiResult<Vec<Document>>;
}

#[async_trait]
pub trait DocumentWriter {
    async fn create_document(
        &self,
        token: &str,
        document: &NewDocument,
        file: Option<UploadFile>,
    ) -> ApiResult<()>;
    async fn update_document(
        &self,
        token: &str,
        id: DocumentId,
        document: &NewDocument,
        file: Option<UploadFile>,
    ) -> ApiResult<()>;
    async fn delete_document(&self, token: &str, id: DocumentId) -> ApiResult<()>;
    /// Public download counter; the API accepts it without a token.
    async fn record_download(&self, id: DocumentId, count: DownloadCount) -> ApiResult<()>;
}

#[async_trait]
pub trait BannerReader {
    async fn list_banners(&self) -> ApiResult<Vec<Banner>>;
}

#[async_trait]
pub trait BannerWriter {
    async fn create_banner(
        &self,
        token: &str,
        banner: &NewBanner,
        image: Option<UploadFile>,
    ) -> ApiResult<()>;
    async fn update_banner(
        &self,
        token: &str,
        id: BannerId,
        banner: &NewBanner,
        image: Option<UploadFile>,
    ) -> ApiResult<()>;
    async fn delete_banner(&self, token: &str, id: BannerId) -> ApiResult<()>;
}

#[async_trait]
pub trait ContactReader {
    async fn list_contacts(&self, token: &str) -> ApiResult<Vec<Contact>>;
}

#[async_trait]
pub trait ContactWriter {
    async fn delete_contact(&self, token: &str, id: ContactId) -> ApiResult<()>;
}

#[async_trait]
pub trait AuthApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginData>;
    async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenPair>;
    async fn logout(&self, access_token: &str) -> ApiResult<()>;
}

/// Third-party endpoint collecting public form submissions.
#[async_trait]
pub trait FormRelay {
    async fn submit_registration(&self, payload: &RegistrationPayload) -> ApiResult<()>;
    async fn submit_contact(&self, message: &ContactMessage) -> ApiResult<()>;
}
