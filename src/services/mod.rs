//! Page logic between the routes and the REST API.
//!
//! Services are generic over the API traits so they can run against mocks.

use std::future::Future;

use thiserror::Error;

use crate::api::AuthApi;
use crate::api::errors::{ApiError, ApiResult};
use crate::auth::context::AuthContext;
use crate::auth::storage::SessionStorage;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;

pub mod auth;
pub mod banners;
pub mod contact;
pub mod contacts;
pub mod documents;
pub mod events;
pub mod home;
pub mod members;
pub mod projects;
pub mod registration;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No usable session; the caller must log in again.
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Invalid user input, carrying the message to show.
    #[error("{0}")]
    Form(String),

    #[error("api error: {0}")]
    Api(ApiError),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ServiceError::Unauthorized,
            ApiError::NotFound => ServiceError::NotFound,
            other => ServiceError::Api(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.user_message())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl ServiceError {
    /// Notice shown to the user for a failed action described by `fallback`.
    ///
    /// Form errors carry their own text; API errors append the API's message
    /// when it sent one.
    pub fn notice(&self, fallback: &str) -> String {
        match self {
            ServiceError::Form(message) => message.clone(),
            ServiceError::Api(err) => match err.api_message() {
                Some(message) => format!("{fallback}: {message}"),
                None => fallback.to_string(),
            },
            _ => fallback.to_string(),
        }
    }
}

/// Runs an authenticated API call with the session's access token.
///
/// A 401 triggers one token refresh and a single retry. When no token is
/// available or the refresh fails the session is over and
/// [`ServiceError::Unauthorized`] is returned.
pub async fn with_token<S, A, T, F, Fut>(auth: &AuthContext<S, A>, call: F) -> ServiceResult<T>
where
    S: SessionStorage,
    A: AuthApi,
    F: Fn(String) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let token = auth
        .access_token()
        .await
        .ok_or(ServiceError::Unauthorized)?;
    match call(token).await {
        Err(ApiError::Unauthorized) => {
            log::warn!("Access token rejected, refreshing");
            let token = auth
                .refresh_access_token()
                .await
                .ok_or(ServiceError::Unauthorized)?;
            call(token).await.map_err(ServiceError::from)
        }
        result => result.map_err(ServiceError::from),
    }
}
