//! The auth context owns the login session for the duration of a request.
//!
//! All mutation goes through one `tokio::sync::Mutex`, which is held across
//! the refresh call so concurrent refreshes cannot interleave.

use std::future::{Ready, ready};

use actix_session::SessionExt;
use actix_web::dev::Payload;
use actix_web::error::ErrorInternalServerError;
use actix_web::{FromRequest, HttpRequest, web};
use tokio::sync::Mutex;

use crate::api::auth::TokenPair;
use crate::api::{ApiClient, AuthApi};
use crate::auth::storage::{
    CookieSessionStorage, REFRESH_TOKEN_KEY, SessionStorage, StorageError, TOKEN_KEY,
    clear_session, load_session, store_session,
};
use crate::domain::auth::{Session, User};

struct AuthState<S> {
    session: Session,
    storage: S,
}

pub struct AuthContext<S, A> {
    api: A,
    state: Mutex<AuthState<S>>,
}

/// Auth context backed by the cookie session and the live API.
pub type RequestAuth = AuthContext<CookieSessionStorage, ApiClient>;

impl<S, A> AuthContext<S, A>
where
    S: SessionStorage,
    A: AuthApi,
{
    /// Restores the session persisted in `storage`.
    pub fn hydrate(mut storage: S, api: A) -> Self {
        let session = load_session(&mut storage);
        Self {
            api,
            state: Mutex::new(AuthState { session, storage }),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn session(&self) -> Session {
        self.state.lock().await.session.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.lock().await.session.user.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.state.lock().await.session.access_token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.session.is_authenticated()
    }

    pub async fn is_admin(&self) -> bool {
        self.state.lock().await.session.is_admin()
    }

    /// Replaces the session in memory and in storage.
    pub async fn login(
        &self,
        access_token: String,
        refresh_token: String,
        user: User,
    ) -> Result<(), StorageError> {
        let mut state = self.state.lock().await;
        store_session(&mut state.storage, &access_token, &refresh_token, &user)?;
        state.session = Session::new(access_token, refresh_token, user);
        Ok(())
    }

    /// Tells the API the session is over, then forgets it locally whatever
    /// the API answered.
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        self.logout_locked(&mut state).await;
    }

    async fn logout_locked(&self, state: &mut AuthState<S>) {
        if let Some(token) = state.session.access_token.clone() {
            if let Err(err) = self.api.logout(&token).await {
                log::warn!("Logout request failed: {err}");
            }
        }
        state.session = Session::default();
        clear_session(&mut state.storage);
    }

    /// Exchanges the refresh token for a new pair.
    ///
    /// Returns the new access token. Any failure ends the session.
    pub async fn refresh_access_token(&self) -> Option<String> {
        let mut state = self.state.lock().await;
        let refresh_token = state.session.refresh_token.clone()?;

        match self.api.refresh(&refresh_token).await {
            Ok(tokens) => {
                if let Err(err) = store_tokens(&mut state.storage, &tokens) {
                    log::error!("Failed to persist refreshed tokens: {err}");
                }
                state.session.access_token = Some(tokens.access_token.clone());
                state.session.refresh_token = Some(tokens.refresh_token);
                Some(tokens.access_token)
            }
            Err(err) => {
                log::warn!("Token refresh failed: {err}");
                self.logout_locked(&mut state).await;
                None
            }
        }
    }
}

fn store_tokens<S: SessionStorage>(storage: &mut S, tokens: &TokenPair) -> Result<(), StorageError> {
    storage.set_item(TOKEN_KEY, &tokens.access_token)?;
    storage.set_item(REFRESH_TOKEN_KEY, &tokens.refresh_token)
}

impl FromRequest for RequestAuth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(api) = req.app_data::<web::Data<ApiClient>>() else {
            log::error!("API client is not registered as app data");
            return ready(Err(ErrorInternalServerError("API client unavailable")));
        };
        let storage = CookieSessionStorage::new(req.get_session());
        ready(Ok(AuthContext::hydrate(storage, api.get_ref().clone())))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::api::auth::{Credentials, LoginData};
    use crate::api::errors::{ApiError, ApiResult};
    use crate::auth::storage::{MemorySessionStorage, USER_KEY};
    use crate::domain::types::UserId;

    #[derive(Default)]
    struct FakeAuthApi {
        refresh_result: Option<TokenPair>,
        logout_fails: bool,
        refresh_calls: AtomicUsize,
        logout_calls: AtomicUsize,
    }

    #[async_trait]
    impl AuthApi for FakeAuthApi {
        async fn login(&self, _credentials: &Credentials) -> ApiResult<LoginData> {
            Err(ApiError::Unauthorized)
        }

        async fn refresh(&self, _refresh_token: &str) -> ApiResult<TokenPair> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            self.refresh_result.clone().ok_or(ApiError::Status {
                status: 403,
                message: "expired".into(),
            })
        }

        async fn logout(&self, _access_token: &str) -> ApiResult<()> {
            self.logout_calls.fetch_add(1, Ordering::SeqCst);
            if self.logout_fails {
                Err(ApiError::Transport("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    fn admin() -> User {
        User {
            id: UserId::new(1).unwrap(),
            username: "admin".into(),
            role: "admin".into(),
        }
    }

    async fn logged_in(api: FakeAuthApi) -> AuthContext<MemorySessionStorage, FakeAuthApi> {
        let auth = AuthContext::hydrate(MemorySessionStorage::new(), api);
        auth.login("access".into(), "refresh".into(), admin())
            .await
            .unwrap();
        auth
    }

    async fn stored(auth: &AuthContext<MemorySessionStorage, FakeAuthApi>, key: &str) -> Option<String> {
        auth.state.lock().await.storage.get_item(key)
    }

    #[actix_web::test]
    async fn login_overwrites_session_and_storage() {
        let auth = logged_in(FakeAuthApi::default()).await;
        auth.login("second".into(), "refresh2".into(), admin())
            .await
            .unwrap();

        assert!(auth.is_authenticated().await);
        assert!(auth.is_admin().await);
        assert_eq!(auth.access_token().await.as_deref(), Some("second"));
        assert_eq!(stored(&auth, TOKEN_KEY).await.as_deref(), Some("second"));
        assert_eq!(stored(&auth, REFRESH_TOKEN_KEY).await.as_deref(), Some("refresh2"));
    }

    #[actix_web::test]
    async fn refresh_without_token_returns_none_untouched() {
        let mut storage = MemorySessionStorage::new();
        storage.set_item(USER_KEY, "kept").unwrap();
        let auth = AuthContext::hydrate(storage, FakeAuthApi::default());

        assert_eq!(auth.refresh_access_token().await, None);
        assert_eq!(auth.api().refresh_calls.load(Ordering::SeqCst), 0);
        assert_eq!(auth.api().logout_calls.load(Ordering::SeqCst), 0);
        assert_eq!(stored(&auth, USER_KEY).await.as_deref(), Some("kept"));
    }

    #[actix_web::test]
    async fn refresh_success_replaces_both_tokens() {
        let auth = logged_in(FakeAuthApi {
            refresh_result: Some(TokenPair {
                access_token: "new-access".into(),
                refresh_token: "new-refresh".into(),
            }),
            ..FakeAuthApi::default()
        })
        .await;

        assert_eq!(
            auth.refresh_access_token().await.as_deref(),
            Some("new-access")
        );
        let session = auth.session().await;
        assert_eq!(session.refresh_token.as_deref(), Some("new-refresh"));
        assert_eq!(session.user, Some(admin()));
        assert_eq!(stored(&auth, TOKEN_KEY).await.as_deref(), Some("new-access"));
    }

    #[actix_web::test]
    async fn refresh_failure_logs_out() {
        let auth = logged_in(FakeAuthApi::default()).await;

        assert_eq!(auth.refresh_access_token().await, None);
        assert_eq!(auth.session().await, Session::default());
        assert_eq!(auth.api().logout_calls.load(Ordering::SeqCst), 1);
        for key in [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            assert_eq!(stored(&auth, key).await, None);
        }
    }

    #[actix_web::test]
    async fn logout_clears_state_even_when_request_fails() {
        let auth = logged_in(FakeAuthApi {
            logout_fails: true,
            ..FakeAuthApi::default()
        })
        .await;

        auth.logout().await;

        assert!(!auth.is_authenticated().await);
        assert!(!auth.is_admin().await);
        assert_eq!(stored(&auth, TOKEN_KEY).await, None);
        assert_eq!(auth.api().logout_calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn logout_without_token_skips_request() {
        let auth = AuthContext::hydrate(MemorySessionStorage::new(), FakeAuthApi::default());
        auth.logout().await;
        assert_eq!(auth.api().logout_calls.load(Ordering::SeqCst), 0);
    }
}
