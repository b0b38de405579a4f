use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::{
    AuthApi, BannerReader, ContactReader, DocumentReader, EventReader, MemberReader,
    ProjectReader,
};
use crate::auth::context::AuthContext;
use crate::auth::guard::post_login_target;
use crate::auth::storage::SessionStorage;
use crate::dto::admin::DashboardData;
use crate::forms::FormError;
use crate::forms::auth::LoginForm;
use crate::services::contacts::fetch_contacts;
use crate::services::{ServiceError, ServiceResult};

pub const LOGIN_SUCCESS: &str = "Đăng nhập thành công!";
pub const LOGIN_FAILED: &str = "Đăng nhập thất bại!";
pub const LOGIN_UNAVAILABLE: &str = "Có lỗi xảy ra, vui lòng thử lại!";

/// A completed login: the notice to flash and where to go next.
#[derive(Debug, PartialEq, Eq)]
pub struct LoginOutcome {
    pub message: String,
    pub redirect_to: String,
}

/// Exchanges the posted credentials for a session.
///
/// Errors carry the notice to show on the login page.
pub async fn login<S, A>(auth: &AuthContext<S, A>, form: LoginForm) -> ServiceResult<LoginOutcome>
where
    S: SessionStorage,
    A: AuthApi,
{
    form.validate().map_err(FormError::from)?;

    let data = auth
        .api()
        .login(&form.credentials())
        .await
        .map_err(|err| {
            log::error!("Login failed for {}: {err}", form.username.trim());
            match &err {
                ApiError::Transport(_) | ApiError::Decode(_) | ApiError::InvalidUrl(_) => {
                    ServiceError::Form(LOGIN_UNAVAILABLE.to_string())
                }
                _ => ServiceError::Form(err.api_message().unwrap_or(LOGIN_FAILED).to_string()),
            }
        })?;

    let message = data
        .message
        .clone()
        .unwrap_or_else(|| LOGIN_SUCCESS.to_string());
    auth.login(data.access_token, data.refresh_token, data.user)
        .await
        .map_err(|err| {
            log::error!("Failed to persist session: {err}");
            ServiceError::Internal(err.to_string())
        })?;

    Ok(LoginOutcome {
        message,
        redirect_to: post_login_target(form.from.as_deref()).to_string(),
    })
}

/// Collection sizes shown on the dashboard. A section that fails to load
/// counts as zero.
pub async fn load_dashboard<S, A>(auth: &AuthContext<S, A>) -> DashboardData
where
    S: SessionStorage,
    A: AuthApi
        + EventReader
        + ProjectReader
        + MemberReader
        + DocumentReader
        + BannerReader
        + ContactReader,
{
    let api = auth.api();
    let (events, projects, members, documents, banners) = tokio::join!(
        api.list_events(),
        api.list_projects(),
        api.list_members(),
        api.list_documents(),
        api.list_banners(),
    );
    let contacts = fetch_contacts(auth).await;

    DashboardData {
        events: count("events", events),
        projects: count("projects", projects),
        members: count("members", members),
        documents: count("documents", documents),
        banners: count("banners", banners),
        contacts: count("contacts", contacts),
    }
}

fn count<T, E: std::fmt::Display>(section: &str, result: Result<Vec<T>, E>) -> usize {
    match result {
        Ok(items) => items.len(),
        Err(err) => {
            log::error!("Failed to count {section}: {err}");
            0
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::api::auth::LoginData;
    use crate::api::mock::MockApi;
    use crate::services::test_support::{admin, anonymous, logged_in};

    fn form(from: Option<&str>) -> LoginForm {
        LoginForm {
            username: " admin ".into(),
            password: "secret".into(),
            from: from.map(str::to_string),
        }
    }

    #[actix_web::test]
    async fn login_stores_session_and_follows_from() {
        let mut api = MockApi::new();
        api.expect_login()
            .withf(|c| c.username == "admin" && c.password == "secret")
            .times(1)
            .returning(|_| {
                Ok(LoginData {
                    access_token: "a".into(),
                    refresh_token: "r".into(),
                    user: admin(),
                    message: None,
                })
            });
        let auth = anonymous(api);

        let outcome = login(&auth, form(Some("/admin/events"))).await.unwrap();
        assert_eq!(outcome.message, LOGIN_SUCCESS);
        assert_eq!(outcome.redirect_to, "/admin/events");
        assert!(auth.is_admin().await);
    }

    #[actix_web::test]
    async fn rejected_login_uses_api_message() {
        let mut api = MockApi::new();
        api.expect_login().returning(|_| {
            Err(ApiError::Status {
                status: 400,
                message: "Sai mật khẩu".into(),
            })
        });
        let auth = anonymous(api);

        let err = login(&auth, form(None)).await.unwrap_err();
        assert_eq!(err.notice(LOGIN_FAILED), "Sai mật khẩu");
        assert!(!auth.is_authenticated().await);
    }

    #[actix_web::test]
    async fn empty_password_is_not_sent() {
        let mut api = MockApi::new();
        api.expect_login().never();
        let auth = anonymous(api);

        let err = login(
            &auth,
            LoginForm {
                username: "admin".into(),
                password: String::new(),
                from: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Vui lòng nhập mật khẩu!");
    }

    #[actix_web::test]
    async fn dashboard_degrades_failed_sections() {
        let mut api = MockApi::new();
        api.expect_list_events().returning(|| Ok(Vec::new()));
        api.expect_list_projects()
            .returning(|| Err(ApiError::Transport("down".into())));
        api.expect_list_members().returning(|| Ok(Vec::new()));
        api.expect_list_documents().returning(|| Ok(Vec::new()));
        api.expect_list_banners().returning(|| Ok(Vec::new()));
        api.expect_list_contacts().returning(|_| Ok(Vec::new()));
        let auth = logged_in(api);

        let data = load_dashboard(&auth).await;
        assert_eq!(data.projects, 0);
        assert_eq!(data.contacts, 0);
    }
}
