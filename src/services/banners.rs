use crate::api::{AuthApi, BannerReader, BannerWriter, UploadFile};
use crate::auth::context::AuthContext;
use crate::auth::storage::SessionStorage;
use crate::domain::banner::{Banner, NewBanner};
use crate::domain::types::BannerId;
use crate::dto::admin::BannersAdminData;
use crate::services::{ServiceError, ServiceResult, with_token};

async fn fetch_banners<A>(api: &A) -> ServiceResult<Vec<Banner>>
where
    A: BannerReader + ?Sized,
{
    api.list_banners().await.map_err(|err| {
        log::error!("Failed to list banners: {err}");
        ServiceError::from(err)
    })
}

pub async fn load_admin_banners<A>(api: &A) -> ServiceResult<BannersAdminData>
where
    A: BannerReader + ?Sized,
{
    let mut banners = fetch_banners(api).await?;
    banners.sort_by_key(|b| b.order);
    Ok(BannersAdminData { banners })
}

pub async fn load_banner<A>(api: &A, id: i32) -> ServiceResult<Banner>
where
    A: BannerReader + ?Sized,
{
    let id = BannerId::new(id).map_err(|_| ServiceError::NotFound)?;
    fetch_banners(api)
        .await?
        .into_iter()
        .find(|b| b.id == id)
        .ok_or(ServiceError::NotFound)
}

pub async fn save_banner<S, A>(
    auth: &AuthContext<S, A>,
    id: Option<i32>,
    banner: NewBanner,
    image: Option<UploadFile>,
) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + BannerWriter,
{
    let api = auth.api();
    let id = id.map(BannerId::new).transpose()?;
    let (banner, image) = (&banner, &image);
    with_token(auth, |token| async move {
        match id {
            Some(id) => api.update_banner(&token, id, banner, image.clone()).await,
            None => api.create_banner(&token, banner, image.clone()).await,
        }
    })
    .await
    .map_err(|err| {
        log::error!("Failed to save banner: {err}");
        err
    })
}

/// Shows or hides a banner on the home page, keeping its other fields.
pub async fn set_banner_active<S, A>(
    auth: &AuthContext<S, A>,
    id: i32,
    active: bool,
) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + BannerReader + BannerWriter,
{
    let current = load_banner(auth.api(), id).await?;
    let banner = NewBanner {
        active,
        ..NewBanner::from(&current)
    };
    save_banner(auth, Some(id), banner, None).await
}

pub async fn delete_banner<S, A>(auth: &AuthContext<S, A>, id: i32) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + BannerWriter,
{
    let api = auth.api();
    let id = BannerId::new(id)?;
    with_token(auth, |token| async move { api.delete_banner(&token, id).await })
        .await
        .map_err(|err| {
            log::error!("Failed to delete banner {id}: {err}");
            err
        })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::mock::MockApi;
    use crate::services::test_support::logged_in;

    #[actix_web::test]
    async fn admin_list_is_ordered() {
        let mut api = MockApi::new();
        api.expect_list_banners().returning(|| {
            Ok(serde_json::from_value(json!([
                {"id": 1, "title": "B", "order": 2, "active": true},
                {"id": 2, "title": "A", "order": 1, "active": false}
            ]))
            .unwrap())
        });
        let data = load_admin_banners(&api).await.unwrap();
        assert_eq!(data.banners[0].title, "A");
    }

    #[actix_web::test]
    async fn unknown_banner_cannot_be_toggled() {
        let mut api = MockApi::new();
        api.expect_list_banners().returning(|| Ok(Vec::new()));
        api.expect_update_banner().never();
        let auth = logged_in(api);

        assert!(matches!(
            set_banner_active(&auth, 5, true).await,
            Err(ServiceError::NotFound)
        ));
    }
}
