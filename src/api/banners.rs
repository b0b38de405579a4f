use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{ApiClient, BannerReader, BannerWriter, UploadFile, multipart_form};
use crate::domain::banner::{Banner, NewBanner};
use crate::domain::types::BannerId;

#[async_trait]
impl BannerReader for ApiClient {
    async fn list_banners(&self) -> ApiResult<Vec<Banner>> {
        self.get_list("/banners", None).await
    }
}

#[async_trait]
impl BannerWriter for ApiClient {
    async fn create_banner(
        &self,
        token: &str,
        banner: &NewBanner,
        image: Option<UploadFile>,
    ) -> ApiResult<()> {
        let form = multipart_form(banner.fields(), "image", image)?;
        self.send_multipart(Method::POST, "/banners", Some(token), form)
            .await
            .map(|_| ())
    }

    async fn update_banner(
        &self,
        token: &str,
        id: BannerId,
        banner: &NewBanner,
        image: Option<UploadFile>,
    ) -> ApiResult<()> {
        let form = multipart_form(banner.fields(), "image", image)?;
        self.send_multipart(Method::PUT, &format!("/banners/{id}"), Some(token), form)
            .await
            .map(|_| ())
    }

    async fn delete_banner(&self, token: &str, id: BannerId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/banners/{id}"), Some(token))
            .await
    }
}
