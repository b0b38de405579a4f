use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{ApiClient, MemberReader, MemberWriter, UploadFile, decode, multipart_form};
use crate::domain::member::{Member, NewMember, UploadedFile};
use crate::domain::types::MemberId;

#[async_trait]
impl MemberReader for ApiClient {
    async fn list_members(&self) -> ApiResult<Vec<Member>> {
        self.get_list("/members/", None).await
    }
}

#[async_trait]
impl MemberWriter for ApiClient {
    async fn create_member(&self, token: &str, member: &NewMember) -> ApiResult<()> {
        self.send_json_unit(Method::POST, "/members/", Some(token), member)
            .await
    }

    async fn update_member(&self, token: &str, id: MemberId, member: &NewMember) -> ApiResult<()> {
        self.send_json_unit(Method::PUT, &format!("/members/{id}"), Some(token), member)
            .await
    }

    async fn delete_member(&self, token: &str, id: MemberId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/members/{id}"), Some(token))
            .await
    }

    async fn pin_member(&self, token: &str, id: MemberId) -> ApiResult<()> {
        self.send_empty(Method::PUT, &format!("/members/pin/{id}"), Some(token))
            .await
    }

    async fn unpin_member(&self, token: &str, id: MemberId) -> ApiResult<()> {
        self.send_empty(Method::PUT, &format!("/members/unpin/{id}"), Some(token))
            .await
    }

    async fn upload_avatar(&self, token: &str, file: UploadFile) -> ApiResult<UploadedFile> {
        let form = multipart_form(Vec::new(), "avatar", Some(file))?;
        let body = self
            .send_multipart(Method::POST, "/members/upload-avatar", Some(token), form)
            .await?;
        decode(&body)
    }
}
