use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{ApiClient, ContactReader, ContactWriter};
use crate::domain::contact::Contact;
use crate::domain::types::ContactId;

#[async_trait]
impl ContactReader for ApiClient {
    async fn list_contacts(&self, token: &str) -> ApiResult<Vec<Contact>> {
        self.get_list("/contacts", Some(token)).await
    }
}

#[async_trait]
impl ContactWriter for ApiClient {
    async fn delete_contact(&self, token: &str, id: ContactId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/contacts/{id}"), Some(token))
            .await
    }
}
