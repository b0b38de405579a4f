use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{ApiClient, DocumentReader, DocumentWriter, UploadFile, multipart_form};
use crate::domain::document::{Document, DownloadCount, NewDocument};
use crate::domain::types::DocumentId;

#[async_trait]
impl DocumentReader for ApiClient {
    async fn list_documents(&self) -> ApiResult<Vec<Document>> {
        self.get_list("/documents", None).await
    }
}

#[async_trait]
impl DocumentWriter for ApiClient {
    async fn create_document(
        &self,
        token: &str,
        document: &NewDocument,
        file: Option<UploadFile>,
    ) -> ApiResult<()> {
        let form = multipart_form(document.fields(), "file", file)?;
        self.send_multipart(Method::POST, "/documents", Some(token), form)
            .await
            .map(|_| ())
    }

    async fn update_document(
        &self,
        token: &str,
        id: DocumentId,
        document: &NewDocument,
        file: Option<UploadFile>,
    ) -> ApiResult<()> {
        let form = multipart_form(document.fields(), "file", file)?;
        self.send_multipart(Method::PUT, &format!("/documents/{id}"), Some(token), form)
            .await
            .map(|_| ())
    }

    async fn delete_document(&self, token: &str, id: DocumentId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/documents/{id}"), Some(token))
            .await
    }

    async fn record_download(&self, id: DocumentId, count: DownloadCount) -> ApiResult<()> {
        self.send_json_unit(Method::PATCH, &format!("/documents/{id}"), None, &count)
            .await
    }
}
