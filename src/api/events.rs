use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{ApiClient, EventReader, EventWriter, UploadFile, decode, multipart_form};
use crate::domain::event::{Event, EventRegistration, NewEvent};
use crate::domain::member::UploadedFile;
use crate::domain::types::EventId;

#[async_trait]
impl EventReader for ApiClient {
    async fn list_events(&self) -> ApiResult<Vec<Event>> {
        self.get_list("/events", None).await
    }

    async fn get_event(&self, id: EventId) -> ApiResult<Event> {
        self.get(&format!("/events/{id}"), None).await
    }
}

#[async_trait]
impl EventWriter for ApiClient {
    async fn create_event(&self, token: &str, event: &NewEvent) -> ApiResult<()> {
        self.send_json_unit(Method::POST, "/events", Some(token), event)
            .await
    }

    async fn update_event(&self, token: &str, id: EventId, event: &NewEvent) -> ApiResult<()> {
        self.send_json_unit(Method::PUT, &format!("/events/{id}"), Some(token), event)
            .await
    }

    async fn delete_event(&self, token: &str, id: EventId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/events/{id}"), Some(token))
            .await
    }

    async fn upload_event_image(&self, token: &str, file: UploadFile) -> ApiResult<UploadedFile> {
        let form = multipart_form(Vec::new(), "image", Some(file))?;
        let body = self
            .send_multipart(Method::POST, "/events/upload-image", Some(token), form)
            .await?;
        decode(&body)
    }

    async fn register_for_event(
        &self,
        id: EventId,
        registration: &EventRegistration,
    ) -> ApiResult<()> {
        self.send_json_unit(Method::PATCH, &format!("/events/{id}"), None, registration)
            .await
    }
}
