use async_trait::async_trait;
use reqwest::Method;

use crate::api::errors::ApiResult;
use crate::api::{ApiClient, ProjectReader, ProjectWriter};
use crate::domain::project::{NewProject, Project};
use crate::domain::types::ProjectId;

#[async_trait]
impl ProjectReader for ApiClient {
    async fn list_projects(&self) -> ApiResult<Vec<Project>> {
        self.get_list("/projects", None).await
    }

    async fn get_project(&self, id: ProjectId) -> ApiResult<Project> {
        self.get(&format!("/projects/{id}"), None).await
    }
}

#[async_trait]
impl ProjectWriter for ApiClient {
    async fn create_project(&self, token: &str, project: &NewProject) -> ApiResult<()> {
        self.send_json_unit(Method::POST, "/projects", Some(token), project)
            .await
    }

    async fn update_project(
        &self,
        token: &str,
        id: ProjectId,
        project: &NewProject,
    ) -> ApiResult<()> {
        self.send_json_unit(Method::PUT, &format!("/projects/{id}"), Some(token), project)
            .await
    }

    async fn delete_project(&self, token: &str, id: ProjectId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &format!("/projects/{id}"), Some(token))
            .await
    }
}
