//! Mock API implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::auth::{Credentials, LoginData, TokenPair};
use crate::api::errors::ApiResult;
use crate::api::{
    AuthApi, BannerReader, BannerWriter, ContactReader, ContactWriter, DocumentReader,
    DocumentWriter, EventReader, EventWriter, FormRelay, MemberReader, MemberWriter,
    ProjectReader, ProjectWriter, UploadFile,
};
use crate::domain::banner::{Banner, NewBanner};
use crate::domain::contact::{Contact, ContactMessage};
use crate::domain::document::{Document, DownloadCount, NewDocument};
use crate::domain::event::{Event, EventRegistration, NewEvent};
use crate::domain::member::{Member, NewMember, UploadedFile};
use crate::domain::project::{NewProject, Project};
use crate::domain::registration::RegistrationPayload;
use crate::domain::types::{BannerId, ContactId, DocumentId, EventId, MemberId, ProjectId};

mock! {
    pub Api {}

    #[async_trait]
    impl EventReader for Api {
        async fn list_events(&self) -> ApiResult<Vec<Event>>;
        async fn get_event(&self, id: EventId) -> ApiResult<Event>;
    }

    #[async_trait]
    impl EventWriter for Api {
        async fn create_event(&self, token: &str, event: &NewEvent) -> ApiResult<()>;
        async fn update_event(&self, token: &str, id: EventId, event: &NewEvent) -> ApiResult<()>;
        async fn delete_event(&self, token: &str, id: EventId) -> ApiResult<()>;
        async fn upload_event_image(&self, token: &str, file: UploadFile) -> ApiResult<UploadedFile>;
        async fn register_for_event(
            &self,
            id: EventId,
            registration: &EventRegistration,
        ) -> ApiResult<()>;
    }

    #[async_trait]
    impl ProjectReader for Api {
        async fn list_projects(&self) -> ApiResult<Vec<Project>>;
        async fn get_project(&self, id: ProjectId) -> ApiResult<Project>;
    }

    #[async_trait]
    impl ProjectWriter for Api {
        async fn create_project(&self, token: &str, project: &NewProject) -> ApiResult<()>;
        async fn update_project(
            &self,
            token: &str,
            id: ProjectId,
            project: &NewProject,
        ) -> ApiResult<()>;
        async fn delete_project(&self, token: &str, id: ProjectId) -> ApiResult<()>;
    }

    #[async_trait]
    impl MemberReader for Api {
        async fn list_members(&self) -> ApiResult<Vec<Member>>;
    }

    #[async_trait]
    impl MemberWriter for Api {
        async fn create_member(&self, token: &str, member: &NewMember) -> ApiResult<()>;
        async fn update_member(&self, token: &str, id: MemberId, member: &NewMember) -> ApiResult<()>;
        async fn delete_member(&self, token: &str, id: MemberId) -> ApiResult<()>;
        async fn pin_member(&self, token: &str, id: MemberId) -> ApiResult<()>;
        async fn unpin_member(&self, token: &str, id: MemberId) -> ApiResult<()>;
        async fn upload_avatar(&self, token: &str, file: UploadFile) -> ApiResult<UploadedFile>;
    }

    #[async_trait]
    impl DocumentReader for Api {
        async fn list_documents(&self) -> ApiResult<Vec<Document>>;
    }

    #[async_trait]
    impl DocumentWriter for Api {
        async fn create_document(
            &self,
            token: &str,
            document: &NewDocument,
            file: Option<UploadFile>,
        ) -> ApiResult<()>;
        async fn update_document(
            &self,
            token: &str,
            id: DocumentId,
            document: &NewDocument,
            file: Option<UploadFile>,
        ) -> ApiResult<()>;
        async fn delete_document(&self, token: &str, id: DocumentId) -> ApiResult<()>;
        async fn record_download(&self, id: DocumentId, count: DownloadCount) -> ApiResult<()>;
    }

    #[async_trait]
    impl BannerReader for Api {
        async fn list_banners(&self) -> ApiResult<Vec<Banner>>;
    }

    #[async_trait]
    impl BannerWriter for Api {
        async fn create_banner(
            &self,
            token: &str,
            banner: &NewBanner,
            image: Option<UploadFile>,
        ) -> ApiResult<()>;
        async fn update_banner(
            &self,
            token: &str,
            id: BannerId,
            banner: &NewBanner,
            image: Option<UploadFile>,
        ) -> ApiResult<()>;
        async fn delete_banner(&self, token: &str, id: BannerId) -> ApiResult<()>;
    }

    #[async_trait]
    impl ContactReader for Api {
        async fn list_contacts(&self, token: &str) -> ApiResult<Vec<Contact>>;
    }

    #[async_trait]
    impl ContactWriter for Api {
        async fn delete_contact(&self, token: &str, id: ContactId) -> ApiResult<()>;
    }

    #[async_trait]
    impl AuthApi for Api {
        async fn login(&self, credentials: &Credentials) -> ApiResult<LoginData>;
        async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenPair>;
        async fn logout(&self, access_token: &str) -> ApiResult<()>;
    }

    #[async_trait]
    impl FormRelay for Api {
        async fn submit_registration(&self, payload: &RegistrationPayload) -> ApiResult<()>;
        async fn submit_contact(&self, message: &ContactMessage) -> ApiResult<()>;
    }
}
