use crate::api::{AuthApi, ProjectReader, ProjectWriter};
use crate::auth::context::AuthContext;
use crate::auth::storage::SessionStorage;
use crate::domain::project::{NewProject, PROJECT_CATEGORIES, Project};
use crate::domain::types::ProjectId;
use crate::dto::admin::ProjectsAdminData;
use crate::dto::public::{ProjectsPageData, ProjectsQuery};
use crate::listing::{ALL_TAB, filter_projects};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::{ServiceError, ServiceResult, with_token};

pub async fn load_projects_page<A>(
    api: &A,
    query: ProjectsQuery,
) -> ServiceResult<ProjectsPageData>
where
    A: ProjectReader + ?Sized,
{
    let projects = api.list_projects().await.map_err(|err| {
        log::error!("Failed to list projects: {err}");
        ServiceError::from(err)
    })?;
    let category = query
        .category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| ALL_TAB.to_string());

    let mut categories = vec![(ALL_TAB, "Tất cả")];
    categories.extend(PROJECT_CATEGORIES);

    Ok(ProjectsPageData {
        projects: filter_projects(projects, Some(&category)),
        category,
        categories,
    })
}

pub async fn load_project<A>(api: &A, id: i32) -> ServiceResult<Project>
where
    A: ProjectReader + ?Sized,
{
    let id = ProjectId::new(id).map_err(|_| ServiceError::NotFound)?;
    api.get_project(id).await.map_err(|err| {
        log::error!("Failed to get project {id}: {err}");
        ServiceError::from(err)
    })
}

pub async fn load_admin_projects<A>(
    api: &A,
    page: Option<usize>,
) -> ServiceResult<ProjectsAdminData>
where
    A: ProjectReader + ?Sized,
{
    let projects = api.list_projects().await.map_err(|err| {
        log::error!("Failed to list projects: {err}");
        ServiceError::from(err)
    })?;
    Ok(ProjectsAdminData {
        projects: Paginated::slice(projects, page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE),
    })
}

pub async fn save_project<S, A>(
    auth: &AuthContext<S, A>,
    id: Option<i32>,
    project: NewProject,
) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + ProjectWriter,
{
    let api = auth.api();
    let id = id.map(ProjectId::new).transpose()?;
    let project = &project;
    with_token(auth, |token| async move {
        match id {
            Some(id) => api.update_project(&token, id, project).await,
            None => api.create_project(&token, project).await,
        }
    })
    .await
    .map_err(|err| {
        log::error!("Failed to save project: {err}");
        err
    })
}

pub async fn delete_project<S, A>(auth: &AuthContext<S, A>, id: i32) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + ProjectWriter,
{
    let api = auth.api();
    let id = ProjectId::new(id)?;
    with_token(auth, |token| async move { api.delete_project(&token, id).await })
        .await
        .map_err(|err| {
            log::error!("Failed to delete project {id}: {err}");
            err
        })
}
