use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use validator::Validate;

use crate::auth::context::RequestAuth;
use crate::domain::project::{NewProject, PROJECT_CATEGORIES};
use crate::dto::admin::PageQuery;
use crate::forms::FormError;
use crate::forms::admin::projects::ProjectForm;
use crate::routes::admin::admin_context;
use crate::routes::{redirect, render_template, service_failure};
use crate::services::projects::{delete_project, load_admin_projects, load_project, save_project};
use crate::services::ServiceResult;

const PROJECTS_PATH: &str = "/admin/projects";

#[get("/projects")]
pub async fn show_projects(
    query: web::Query<PageQuery>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_admin_projects(auth.api(), query.page).await {
        Ok(data) => data,
        Err(err) => return service_failure(&err, "Không thể tải danh sách dự án", "/admin"),
    };

    let mut context = admin_context(&auth, &flash_messages, "projects").await;
    context.insert("page", &data);
    render_template(&tera, "admin/projects/index.html", &context)
}

#[get("/projects/new")]
pub async fn new_project(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = admin_context(&auth, &flash_messages, "projects").await;
    context.insert("categories", &PROJECT_CATEGORIES);
    render_template(&tera, "admin/projects/form.html", &context)
}

#[get("/projects/{project_id}/edit")]
pub async fn edit_project(
    project_id: web::Path<i32>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let project = match load_project(auth.api(), project_id.into_inner()).await {
        Ok(project) => project,
        Err(err) => return service_failure(&err, "Không thể tải dự án", PROJECTS_PATH),
    };

    let mut context = admin_context(&auth, &flash_messages, "projects").await;
    context.insert("project", &project);
    context.insert("categories", &PROJECT_CATEGORIES);
    render_template(&tera, "admin/projects/form.html", &context)
}

async fn store(auth: &RequestAuth, id: Option<i32>, form: ProjectForm) -> ServiceResult<()> {
    let form = form.normalized();
    form.validate().map_err(FormError::from)?;
    save_project(auth, id, NewProject::from(form)).await
}

#[post("/projects")]
pub async fn create_project(
    auth: RequestAuth,
    web::Form(form): web::Form<ProjectForm>,
) -> impl Responder {
    match store(&auth, None, form).await {
        Ok(()) => {
            FlashMessage::success("Thêm mới thành công").send();
            redirect(PROJECTS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", "/admin/projects/new"),
    }
}

#[post("/projects/{project_id}/update")]
pub async fn update_project(
    project_id: web::Path<i32>,
    auth: RequestAuth,
    web::Form(form): web::Form<ProjectForm>,
) -> impl Responder {
    let project_id = project_id.into_inner();
    match store(&auth, Some(project_id), form).await {
        Ok(()) => {
            FlashMessage::success("Cập nhật thành công").send();
            redirect(PROJECTS_PATH)
        }
        Err(err) => service_failure(
            &err,
            "Lỗi",
            &format!("{PROJECTS_PATH}/{project_id}/edit"),
        ),
    }
}

#[post("/projects/{project_id}/delete")]
pub async fn destroy_project(project_id: web::Path<i32>, auth: RequestAuth) -> impl Responder {
    match delete_project(&auth, project_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Xóa dự án thành công").send();
            redirect(PROJECTS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", PROJECTS_PATH),
    }
}
