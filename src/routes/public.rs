use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::context::RequestAuth;
use crate::domain::member::{TEAM_STUDENT_ASSOCIATION, TEAM_YOUTH_UNION};
use crate::domain::types::resolve_media_url;
use crate::dto::public::{DocumentsQuery, EventsQuery, ProjectsQuery};
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::{documents, events, home, members, projects};

/// Address the visitor is registered under for event sign-ups.
fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

#[get("/")]
pub async fn show_home(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = home::load_home(auth.api()).await;

    let mut context = base_context(&flash_messages, &auth.session().await, "home");
    context.insert("page", &data);
    render_template(&tera, "public/home.html", &context)
}

#[get("/about")]
pub async fn show_about(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &auth.session().await, "about");
    render_template(&tera, "public/about.html", &context)
}

#[get("/events")]
pub async fn show_events(
    query: web::Query<EventsQuery>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &auth.session().await, "events");
    match events::load_events_page(auth.api(), query.into_inner()).await {
        Ok(data) => context.insert("page", &data),
        Err(_) => context.insert("load_error", "Không thể tải danh sách sự kiện"),
    }
    render_template(&tera, "public/events.html", &context)
}

#[get("/events/{event_id}")]
pub async fn show_event(
    req: HttpRequest,
    event_id: web::Path<i32>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match events::load_event_detail(auth.api(), event_id.into_inner(), &client_ip(&req))
        .await
    {
        Ok(data) => data,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Không tìm thấy sự kiện").send();
            return redirect("/events");
        }
        Err(_) => {
            FlashMessage::error("Không thể tải danh sách sự kiện").send();
            return redirect("/events");
        }
    };

    let mut context = base_context(&flash_messages, &auth.session().await, "events");
    context.insert("page", &data);
    render_template(&tera, "public/event_detail.html", &context)
}

#[post("/events/{event_id}/register")]
pub async fn register_event(
    req: HttpRequest,
    event_id: web::Path<i32>,
    auth: RequestAuth,
) -> impl Responder {
    let event_id = event_id.into_inner();
    match events::register_interest(auth.api(), event_id, &client_ip(&req)).await {
        Ok(_) => FlashMessage::success("Đăng ký tham gia thành công!").send(),
        Err(ServiceError::Form(message)) => FlashMessage::info(message).send(),
        Err(_) => FlashMessage::error("Đăng ký không thành công, vui lòng thử lại.").send(),
    }
    redirect(&format!("/events/{event_id}"))
}

#[get("/projects")]
pub async fn show_projects(
    query: web::Query<ProjectsQuery>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &auth.session().await, "projects");
    match projects::load_projects_page(auth.api(), query.into_inner()).await {
        Ok(data) => context.insert("page", &data),
        Err(_) => context.insert("load_error", "Không thể tải danh sách dự án"),
    }
    render_template(&tera, "public/projects.html", &context)
}

#[get("/projects/{project_id}")]
pub async fn show_project(
    project_id: web::Path<i32>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let project = match projects::load_project(auth.api(), project_id.into_inner()).await {
        Ok(project) => project,
        Err(_) => {
            FlashMessage::error("Không tìm thấy dự án").send();
            return redirect("/projects");
        }
    };

    let mut context = base_context(&flash_messages, &auth.session().await, "projects");
    context.insert("project", &project);
    render_template(&tera, "public/project_detail.html", &context)
}

#[get("/members")]
pub async fn show_members(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &auth.session().await, "members");
    match members::load_member_board(auth.api()).await {
        Ok(board) => context.insert("board", &board),
        Err(_) => context.insert("load_error", "Không thể tải danh sách thành viên"),
    }
    context.insert("youth_union", TEAM_YOUTH_UNION);
    context.insert("student_association", TEAM_STUDENT_ASSOCIATION);
    render_template(&tera, "public/members.html", &context)
}

#[get("/documents")]
pub async fn show_documents(
    query: web::Query<DocumentsQuery>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &auth.session().await, "documents");
    match documents::load_documents_page(auth.api(), query.into_inner()).await {
        Ok(data) => context.insert("page", &data),
        Err(_) => context.insert("load_error", "Không thể tải tài liệu"),
    }
    render_template(&tera, "public/documents.html", &context)
}

#[get("/documents/{document_id}/download")]
pub async fn download_document(
    document_id: web::Path<i32>,
    auth: RequestAuth,
    server_config: web::Data<ServerConfig>,
) -> HttpResponse {
    match documents::record_download(auth.api(), document_id.into_inner()).await {
        Ok(file_url) => redirect(&resolve_media_url(&server_config.upload_url, &file_url)),
        Err(_) => {
            FlashMessage::error("Không thể tải tài liệu").send();
            redirect("/documents")
        }
    }
}
