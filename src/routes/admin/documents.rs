use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::context::RequestAuth;
use crate::domain::document::DOCUMENT_CATEGORIES;
use crate::dto::admin::DocumentsAdminQuery;
use crate::forms::admin::ToggleActiveForm;
use crate::forms::admin::documents::DocumentForm;
use crate::routes::admin::admin_context;
use crate::routes::{filter_query, redirect, render_template, service_failure};
use crate::services::ServiceResult;
use crate::services::documents::{
    delete_document, load_admin_documents, load_document, save_document, set_document_active,
};

const DOCUMENTS_PATH: &str = "/admin/documents";

#[get("/documents")]
pub async fn show_documents(
    query: web::Query<DocumentsAdminQuery>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_admin_documents(auth.api(), query.into_inner()).await {
        Ok(data) => data,
        Err(err) => return service_failure(&err, "Không thể tải tài liệu", "/admin"),
    };

    let mut context = admin_context(&auth, &flash_messages, "documents").await;
    context.insert("page", &data);
    context.insert("query", &filter_query(&data.filter));
    render_template(&tera, "admin/documents/index.html", &context)
}

#[get("/documents/new")]
pub async fn new_document(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = admin_context(&auth, &flash_messages, "documents").await;
    context.insert("categories", &DOCUMENT_CATEGORIES);
    render_template(&tera, "admin/documents/form.html", &context)
}

#[get("/documents/{document_id}/edit")]
pub async fn edit_document(
    document_id: web::Path<i32>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let document = match load_document(auth.api(), document_id.into_inner()).await {
        Ok(document) => document,
        Err(err) => return service_failure(&err, "Không thể tải tài liệu", DOCUMENTS_PATH),
    };

    let mut context = admin_context(&auth, &flash_messages, "documents").await;
    context.insert("document", &document);
    context.insert("categories", &DOCUMENT_CATEGORIES);
    render_template(&tera, "admin/documents/form.html", &context)
}

async fn store(auth: &RequestAuth, id: Option<i32>, form: DocumentForm) -> ServiceResult<()> {
    let (document, file) = form.into_parts(id.is_none())?;
    save_document(auth, id, document, file).await
}

#[post("/documents")]
pub async fn create_document(
    auth: RequestAuth,
    MultipartForm(form): MultipartForm<DocumentForm>,
) -> impl Responder {
    match store(&auth, None, form).await {
        Ok(()) => {
            FlashMessage::success("Thêm mới thành công").send();
            redirect(DOCUMENTS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", "/admin/documents/new"),
    }
}

#[post("/documents/{document_id}/update")]
pub async fn update_document(
    document_id: web::Path<i32>,
    auth: RequestAuth,
    MultipartForm(form): MultipartForm<DocumentForm>,
) -> impl Responder {
    let document_id = document_id.into_inner();
    match store(&auth, Some(document_id), form).await {
        Ok(()) => {
            FlashMessage::success("Cập nhật thành công").send();
            redirect(DOCUMENTS_PATH)
        }
        Err(err) => service_failure(
            &err,
            "Lỗi",
            &format!("{DOCUMENTS_PATH}/{document_id}/edit"),
        ),
    }
}

#[post("/documents/{document_id}/active")]
pub async fn toggle_document(
    document_id: web::Path<i32>,
    auth: RequestAuth,
    web::Form(form): web::Form<ToggleActiveForm>,
) -> impl Responder {
    match set_document_active(&auth, document_id.into_inner(), form.active).await {
        Ok(()) => FlashMessage::success("Cập nhật trạng thái thành công").send(),
        Err(err) => return service_failure(&err, "Lỗi", DOCUMENTS_PATH),
    }
    redirect(DOCUMENTS_PATH)
}

#[post("/documents/{document_id}/delete")]
pub async fn destroy_document(document_id: web::Path<i32>, auth: RequestAuth) -> impl Responder {
    match delete_document(&auth, document_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Xóa tài liệu thành công").send();
            redirect(DOCUMENTS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", DOCUMENTS_PATH),
    }
}
