use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::context::RequestAuth;
use crate::domain::contact::CONTACT_SUBJECTS;
use crate::dto::admin::ContactsAdminQuery;
use crate::routes::admin::admin_context;
use crate::routes::{filter_query, redirect, render_template, service_failure};
use crate::services::contacts::{delete_contact, load_admin_contacts};

const CONTACTS_PATH: &str = "/admin/contacts";

#[get("/contacts")]
pub async fn show_contacts(
    query: web::Query<ContactsAdminQuery>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_admin_contacts(&auth, query.into_inner()).await {
        Ok(data) => data,
        Err(err) => return service_failure(&err, "Không thể tải danh sách liên hệ", "/admin"),
    };

    let mut context = admin_context(&auth, &flash_messages, "contacts").await;
    context.insert("page", &data);
    context.insert("query", &filter_query(&data.filter));
    context.insert("subjects", &CONTACT_SUBJECTS);
    render_template(&tera, "admin/contacts/index.html", &context)
}

#[post("/contacts/{contact_id}/delete")]
pub async fn destroy_contact(contact_id: web::Path<i32>, auth: RequestAuth) -> impl Responder {
    match delete_contact(&auth, contact_id.into_inner()).await {
        Ok(()) => FlashMessage::success("Đã xóa liên hệ thành công").send(),
        Err(err) => return service_failure(&err, "Không thể xóa liên hệ", CONTACTS_PATH),
    }
    redirect(CONTACTS_PATH)
}
