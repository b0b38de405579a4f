use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::relay::RelayClient;
use crate::auth::context::RequestAuth;
use crate::domain::contact::CONTACT_SUBJECTS;
use crate::forms::contact::ContactForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::contact::send_message;

#[get("/contact")]
pub async fn show_contact(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &auth.session().await, "contact");
    context.insert("subjects", &CONTACT_SUBJECTS);
    render_template(&tera, "public/contact.html", &context)
}

#[post("/contact")]
pub async fn submit_contact(
    relay: web::Data<RelayClient>,
    web::Form(form): web::Form<ContactForm>,
) -> impl Responder {
    match send_message(relay.get_ref(), form).await {
        Ok(()) => FlashMessage::success("Đã gửi tin nhắn thành công!").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(ServiceError::Api(_)) => {
            FlashMessage::error("Gửi tin nhắn thất bại, vui lòng thử lại.").send()
        }
        Err(_) => FlashMessage::error("Có lỗi xảy ra, vui lòng thử lại.").send(),
    }
    redirect("/contact")
}
