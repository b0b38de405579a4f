use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::context::RequestAuth;
use crate::domain::event::EventStatus;
use crate::dto::admin::PageQuery;
use crate::forms::admin::events::EventForm;
use crate::routes::admin::admin_context;
use crate::routes::{redirect, render_template, service_failure};
use crate::services::events::{delete_event, load_admin_events, load_event, save_event};
use crate::services::ServiceResult;

const EVENTS_PATH: &str = "/admin/events";

fn event_statuses() -> [(&'static str, &'static str); 3] {
    EventStatus::ALL.map(|status| (status.as_str(), status.label()))
}

#[get("/events")]
pub async fn show_events(
    query: web::Query<PageQuery>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_admin_events(auth.api(), query.page).await {
        Ok(data) => data,
        Err(err) => return service_failure(&err, "Không thể tải danh sách sự kiện", "/admin"),
    };

    let mut context = admin_context(&auth, &flash_messages, "events").await;
    context.insert("page", &data);
    render_template(&tera, "admin/events/index.html", &context)
}

#[get("/events/new")]
pub async fn new_event(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = admin_context(&auth, &flash_messages, "events").await;
    context.insert("statuses", &event_statuses());
    render_template(&tera, "admin/events/form.html", &context)
}

#[get("/events/{event_id}/edit")]
pub async fn edit_event(
    event_id: web::Path<i32>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let event = match load_event(auth.api(), event_id.into_inner()).await {
        Ok(event) => event,
        Err(err) => return service_failure(&err, "Không thể tải sự kiện", EVENTS_PATH),
    };

    let mut context = admin_context(&auth, &flash_messages, "events").await;
    context.insert("event", &event);
    context.insert("statuses", &event_statuses());
    render_template(&tera, "admin/events/form.html", &context)
}

async fn store(auth: &RequestAuth, id: Option<i32>, form: EventForm) -> ServiceResult<()> {
    let (input, image) = form.into_parts()?;
    save_event(auth, id, input, image).await
}

#[post("/events")]
pub async fn create_event(
    auth: RequestAuth,
    MultipartForm(form): MultipartForm<EventForm>,
) -> impl Responder {
    match store(&auth, None, form).await {
        Ok(()) => {
            FlashMessage::success("Thêm sự kiện mới thành công!").send();
            redirect(EVENTS_PATH)
        }
        Err(err) => service_failure(&err, "Không thể lưu sự kiện", "/admin/events/new"),
    }
}

#[post("/events/{event_id}/update")]
pub async fn update_event(
    event_id: web::Path<i32>,
    auth: RequestAuth,
    MultipartForm(form): MultipartForm<EventForm>,
) -> impl Responder {
    let event_id = event_id.into_inner();
    match store(&auth, Some(event_id), form).await {
        Ok(()) => {
            FlashMessage::success("Cập nhật sự kiện thành công!").send();
            redirect(EVENTS_PATH)
        }
        Err(err) => service_failure(
            &err,
            "Không thể lưu sự kiện",
            &format!("{EVENTS_PATH}/{event_id}/edit"),
        ),
    }
}

#[post("/events/{event_id}/delete")]
pub async fn destroy_event(event_id: web::Path<i32>, auth: RequestAuth) -> impl Responder {
    match delete_event(&auth, event_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Xóa sự kiện thành công").send();
            redirect(EVENTS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", EVENTS_PATH),
    }
}
