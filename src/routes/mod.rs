//! HTTP handlers and the helpers they share for rendering and redirects.

use std::collections::HashMap;

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use serde_json::{Value, json};
use tera::{Context, Tera};

use crate::domain::auth::Session;
use crate::domain::types::resolve_media_url;
use crate::services::ServiceError;

pub mod admin;
pub mod auth;
pub mod contact;
pub mod public;
pub mod registration;

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context every page starts from: pending alerts, the navigation entry to
/// highlight and the signed-in user, if any.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    session: &Session,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("current_user", &session.user);
    context.insert("is_admin", &session.is_admin());
    context
}

/// Query string prefix that keeps the active filter on pagination links.
///
/// Ends with `&` so the partial can append `page=N`.
pub fn filter_query<T: Serialize>(filter: &T) -> String {
    match serde_html_form::to_string(filter) {
        Ok(query) if !query.is_empty() => format!("{query}&"),
        Ok(_) => String::new(),
        Err(err) => {
            log::warn!("Failed to encode filter query: {err}");
            String::new()
        }
    }
}

/// Turns a failed service call into the response the user sees.
///
/// An expired session sends the admin back to the login page, a missing
/// record flashes `not_found` and everything else flashes a notice built
/// from `fallback`.
pub fn service_failure(err: &ServiceError, fallback: &str, back_to: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::warning("Phiên đăng nhập đã hết hạn, vui lòng đăng nhập lại.").send();
            redirect(&crate::auth::guard::login_location(back_to))
        }
        ServiceError::NotFound => {
            FlashMessage::error("Không tìm thấy dữ liệu").send();
            redirect(back_to)
        }
        ServiceError::Internal(_) => HttpResponse::InternalServerError().finish(),
        _ => {
            FlashMessage::error(err.notice(fallback)).send();
            redirect(back_to)
        }
    }
}

/// Resolves media paths in templates: `{{ event.image | image_url }}`.
///
/// `fallback` is used for empty paths, e.g. the default avatar.
pub struct MediaUrlFilter {
    base_url: String,
    default_avatar: String,
}

impl MediaUrlFilter {
    pub fn new(base_url: &str, default_avatar: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            default_avatar: default_avatar.to_string(),
        }
    }
}

impl tera::Filter for MediaUrlFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let path = value.as_str().unwrap_or_default();
        if !path.is_empty() {
            return Ok(json!(resolve_media_url(&self.base_url, path)));
        }
        let fallback = match args.get("fallback").and_then(Value::as_str) {
            Some("avatar") => self.default_avatar.as_str(),
            Some(other) => other,
            None => "",
        };
        Ok(json!(fallback))
    }
}
