//! Admin console pages. Everything here is mounted under `/admin` behind
//! [`crate::middleware::RequireAdmin`].

use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::auth::context::RequestAuth;
use crate::routes::{base_context, render_template};
use crate::services::auth::load_dashboard;

pub mod banners;
pub mod contacts;
pub mod documents;
pub mod events;
pub mod members;
pub mod projects;

/// Base context for an admin page with `section` highlighted in the menu.
pub(crate) async fn admin_context(
    auth: &RequestAuth,
    flash_messages: &IncomingFlashMessages,
    section: &str,
) -> Context {
    base_context(flash_messages, &auth.session().await, section)
}

#[get("")]
pub async fn show_dashboard(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let counts = load_dashboard(&auth).await;

    let mut context = admin_context(&auth, &flash_messages, "dashboard").await;
    context.insert("counts", &counts);
    render_template(&tera, "admin/dashboard.html", &context)
}
