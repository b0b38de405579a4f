use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::auth::context::RequestAuth;
use crate::auth::guard::{DASHBOARD_PATH, HOME_PATH, LOGIN_PATH, login_location};
use crate::forms::auth::LoginForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::auth::{LOGIN_FAILED, login};

#[derive(Deserialize)]
pub struct LoginQuery {
    pub from: Option<String>,
}

#[get("/admin/login")]
pub async fn show_login(
    query: web::Query<LoginQuery>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if auth.is_admin().await {
        return redirect(DASHBOARD_PATH);
    }

    let mut context = base_context(&flash_messages, &auth.session().await, "login");
    context.insert("from", &query.from);
    render_template(&tera, "admin/login.html", &context)
}

#[post("/admin/login")]
pub async fn submit_login(auth: RequestAuth, web::Form(form): web::Form<LoginForm>) -> impl Responder {
    let back = match form.from.as_deref() {
        Some(from) => login_location(from),
        None => LOGIN_PATH.to_string(),
    };

    match login(&auth, form).await {
        Ok(outcome) => {
            FlashMessage::success(outcome.message).send();
            redirect(&outcome.redirect_to)
        }
        Err(err) => {
            FlashMessage::error(err.notice(LOGIN_FAILED)).send();
            redirect(&back)
        }
    }
}

#[post("/admin/logout")]
pub async fn logout(auth: RequestAuth) -> impl Responder {
    auth.logout().await;
    redirect(HOME_PATH)
}
