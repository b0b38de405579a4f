use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::api::relay::RelayClient;
use crate::auth::context::RequestAuth;
use crate::domain::registration::{GIOI_TINH_OPTIONS, NGANH_OPTIONS};
use crate::domain::wizard::Wizard;
use crate::dto::registration::WizardPageData;
use crate::forms::registration::parse_wizard;
use crate::routes::{base_context, redirect, render_template};
use crate::services::registration::{WizardOutcome, handle_wizard};

const WIZARD_PATH: &str = "/sv5t/register";

fn render_wizard(tera: &Tera, mut context: Context, wizard: &Wizard) -> HttpResponse {
    context.insert("wizard", &WizardPageData::from(wizard));
    context.insert("nganh_options", NGANH_OPTIONS);
    context.insert("gioi_tinh_options", GIOI_TINH_OPTIONS);
    render_template(tera, "public/registration.html", &context)
}

#[get("/sv5t/register")]
pub async fn show_registration(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &auth.session().await, "registration");
    render_wizard(&tera, context, &Wizard::new())
}

/// One wizard post: `next`, `back` or `submit`, with every answer so far.
#[post("/sv5t/register")]
pub async fn post_registration(
    body: web::Bytes,
    auth: RequestAuth,
    relay: web::Data<RelayClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let submission = match parse_wizard(&body) {
        Ok(submission) => submission,
        Err(err) => {
            FlashMessage::error(err.user_message()).send();
            return redirect(WIZARD_PATH);
        }
    };

    let mut context = base_context(&flash_messages, &auth.session().await, "registration");
    match handle_wizard(relay.get_ref(), submission).await {
        WizardOutcome::Continue(wizard) => render_wizard(&tera, context, &wizard),
        WizardOutcome::Submitted(_) => {
            FlashMessage::success("🎉 Đăng ký thành công! Cảm ơn bạn đã tham gia.").send();
            redirect(WIZARD_PATH)
        }
        WizardOutcome::RelayFailed(wizard) => {
            context.insert("submit_error", "Gửi thất bại, vui lòng thử lại.");
            render_wizard(&tera, context, &wizard)
        }
    }
}
