use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::context::RequestAuth;
use crate::forms::admin::ToggleActiveForm;
use crate::forms::admin::banners::BannerForm;
use crate::routes::admin::admin_context;
use crate::routes::{redirect, render_template, service_failure};
use crate::services::ServiceResult;
use crate::services::banners::{
    delete_banner, load_admin_banners, load_banner, save_banner, set_banner_active,
};

const BANNERS_PATH: &str = "/admin/banners";

#[get("/banners")]
pub async fn show_banners(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_admin_banners(auth.api()).await {
        Ok(data) => data,
        Err(err) => return service_failure(&err, "Không thể tải danh sách banner", "/admin"),
    };

    let mut context = admin_context(&auth, &flash_messages, "banners").await;
    context.insert("page", &data);
    render_template(&tera, "admin/banners/index.html", &context)
}

#[get("/banners/new")]
pub async fn new_banner(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = admin_context(&auth, &flash_messages, "banners").await;
    render_template(&tera, "admin/banners/form.html", &context)
}

#[get("/banners/{banner_id}/edit")]
pub async fn edit_banner(
    banner_id: web::Path<i32>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let banner = match load_banner(auth.api(), banner_id.into_inner()).await {
        Ok(banner) => banner,
        Err(err) => return service_failure(&err, "Không thể tải banner", BANNERS_PATH),
    };

    let mut context = admin_context(&auth, &flash_messages, "banners").await;
    context.insert("banner", &banner);
    render_template(&tera, "admin/banners/form.html", &context)
}

async fn store(auth: &RequestAuth, id: Option<i32>, form: BannerForm) -> ServiceResult<()> {
    let (banner, image) = form.into_parts(id.is_none())?;
    save_banner(auth, id, banner, image).await
}

#[post("/banners")]
pub async fn create_banner(
    auth: RequestAuth,
    MultipartForm(form): MultipartForm<BannerForm>,
) -> impl Responder {
    match store(&auth, None, form).await {
        Ok(()) => {
            FlashMessage::success("Thêm mới thành công").send();
            redirect(BANNERS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", "/admin/banners/new"),
    }
}

#[post("/banners/{banner_id}/update")]
pub async fn update_banner(
    banner_id: web::Path<i32>,
    auth: RequestAuth,
    MultipartForm(form): MultipartForm<BannerForm>,
) -> impl Responder {
    let banner_id = banner_id.into_inner();
    match store(&auth, Some(banner_id), form).await {
        Ok(()) => {
            FlashMessage::success("Cập nhật thành công").send();
            redirect(BANNERS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", &format!("{BANNERS_PATH}/{banner_id}/edit")),
    }
}

#[post("/banners/{banner_id}/active")]
pub async fn toggle_banner(
    banner_id: web::Path<i32>,
    auth: RequestAuth,
    web::Form(form): web::Form<ToggleActiveForm>,
) -> impl Responder {
    match set_banner_active(&auth, banner_id.into_inner(), form.active).await {
        Ok(()) => FlashMessage::success("Cập nhật trạng thái thành công").send(),
        Err(err) => return service_failure(&err, "Lỗi", BANNERS_PATH),
    }
    redirect(BANNERS_PATH)
}

#[post("/banners/{banner_id}/delete")]
pub async fn destroy_banner(banner_id: web::Path<i32>, auth: RequestAuth) -> impl Responder {
    match delete_banner(&auth, banner_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Xóa banner thành công").send();
            redirect(BANNERS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", BANNERS_PATH),
    }
}
