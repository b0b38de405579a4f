use actix_multipart::form::MultipartForm;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::{Datelike, Local};
use tera::{Context, Tera};

use crate::auth::context::RequestAuth;
use crate::domain::member::{MEMBER_TEAMS, MemberStatus, join_year_options, term_options};
use crate::dto::admin::MembersAdminQuery;
use crate::export::{ExportQuery, MemberColumn, export_filename};
use crate::forms::admin::members::MemberForm;
use crate::routes::admin::admin_context;
use crate::routes::{filter_query, redirect, render_template, service_failure};
use crate::services::ServiceResult;
use crate::services::members::{
    delete_member, export_members, load_admin_members, load_member, save_member, set_pinned,
};

const MEMBERS_PATH: &str = "/admin/members";

fn insert_options(context: &mut Context) {
    let statuses = [MemberStatus::Active, MemberStatus::Inactive]
        .map(|status| (status.as_str(), status.label()));
    context.insert("teams", &MEMBER_TEAMS);
    context.insert("terms", &term_options());
    context.insert("join_years", &join_year_options(Local::now().year()));
    context.insert("statuses", &statuses);
}

#[get("/members")]
pub async fn show_members(
    query: web::Query<MembersAdminQuery>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_admin_members(auth.api(), query.into_inner()).await {
        Ok(data) => data,
        Err(err) => return service_failure(&err, "Không thể kết nối đến server", "/admin"),
    };

    let mut context = admin_context(&auth, &flash_messages, "members").await;
    context.insert("page", &data);
    context.insert("query", &filter_query(&data.filter));
    let columns = MemberColumn::ALL
        .iter()
        .map(|c| (c.key(), c.label(), MemberColumn::DEFAULT.contains(c)))
        .collect::<Vec<_>>();
    context.insert("columns", &columns);
    insert_options(&mut context);
    render_template(&tera, "admin/members/index.html", &context)
}

/// Spreadsheet or CSV download of the filtered member list.
///
/// `fields` may repeat, so the query is decoded with `serde_html_form`.
#[get("/members/export")]
pub async fn export_members_file(req: HttpRequest, auth: RequestAuth) -> HttpResponse {
    let query: ExportQuery = match serde_html_form::from_str(req.query_string()) {
        Ok(query) => query,
        Err(err) => {
            log::error!("Failed to parse export query: {err}");
            FlashMessage::error("Có lỗi xảy ra khi xuất file").send();
            return redirect(MEMBERS_PATH);
        }
    };

    match export_members(auth.api(), &query).await {
        Ok(file) => {
            let filename = export_filename(Local::now().date_naive(), query.file_type);
            HttpResponse::Ok()
                .content_type(query.file_type.content_type())
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(file)
        }
        Err(err) => service_failure(&err, "Có lỗi xảy ra khi xuất file", MEMBERS_PATH),
    }
}

#[get("/members/new")]
pub async fn new_member(
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = admin_context(&auth, &flash_messages, "members").await;
    insert_options(&mut context);
    render_template(&tera, "admin/members/form.html", &context)
}

#[get("/members/{member_id}/edit")]
pub async fn edit_member(
    member_id: web::Path<i32>,
    auth: RequestAuth,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let member = match load_member(auth.api(), member_id.into_inner()).await {
        Ok(member) => member,
        Err(err) => return service_failure(&err, "Không thể kết nối đến server", MEMBERS_PATH),
    };

    let mut context = admin_context(&auth, &flash_messages, "members").await;
    context.insert("member", &member);
    insert_options(&mut context);
    render_template(&tera, "admin/members/form.html", &context)
}

async fn store(auth: &RequestAuth, id: Option<i32>, form: MemberForm) -> ServiceResult<()> {
    let (input, avatar) = form.into_parts()?;
    save_member(auth, id, input, avatar).await
}

#[post("/members")]
pub async fn create_member(
    auth: RequestAuth,
    MultipartForm(form): MultipartForm<MemberForm>,
) -> impl Responder {
    match store(&auth, None, form).await {
        Ok(()) => {
            FlashMessage::success("Thêm thành viên thành công").send();
            redirect(MEMBERS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", "/admin/members/new"),
    }
}

#[post("/members/{member_id}/update")]
pub async fn update_member(
    member_id: web::Path<i32>,
    auth: RequestAuth,
    MultipartForm(form): MultipartForm<MemberForm>,
) -> impl Responder {
    let member_id = member_id.into_inner();
    match store(&auth, Some(member_id), form).await {
        Ok(()) => {
            FlashMessage::success("Cập nhật thành công").send();
            redirect(MEMBERS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", &format!("{MEMBERS_PATH}/{member_id}/edit")),
    }
}

#[post("/members/{member_id}/delete")]
pub async fn destroy_member(member_id: web::Path<i32>, auth: RequestAuth) -> impl Responder {
    match delete_member(&auth, member_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Xóa thành viên thành công").send();
            redirect(MEMBERS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", MEMBERS_PATH),
    }
}

#[post("/members/{member_id}/pin")]
pub async fn pin_member(member_id: web::Path<i32>, auth: RequestAuth) -> impl Responder {
    match set_pinned(&auth, member_id.into_inner(), true).await {
        Ok(()) => {
            FlashMessage::success("Ghim thành viên làm leader thành công").send();
            redirect(MEMBERS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", MEMBERS_PATH),
    }
}

#[post("/members/{member_id}/unpin")]
pub async fn unpin_member(member_id: web::Path<i32>, auth: RequestAuth) -> impl Responder {
    match set_pinned(&auth, member_id.into_inner(), false).await {
        Ok(()) => {
            FlashMessage::success("Bỏ ghim thành viên thành công").send();
            redirect(MEMBERS_PATH)
        }
        Err(err) => service_failure(&err, "Lỗi", MEMBERS_PATH),
    }
}
