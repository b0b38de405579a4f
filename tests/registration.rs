use std::net::TcpListener;
use std::thread;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::{
    App, HttpResponse, HttpServer,
    http::{StatusCode, header},
    test, web,
};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use dsc_portal::api::ApiClient;
use dsc_portal::api::relay::RelayClient;
use dsc_portal::domain::registration::FieldKey;
use dsc_portal::routes::{MediaUrlFilter, registration};

/// Starts a stand-in form collector: `/ok` accepts, `/fail` answers 500.
fn spawn_collector() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind collector");
    let addr = listener.local_addr().expect("collector address");
    thread::spawn(move || {
        actix_web::rt::System::new().block_on(async move {
            HttpServer::new(|| {
                App::new()
                    .route("/ok", web::post().to(|| async { HttpResponse::Ok().finish() }))
                    .route(
                        "/fail",
                        web::post().to(|| async { HttpResponse::InternalServerError().finish() }),
                    )
            })
            .workers(1)
            .listen(listener)?
            .run()
            .await
        })
    });
    format!("http://{addr}")
}

macro_rules! portal {
    ($relay_url:expr) => {{
        let key = Key::from(&[7; 64]);
        let mut tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))
            .expect("templates parse");
        tera.register_filter(
            "image_url",
            MediaUrlFilter::new("http://api.local", "/assets/images/default-avatar.svg"),
        );
        let relay = RelayClient::new(&$relay_url, &$relay_url).expect("relay client");
        test::init_service(
            App::new()
                .wrap(
                    FlashMessagesFramework::builder(
                        CookieMessageStore::builder(key.clone()).build(),
                    )
                    .build(),
                )
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(
                    ApiClient::new("http://127.0.0.1:9").expect("api client"),
                ))
                .app_data(web::Data::new(relay))
                .service(registration::show_registration)
                .service(registration::post_registration),
        )
        .await
    }};
}

/// Final-step post carrying a complete, valid set of answers.
fn final_step_body() -> String {
    let mut pairs = vec![
        ("step", "5"),
        ("validated", "0,1,2,3,4"),
        ("action", "submit"),
    ];
    pairs.extend(FieldKey::ALL.iter().map(|key| {
        let value = match key {
            FieldKey::HoTen => "Nguyen Van A",
            FieldKey::Mssv => "21110001",
            FieldKey::Khoa => "CNTT",
            FieldKey::Nganh => "CNTT",
            FieldKey::Lop => "21110CL1",
            FieldKey::GioiTinh => "Nam",
            FieldKey::NgaySinh => "2003-01-01",
            FieldKey::DanToc => "Kinh",
            FieldKey::Sdt => "0912345678",
            FieldKey::Email => "a@example.com",
            FieldKey::DiaChi => "1 Vo Van Ngan, Thu Duc",
            FieldKey::DiemHocKi1 | FieldKey::DiemHocKi2 => "8.5",
            FieldKey::DiemRenLuyen => "90",
            FieldKey::DiemCtxh => "30.5",
            FieldKey::NgayVaoDangDuBi
            | FieldKey::NgayVaoDangChinhThuc
            | FieldKey::NgayVaoDoan
            | FieldKey::Facebook => "",
            _ => "Không",
        };
        (key.name(), value)
    }));
    serde_html_form::to_string(&pairs).expect("encode body")
}

fn post_final_step() -> test::TestRequest {
    test::TestRequest::post()
        .uri("/sv5t/register")
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(final_step_body())
}

#[actix_web::test]
async fn accepted_registration_redirects_with_success_notice() {
    let collector = spawn_collector();
    let app = portal!(format!("{collector}/ok"));

    let resp = test::call_service(&app, post_final_step().to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/sv5t/register"
    );
    let cookies: Vec<Cookie<'static>> = resp
        .response()
        .cookies()
        .map(|c| c.into_owned())
        .collect();
    assert!(!cookies.is_empty());

    let mut req = test::TestRequest::get().uri("/sv5t/register");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let body = test::call_and_read_body(&app, req.to_request()).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Đăng ký thành công"));
    // The wizard starts over on step one.
    assert!(html.contains(r#"name="step" value="0""#));
}

#[actix_web::test]
async fn rejected_registration_keeps_answers_on_last_step() {
    let collector = spawn_collector();
    let app = portal!(format!("{collector}/fail"));

    let resp = test::call_service(&app, post_final_step().to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Gửi thất bại, vui lòng thử lại."));
    assert!(html.contains(r#"name="step" value="5""#));
    assert!(html.contains("21110001"));
}
