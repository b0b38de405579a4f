//! Website and admin console of the Developer Student Club, rendered on the
//! server from the club's REST API.

pub mod domain;
pub mod listing;
pub mod pagination;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod export;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: models::config::ServerConfig) -> std::io::Result<()> {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::middleware::{Compress, Logger};
    use actix_web::{App, HttpServer, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::api::ApiClient;
    use crate::api::relay::RelayClient;
    use crate::middleware::RequireAdmin;
    use crate::routes::{MediaUrlFilter, admin, auth as auth_routes, contact, public, registration};

    let api = ApiClient::new(&server_config.api_url)
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
    let relay = RelayClient::new(
        &server_config.registration_relay_url,
        &server_config.contact_relay_url,
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build form relay client: {e}")))?;

    // Keys and stores for sessions and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let mut tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
    tera.register_filter(
        "image_url",
        MediaUrlFilter::new(&server_config.upload_url, &server_config.default_avatar),
    );

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting server on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        server_config.api_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(auth_routes::show_login)
            .service(auth_routes::submit_login)
            .service(auth_routes::logout)
            .service(
                web::scope("/admin")
                    .wrap(RequireAdmin)
                    .service(admin::show_dashboard)
                    .service(admin::events::show_events)
                    .service(admin::events::new_event)
                    .service(admin::events::edit_event)
                    .service(admin::events::create_event)
                    .service(admin::events::update_event)
                    .service(admin::events::destroy_event)
                    .service(admin::projects::show_projects)
                    .service(admin::projects::new_project)
                    .service(admin::projects::edit_project)
                    .service(admin::projects::create_project)
                    .service(admin::projects::update_project)
                    .service(admin::projects::destroy_project)
                    .service(admin::members::show_members)
                    .service(admin::members::export_members_file)
                    .service(admin::members::new_member)
                    .service(admin::members::edit_member)
                    .service(admin::members::create_member)
                    .service(admin::members::update_member)
                    .service(admin::members::destroy_member)
                    .service(admin::members::pin_member)
                    .service(admin::members::unpin_member)
                    .service(admin::banners::show_banners)
                    .service(admin::banners::new_banner)
                    .service(admin::banners::edit_banner)
                    .service(admin::banners::create_banner)
                    .service(admin::banners::update_banner)
                    .service(admin::banners::toggle_banner)
                    .service(admin::banners::destroy_banner)
                    .service(admin::documents::show_documents)
                    .service(admin::documents::new_document)
                    .service(admin::documents::edit_document)
                    .service(admin::documents::create_document)
                    .service(admin::documents::update_document)
                    .service(admin::documents::toggle_document)
                    .service(admin::documents::destroy_document)
                    .service(admin::contacts::show_contacts)
                    .service(admin::contacts::destroy_contact),
            )
            .service(public::show_home)
            .service(public::show_about)
            .service(public::show_events)
            .service(public::show_event)
            .service(public::register_event)
            .service(public::show_projects)
            .service(public::show_project)
            .service(public::show_members)
            .service(public::show_documents)
            .service(public::download_document)
            .service(contact::show_contact)
            .service(contact::submit_contact)
            .service(registration::show_registration)
            .service(registration::post_registration)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(api.clone()))
            .app_data(web::Data::new(relay.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
