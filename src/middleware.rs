//! Actix middleware gating the admin console.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};

use crate::auth::guard::{GuardDecision, authorize};
use crate::auth::storage::{CookieSessionStorage, load_session};

/// Redirects requests lacking an admin session.
///
/// Anonymous visitors are sent to the login page with the requested location
/// in `from`; logged in users without the admin role are sent home.
#[derive(Clone, Copy, Debug)]
pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireAdminMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddleware { service }))
    }
}

pub struct RequireAdminMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let mut storage = CookieSessionStorage::new(req.get_session());
        let session = load_session(&mut storage);
        let location = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.path().to_string());

        let decision = authorize(&session, true, &location);
        if let Some(target) = decision.location() {
            if matches!(decision, GuardDecision::RedirectHome) {
                log::warn!("Non-admin user denied access to {location}");
            }
            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, target))
                .finish()
                .map_into_right_body();
            return Box::pin(async move { Ok(req.into_response(response)) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
