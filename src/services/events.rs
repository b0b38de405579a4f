use crate::api::{AuthApi, EventReader, EventWriter, UploadFile};
use crate::auth::context::AuthContext;
use crate::auth::storage::SessionStorage;
use crate::domain::event::{Event, EventRegistration, EventStatus};
use crate::domain::types::EventId;
use crate::dto::admin::EventsAdminData;
use crate::dto::public::{EventDetailData, EventsPageData, EventsQuery};
use crate::forms::admin::events::EventInput;
use crate::listing::{ALL_TAB, EVENTS_PER_PAGE, filter_events, highlighted_events};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::services::{ServiceError, ServiceResult, with_token};

pub async fn load_events_page<A>(api: &A, query: EventsQuery) -> ServiceResult<EventsPageData>
where
    A: EventReader + ?Sized,
{
    let events = api.list_events().await.map_err(|err| {
        log::error!("Failed to list events: {err}");
        ServiceError::from(err)
    })?;

    let tab = query
        .tab
        .filter(|t| EventStatus::parse(t).is_some())
        .unwrap_or_else(|| ALL_TAB.to_string());
    let highlighted = highlighted_events(&events);
    let filtered = filter_events(events, Some(&tab));

    let mut tabs = vec![(ALL_TAB, "Tất cả")];
    tabs.extend(EventStatus::ALL.iter().map(|s| (s.as_str(), s.label())));

    Ok(EventsPageData {
        tab,
        tabs,
        events: Paginated::slice(filtered, query.page.unwrap_or(1), EVENTS_PER_PAGE),
        highlighted,
    })
}

pub async fn load_event_detail<A>(
    api: &A,
    id: i32,
    client_ip: &str,
) -> ServiceResult<EventDetailData>
where
    A: EventReader + ?Sized,
{
    let id = EventId::new(id).map_err(|_| ServiceError::NotFound)?;
    let event = api.get_event(id).await.map_err(|err| {
        log::error!("Failed to get event {id}: {err}");
        ServiceError::from(err)
    })?;
    let registered = event.is_registered(client_ip);
    Ok(EventDetailData { event, registered })
}

/// Records the visitor's interest in an event.
///
/// The visitor is identified by address; registering twice is refused
/// without calling the API.
pub async fn register_interest<A>(api: &A, id: i32, client_ip: &str) -> ServiceResult<Event>
where
    A: EventReader + EventWriter + ?Sized,
{
    let id = EventId::new(id).map_err(|_| ServiceError::NotFound)?;
    let mut event = api.get_event(id).await.map_err(|err| {
        log::error!("Failed to get event {id}: {err}");
        ServiceError::from(err)
    })?;
    if event.is_registered(client_ip) {
        return Err(ServiceError::Form(
            "Bạn đã đăng ký tham gia sự kiện này.".to_string(),
        ));
    }

    let mut registered_ips = event.registered_ips.clone();
    registered_ips.push(client_ip.to_string());
    let registration = EventRegistration { registered_ips };
    api.register_for_event(id, &registration)
        .await
        .map_err(|err| {
            log::error!("Failed to register for event {id}: {err}");
            ServiceError::from(err)
        })?;

    event.registered_ips = registration.registered_ips;
    Ok(event)
}

pub async fn load_admin_events<A>(api: &A, page: Option<usize>) -> ServiceResult<EventsAdminData>
where
    A: EventReader + ?Sized,
{
    let events = api.list_events().await.map_err(|err| {
        log::error!("Failed to list events: {err}");
        ServiceError::from(err)
    })?;
    Ok(EventsAdminData {
        events: Paginated::slice(events, page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE),
    })
}

pub async fn load_event<A>(api: &A, id: i32) -> ServiceResult<Event>
where
    A: EventReader + ?Sized,
{
    let id = EventId::new(id).map_err(|_| ServiceError::NotFound)?;
    api.get_event(id).await.map_err(|err| {
        log::error!("Failed to get event {id}: {err}");
        ServiceError::from(err)
    })
}

/// Creates the event, or replaces it when `id` is given.
///
/// A newly picked image is uploaded first and its URL stored on the event.
pub async fn save_event<S, A>(
    auth: &AuthContext<S, A>,
    id: Option<i32>,
    input: EventInput,
    image: Option<UploadFile>,
) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + EventWriter,
{
    let api = auth.api();
    let id = id.map(EventId::new).transpose()?;

    let image_url = match image {
        Some(file) => {
            let file = &file;
            with_token(auth, |token| async move {
                api.upload_event_image(&token, file.clone()).await
            })
            .await
            .map_err(|err| {
                log::error!("Failed to upload event image: {err}");
                err
            })?
            .url
        }
        None => input.image.clone(),
    };

    let event = &input.into_new_event(image_url);
    with_token(auth, |token| async move {
        match id {
            Some(id) => api.update_event(&token, id, event).await,
            None => api.create_event(&token, event).await,
        }
    })
    .await
    .map_err(|err| {
        log::error!("Failed to save event: {err}");
        err
    })
}

pub async fn delete_event<S, A>(auth: &AuthContext<S, A>, id: i32) -> ServiceResult<()>
where
    S: SessionStorage,
    A: AuthApi + EventWriter,
{
    let api = auth.api();
    let id = EventId::new(id)?;
    with_token(auth, |token| async move { api.delete_event(&token, id).await })
        .await
        .map_err(|err| {
            log::error!("Failed to delete event {id}: {err}");
            err
        })
}
