use crate::api::{BannerReader, EventReader, ProjectReader};
use crate::domain::banner::active_banners;
use crate::dto::public::HomePageData;
use crate::listing::highlighted_events;

const HOME_PROJECTS: usize = 3;

/// Loads the home page sections.
///
/// Each section degrades to empty on failure so the page always renders.
pub async fn load_home<A>(api: &A) -> HomePageData
where
    A: BannerReader + EventReader + ProjectReader + ?Sized,
{
    let banners = api.list_banners().await.unwrap_or_else(|err| {
        log::error!("Failed to list banners: {err}");
        Vec::new()
    });
    let events = api.list_events().await.unwrap_or_else(|err| {
        log::error!("Failed to list events: {err}");
        Vec::new()
    });
    let mut projects = api.list_projects().await.unwrap_or_else(|err| {
        log::error!("Failed to list projects: {err}");
        Vec::new()
    });
    projects.truncate(HOME_PROJECTS);

    HomePageData {
        banners: active_banners(banners),
        featured_events: highlighted_events(&events),
        projects,
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;

    #[actix_web::test]
    async fn failing_sections_are_empty() {
        let mut api = MockApi::new();
        api.expect_list_banners()
            .returning(|| Err(ApiError::Transport("down".into())));
        api.expect_list_events().returning(|| {
            Ok(serde_json::from_value(json!([
                {"id": 1, "title": "Hackathon", "status": "upcoming", "isHighlight": true},
                {"id": 2, "title": "Workshop", "status": "past", "isHighlight": true}
            ]))
            .unwrap())
        });
        api.expect_list_projects().returning(|| Ok(Vec::new()));

        let data = load_home(&api).await;
        assert!(data.banners.is_empty());
        assert_eq!(data.featured_events.len(), 1);
        assert_eq!(data.featured_events[0].title, "Hackathon");
    }
}
