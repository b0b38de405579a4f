use serde::{Deserialize, Serialize};

use crate::domain::banner::Banner;
use crate::domain::document::{Document, DocumentCategory};
use crate::domain::event::Event;
use crate::domain::project::Project;
use crate::listing::DocumentFilter;
use crate::pagination::Paginated;

#[derive(Debug, Serialize)]
pub struct HomePageData {
    pub banners: Vec<Banner>,
    pub featured_events: Vec<Event>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub tab: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct EventsPageData {
    pub tab: String,
    pub tabs: Vec<(&'static str, &'static str)>,
    pub events: Paginated<Event>,
    pub highlighted: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct EventDetailData {
    pub event: Event,
    /// The visitor already registered from this address.
    pub registered: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsPageData {
    pub category: String,
    pub categories: Vec<(&'static str, &'static str)>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentsQuery {
    #[serde(default)]
    pub search: String,
    pub category: Option<String>,
    pub page: Option<usize>,
}

impl DocumentsQuery {
    pub fn filter(&self) -> DocumentFilter {
        DocumentFilter {
            search: self.search.clone(),
            category: self.category.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentsPageData {
    pub documents: Paginated<Document>,
    pub search: String,
    pub category: String,
    pub breadcrumbs: Vec<&'static str>,
    pub categories: &'static [DocumentCategory],
}
