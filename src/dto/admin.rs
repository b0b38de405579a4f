use serde::{Deserialize, Serialize};

use crate::domain::banner::Banner;
use crate::domain::contact::Contact;
use crate::domain::document::{Document, DocumentCategory};
use crate::domain::event::Event;
use crate::domain::member::Member;
use crate::domain::project::Project;
use crate::listing::{ContactFilter, DocumentFilter, MemberFilter};
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub events: usize,
    pub projects: usize,
    pub members: usize,
    pub documents: usize,
    pub banners: usize,
    pub contacts: usize,
}

#[derive(Debug, Serialize)]
pub struct EventsAdminData {
    pub events: Paginated<Event>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsAdminData {
    pub projects: Paginated<Project>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MembersAdminQuery {
    #[serde(default)]
    pub search: String,
    pub team: Option<String>,
    pub year: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

impl MembersAdminQuery {
    pub fn filter(&self) -> MemberFilter {
        MemberFilter {
            search: self.search.clone(),
            team: self.team.clone(),
            year: self.year.clone(),
            status: self.status.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MembersAdminData {
    pub pinned: Option<Member>,
    pub members: Paginated<Member>,
    pub filter: MemberFilter,
}

#[derive(Debug, Serialize)]
pub struct BannersAdminData {
    pub banners: Vec<Banner>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentsAdminQuery {
    #[serde(default)]
    pub search: String,
    pub category: Option<String>,
    pub page: Option<usize>,
}

impl DocumentsAdminQuery {
    pub fn filter(&self) -> DocumentFilter {
        DocumentFilter {
            search: self.search.clone(),
            category: self.category.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentsAdminData {
    pub documents: Paginated<Document>,
    pub filter: DocumentFilter,
    pub categories: &'static [DocumentCategory],
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactsAdminQuery {
    #[serde(default)]
    pub search: String,
    pub subject: Option<String>,
    pub page: Option<usize>,
}

impl ContactsAdminQuery {
    pub fn filter(&self) -> ContactFilter {
        ContactFilter {
            search: self.search.clone(),
            subject: self.subject.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactsAdminData {
    pub contacts: Paginated<Contact>,
    pub filter: ContactFilter,
}
