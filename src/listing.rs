//! Search, filter and ordering predicates applied to fetched collections.
//!
//! Every list page fetches its whole collection and narrows it here before
//! slicing it with [`crate::pagination::Paginated`].

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::contact::Contact;
use crate::domain::document::{ALL_CATEGORIES, Document};
use crate::domain::event::{Event, EventStatus};
use crate::domain::member::{Member, MemberStatus};
use crate::domain::project::Project;

pub const EVENTS_PER_PAGE: usize = 6;
pub const DOCUMENTS_PER_PAGE: usize = 5;
pub const MEMBERS_PER_PAGE: usize = 10;
pub const CONTACTS_PER_PAGE: usize = 10;

/// Tab value selecting every item.
pub const ALL_TAB: &str = "all";

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Normalizes a query-string value: blank and `all` mean "no filter".
fn selected(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL_TAB)
}

pub fn filter_events(events: Vec<Event>, tab: Option<&str>) -> Vec<Event> {
    match selected(tab) {
        None => events,
        Some(tab) => match EventStatus::parse(tab) {
            Some(status) => events.into_iter().filter(|e| e.status == status).collect(),
            None => Vec::new(),
        },
    }
}

pub fn highlighted_events(events: &[Event]) -> Vec<Event> {
    events.iter().filter(|e| e.is_featured()).cloned().collect()
}

pub fn filter_projects(projects: Vec<Project>, category: Option<&str>) -> Vec<Project> {
    match selected(category) {
        None => projects,
        Some(category) => projects
            .into_iter()
            .filter(|p| p.category == category)
            .collect(),
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl DocumentFilter {
    pub fn category(&self) -> &str {
        selected(self.category.as_deref()).unwrap_or(ALL_CATEGORIES)
    }

    pub fn matches(&self, doc: &Document) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || contains_ci(&doc.title, &needle)
            || contains_ci(&doc.description, &needle);
        let matches_category = match selected(self.category.as_deref()) {
            None => true,
            Some(category) => doc.category == category || doc.sub_category == category,
        };
        matches_search && matches_category
    }
}

/// Narrows documents for display; the public page never shows inactive ones.
pub fn filter_documents(
    documents: Vec<Document>,
    filter: &DocumentFilter,
    include_inactive: bool,
) -> Vec<Document> {
    documents
        .into_iter()
        .filter(|d| include_inactive || d.active)
        .filter(|d| filter.matches(d))
        .collect()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl MemberFilter {
    pub fn matches(&self, member: &Member) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || contains_ci(&member.name, &needle)
            || contains_ci(&member.role, &needle)
            || contains_ci(&member.department, &needle);
        let matches_team = selected(self.team.as_deref()).is_none_or(|t| member.team == t);
        let matches_year =
            selected(self.year.as_deref()).is_none_or(|y| member.year.as_deref() == Some(y));
        let matches_status = selected(self.status.as_deref())
            .is_none_or(|s| MemberStatus::parse(s) == Some(member.status));
        matches_search && matches_team && matches_year && matches_status
    }
}

/// Member roster of the admin console: the pinned leader apart, the rest
/// filtered.
pub fn split_members(members: Vec<Member>, filter: &MemberFilter) -> (Option<Member>, Vec<Member>) {
    let mut pinned = None;
    let mut others = Vec::new();
    for member in members {
        if member.is_pinned && pinned.is_none() {
            pinned = Some(member);
        } else if !member.is_pinned && filter.matches(&member) {
            others.push(member);
        }
    }
    (pinned, others)
}

/// Leaders featured on the public members page.
#[derive(Debug, Default, Serialize)]
pub struct MemberBoard {
    pub union_secretary: Option<Member>,
    pub association_head: Option<Member>,
    /// Remaining active members keyed by team.
    pub teams: BTreeMap<String, Vec<Member>>,
}

pub fn member_board(members: Vec<Member>) -> MemberBoard {
    let mut board = MemberBoard::default();
    for member in members {
        if board.union_secretary.is_none() && member.is_union_secretary() {
            board.union_secretary = Some(member);
        } else if board.association_head.is_none() && member.is_association_head() {
            board.association_head = Some(member);
        } else if member.status == MemberStatus::Active {
            board.teams.entry(member.team.clone()).or_default().push(member);
        }
    }
    board
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub subject: Option<String>,
}

fn created_at_key(contact: &Contact) -> Option<i64> {
    DateTime::parse_from_rfc3339(&contact.created_at)
        .map(|dt| dt.timestamp())
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(&contact.created_at, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.and_utc().timestamp())
        })
        .ok()
}

/// Contacts matching the filter, newest first.
pub fn filter_contacts(contacts: Vec<Contact>, filter: &ContactFilter) -> Vec<Contact> {
    let needle = filter.search.trim().to_lowercase();
    let mut contacts: Vec<Contact> = contacts
        .into_iter()
        .filter(|c| needle.is_empty() || contains_ci(&c.name, &needle))
        .filter(|c| selected(filter.subject.as_deref()).is_none_or(|s| c.subject == s))
        .collect();
    contacts.sort_by(|a, b| {
        created_at_key(b)
            .cmp(&created_at_key(a))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    contacts
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event(id: i32, status: &str, highlight: bool) -> Event {
        serde_json::from_value(json!({
            "id": id, "title": format!("Event {id}"), "status": status, "isHighlight": highlight
        }))
        .unwrap()
    }

    fn document(id: i32, title: &str, category: &str, sub: &str, active: bool) -> Document {
        serde_json::from_value(json!({
            "id": id, "title": title, "description": "Giáo trình",
            "category": category, "subCategory": sub, "active": active
        }))
        .unwrap()
    }

    fn member(id: i32, name: &str, team: &str, year: Option<&str>, status: &str) -> Member {
        serde_json::from_value(json!({
            "id": id, "name": name, "team": team, "year": year,
            "status": status, "role": "Thành viên", "department": "CNTT"
        }))
        .unwrap()
    }

    fn contact(id: i32, name: &str, subject: &str, created_at: &str) -> Contact {
        serde_json::from_value(json!({
            "id": id, "name": name, "subject": subject, "created_at": created_at
        }))
        .unwrap()
    }

    #[test]
    fn events_filter_by_status_tab() {
        let events = vec![
            event(1, "upcoming", true),
            event(2, "past", true),
            event(3, "ongoing", false),
        ];
        assert_eq!(filter_events(events.clone(), Some("all")).len(), 3);
        assert_eq!(filter_events(events.clone(), None).len(), 3);
        let past = filter_events(events.clone(), Some("past"));
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].id.get(), 2);
        assert!(filter_events(events.clone(), Some("cancelled")).is_empty());

        let featured = highlighted_events(&events);
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].id.get(), 1);
    }

    #[test]
    fn documents_search_and_category() {
        let docs = vec![
            document(1, "Docker cơ bản", "container", "docker", true),
            document(2, "Git nâng cao", "cicd-vcs", "git", true),
            document(3, "Docker Compose", "container", "docker-compose", false),
        ];
        let filter = DocumentFilter {
            search: "DOCKER".into(),
            category: None,
        };
        assert_eq!(filter_documents(docs.clone(), &filter, false).len(), 1);
        assert_eq!(filter_documents(docs.clone(), &filter, true).len(), 2);

        let by_sub = DocumentFilter {
            search: String::new(),
            category: Some("git".into()),
        };
        assert_eq!(filter_documents(docs.clone(), &by_sub, false)[0].id.get(), 2);

        let by_parent = DocumentFilter {
            search: "giáo".into(),
            category: Some("container".into()),
        };
        assert_eq!(filter_documents(docs, &by_parent, true).len(), 2);
        assert_eq!(by_parent.category(), "container");
        assert_eq!(DocumentFilter::default().category(), ALL_CATEGORIES);
    }

    #[test]
    fn members_filter_by_team_year_status() {
        let members = vec![
            member(1, "An", "media", Some("2"), "active"),
            member(2, "Bình", "media", Some("3"), "inactive"),
            member(3, "Chi", "event", None, "active"),
        ];
        let filter = MemberFilter {
            team: Some("media".into()),
            ..MemberFilter::default()
        };
        assert_eq!(split_members(members.clone(), &filter).1.len(), 2);

        let filter = MemberFilter {
            year: Some("3".into()),
            status: Some("inactive".into()),
            ..MemberFilter::default()
        };
        let (_, found) = split_members(members.clone(), &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Bình");

        let filter = MemberFilter {
            search: "cntt".into(),
            status: Some("all".into()),
            ..MemberFilter::default()
        };
        assert_eq!(split_members(members, &filter).1.len(), 3);
    }

    #[test]
    fn pinned_member_is_kept_apart() {
        let mut pinned = member(9, "Dũng", "lead", None, "active");
        pinned.is_pinned = true;
        let members = vec![member(1, "An", "media", None, "active"), pinned];
        let (leader, others) = split_members(members, &MemberFilter::default());
        assert_eq!(leader.map(|m| m.name), Some("Dũng".to_string()));
        assert_eq!(others.len(), 1);
    }

    #[test]
    fn board_features_leaders() {
        let mut secretary = member(1, "An", "doankhoa", None, "active");
        secretary.role = "Bí thư Đoàn khoa".into();
        let mut head = member(2, "Bình", "lch", None, "active");
        head.role = "LCH Trưởng".into();
        let board = member_board(vec![
            secretary,
            head,
            member(3, "Chi", "media", None, "active"),
            member(4, "Dũng", "media", None, "inactive"),
        ]);
        assert_eq!(board.union_secretary.unwrap().name, "An");
        assert_eq!(board.association_head.unwrap().name, "Bình");
        assert_eq!(board.teams["media"].len(), 1);
    }

    #[test]
    fn contacts_newest_first() {
        let contacts = vec![
            contact(1, "An", "event", "2024-03-01T10:00:00Z"),
            contact(2, "Bình", "general", "2024-05-01T10:00:00Z"),
            contact(3, "Anh", "event", "2024-04-01 09:00:00"),
        ];
        let sorted = filter_contacts(contacts.clone(), &ContactFilter::default());
        let ids: Vec<i32> = sorted.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let filter = ContactFilter {
            search: "an".into(),
            subject: Some("event".into()),
        };
        assert_eq!(filter_contacts(contacts, &filter).len(), 2);
    }
}
