use serde::{Deserialize, Serialize};

use crate::domain::types::{EventId, SafeHtml};

/// Lifecycle of an event as reported by the API.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Past,
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [Self::Upcoming, Self::Ongoing, Self::Past];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Past => "past",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upcoming => "Sắp diễn ra",
            Self::Ongoing => "Đang diễn ra",
            Self::Past => "Đã kết thúc",
            Self::Unknown => "Không xác định",
        }
    }

    /// Parses a status tab value; `None` for anything that is not a status.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: SafeHtml,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub is_highlight: bool,
    #[serde(default)]
    pub facebook_url: String,
    #[serde(default)]
    pub google_form_url: String,
    #[serde(default)]
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default, rename = "registered_ips")]
    pub registered_ips: Vec<String>,
}

impl Event {
    /// Highlighted events are featured on the listing unless already over.
    pub fn is_featured(&self) -> bool {
        self.is_highlight && self.status != EventStatus::Past
    }

    pub fn is_registered(&self, client_ip: &str) -> bool {
        self.registered_ips.iter().any(|ip| ip == client_ip)
    }
}

/// Payload for creating or replacing an event from the admin console.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub status: EventStatus,
    pub image: String,
    pub organizer: String,
    pub is_highlight: bool,
    pub facebook_url: String,
}

impl NewEvent {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        description: String,
        date: String,
        time: String,
        location: String,
        status: EventStatus,
        image: String,
        organizer: String,
        is_highlight: bool,
        facebook_url: String,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            description: SafeHtml::new(&description).into(),
            date: date.trim().to_string(),
            time: time.trim().to_string(),
            location: location.trim().to_string(),
            status,
            image: image.trim().to_string(),
            organizer: organizer.trim().to_string(),
            is_highlight,
            facebook_url: facebook_url.trim().to_string(),
        }
    }
}

/// Patch appending a client to the event's registration list.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EventRegistration {
    pub registered_ips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_tolerated() {
        let event: Event = serde_json::from_str(
            r#"{"id": 3, "title": "Workshop", "status": "cancelled", "isHighlight": true}"#,
        )
        .unwrap();
        assert_eq!(event.status, EventStatus::Unknown);
        assert!(event.is_featured());
        assert!(event.registered_ips.is_empty());
    }

    #[test]
    fn past_events_are_never_featured() {
        let event: Event = serde_json::from_str(
            r#"{"id": 3, "title": "Workshop", "status": "past", "isHighlight": true,
                "registered_ips": ["10.0.0.1"]}"#,
        )
        .unwrap();
        assert!(!event.is_featured());
        assert!(event.is_registered("10.0.0.1"));
        assert!(!event.is_registered("10.0.0.2"));
    }

    #[test]
    fn new_event_sanitizes_description() {
        let event = NewEvent::new(
            " Hackathon ".into(),
            "<b>Join</b><script>x()</script>".into(),
            "2024-05-01".into(),
            "08:00".into(),
            "Hall A".into(),
            EventStatus::Upcoming,
            String::new(),
            "DSC".into(),
            false,
            String::new(),
        );
        assert_eq!(event.title, "Hackathon");
        assert_eq!(event.description, "<b>Join</b>");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["isHighlight"], false);
        assert_eq!(json["status"], "upcoming");
    }
}
