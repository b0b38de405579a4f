use serde::{Deserialize, Serialize};

use crate::domain::types::ContactId;

/// Subjects offered by the contact form.
pub const CONTACT_SUBJECTS: [(&str, &str); 5] = [
    ("general", "Thông tin chung"),
    ("event", "Sự kiện"),
    ("project", "Dự án"),
    ("membership", "Thành viên"),
    ("other", "Khác"),
];

pub fn subject_label(key: &str) -> &str {
    CONTACT_SUBJECTS
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(key, |(_, label)| label)
}

/// Message left through the public contact form, as stored by the API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: String,
}

/// Message relayed from the public contact form.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
