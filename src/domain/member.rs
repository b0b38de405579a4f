use serde::{Deserialize, Serialize};

use crate::domain::types::MemberId;

/// Team keys shown in the admin filters and forms.
pub const MEMBER_TEAMS: [(&str, &str); 4] = [
    ("lead", "Lead Team"),
    ("academic", "Học thuật"),
    ("event", "Sự kiện"),
    ("media", "Truyền thông"),
];

/// Terms offered in the year filter, newest first.
pub fn term_options() -> Vec<String> {
    (2020..=2030).rev().map(|y| format!("{y}-{}", y + 1)).collect()
}

/// The last five calendar years up to `current_year`, newest first.
pub fn join_year_options(current_year: i32) -> Vec<String> {
    (0..5).map(|i| (current_year - i).to_string()).collect()
}

/// Team holding the faculty Youth Union secretary.
pub const TEAM_YOUTH_UNION: &str = "doankhoa";
/// Team holding the faculty Student Association head.
pub const TEAM_STUDENT_ASSOCIATION: &str = "lch";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Còn hoạt động",
            Self::Inactive => "Hết hoạt động",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberLinks {
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub join_year: String,
    #[serde(default)]
    pub status: MemberStatus,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub links: MemberLinks,
    #[serde(default)]
    pub is_pinned: bool,
}

impl Member {
    /// Secretary of the faculty Youth Union.
    pub fn is_union_secretary(&self) -> bool {
        self.team == TEAM_YOUTH_UNION && self.role.to_lowercase().contains("bí thư")
    }

    /// Head of the faculty Student Association.
    pub fn is_association_head(&self) -> bool {
        self.team == TEAM_STUDENT_ASSOCIATION && self.role.to_lowercase().contains("trưởng")
    }
}

/// Payload for creating or replacing a member from the admin console.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub team: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub join_year: String,
    pub status: MemberStatus,
    pub skills: Vec<String>,
    pub links: MemberLinks,
}

impl NewMember {
    /// Splits a comma separated skill list, dropping blanks.
    pub fn parse_skills(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Response of the avatar upload endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    #[serde(alias = "path")]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_options() {
        let terms = term_options();
        assert_eq!(terms.first().map(String::as_str), Some("2030-2031"));
        assert_eq!(terms.last().map(String::as_str), Some("2020-2021"));
        assert_eq!(join_year_options(2026), vec!["2026", "2025", "2024", "2023", "2022"]);
    }

    fn member(team: &str, role: &str) -> Member {
        serde_json::from_value(serde_json::json!({
            "id": 1, "name": "An", "team": team, "role": role
        }))
        .unwrap()
    }

    #[test]
    fn leaders_are_recognized_case_insensitively() {
        assert!(member("doankhoa", "Bí thư Đoàn khoa").is_union_secretary());
        assert!(member("lch", "Liên chi Hội Trưởng").is_association_head());
        assert!(!member("lch", "Bí thư").is_union_secretary());
        assert!(!member("media", "Trưởng ban").is_association_head());
    }

    #[test]
    fn member_defaults_are_lenient() {
        let m = member("media", "Designer");
        assert_eq!(m.status, MemberStatus::Active);
        assert_eq!(m.year, None);
        assert!(!m.is_pinned);
    }

    #[test]
    fn uploaded_file_accepts_path_alias() {
        let file: UploadedFile = serde_json::from_str(r#"{"path": "/uploads/a.png"}"#).unwrap();
        assert_eq!(file.url, "/uploads/a.png");
    }
}
