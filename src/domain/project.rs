use serde::{Deserialize, Serialize};

use crate::domain::types::{ProjectId, SafeHtml};

/// Project categories offered as listing tabs.
pub const PROJECT_CATEGORIES: [(&str, &str); 3] =
    [("web", "Web"), ("mobile", "Mobile"), ("ai", "AI/ML")];

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectLinks {
    #[serde(default)]
    pub github: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: SafeHtml,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub team_size: u32,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub links: ProjectLinks,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
}

/// Payload for creating or replacing a project from the admin console.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub progress: u8,
    pub team_size: u32,
    pub technologies: Vec<String>,
    pub links: ProjectLinks,
    pub details: String,
}

impl NewProject {
    /// Splits a comma separated technology list, dropping blanks.
    pub fn parse_technologies(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_deserializes_with_missing_optionals() {
        let project: Project = serde_json::from_str(
            r#"{"id": 1, "title": "Portal", "category": "web",
                "links": {"github": "https://github.com/x/y"},
                "teamMembers": [{"name": "An"}]}"#,
        )
        .unwrap();
        assert_eq!(project.links.demo, None);
        assert_eq!(project.team_members[0].name, "An");
        assert_eq!(project.progress, 0);
    }

    #[test]
    fn technologies_are_split_and_trimmed() {
        assert_eq!(
            NewProject::parse_technologies(" Rust, Actix ,, Tera "),
            vec!["Rust", "Actix", "Tera"]
        );
    }
}
