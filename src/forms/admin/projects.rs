use serde::Deserialize;
use validator::Validate;

use crate::domain::project::{NewProject, ProjectLinks};

#[derive(Debug, Deserialize, Validate)]
pub struct ProjectForm {
    #[validate(length(min = 1, message = "Vui lòng nhập tên dự án"))]
    pub title: String,
    #[validate(length(min = 1, message = "Vui lòng nhập mô tả"))]
    pub description: String,
    #[validate(length(min = 1, message = "Vui lòng chọn danh mục"))]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    #[validate(range(max = 100, message = "Tiến độ phải từ 0 đến 100"))]
    pub progress: u32,
    #[serde(default)]
    pub team_size: u32,
    /// Comma separated.
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    #[validate(url(message = "Link GitHub không hợp lệ"))]
    pub github: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Link demo không hợp lệ"))]
    pub demo: Option<String>,
    #[serde(default)]
    pub details: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProjectForm {
    /// Trims text and turns blank optional links into `None`.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            image: self.image.trim().to_string(),
            github: non_blank(self.github),
            demo: non_blank(self.demo),
            details: self.details.trim().to_string(),
            ..self
        }
    }
}

impl From<ProjectForm> for NewProject {
    fn from(form: ProjectForm) -> Self {
        Self {
            title: form.title,
            description: crate::domain::types::SafeHtml::new(&form.description).into(),
            category: form.category,
            image: form.image,
            progress: form.progress.min(100) as u8,
            team_size: form.team_size,
            technologies: NewProject::parse_technologies(&form.technologies),
            links: ProjectLinks {
                github: form.github.unwrap_or_default(),
                demo: form.demo,
            },
            details: form.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProjectForm {
        ProjectForm {
            title: " DSC Portal ".into(),
            description: "<p>Website</p><script>x</script>".into(),
            category: "web".into(),
            image: String::new(),
            progress: 40,
            team_size: 4,
            technologies: "Rust, Actix ,".into(),
            github: Some("https://github.com/dsc/portal".into()),
            demo: Some("  ".into()),
            details: String::new(),
        }
    }

    #[test]
    fn converts_to_payload() {
        let form = form().normalized();
        assert!(form.validate().is_ok());
        let project = NewProject::from(form);
        assert_eq!(project.title, "DSC Portal");
        assert_eq!(project.description, "<p>Website</p>");
        assert_eq!(project.technologies, vec!["Rust", "Actix"]);
        assert_eq!(project.links.demo, None);
    }

    #[test]
    fn progress_is_bounded() {
        let form = ProjectForm {
            progress: 140,
            ..form()
        };
        assert!(form.normalized().validate().is_err());
    }
}
