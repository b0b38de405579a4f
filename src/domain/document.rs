use serde::{Deserialize, Serialize};

use crate::domain::types::DocumentId;

/// Node of the static document category tree.
#[derive(Debug, Serialize)]
pub struct DocumentCategory {
    pub key: &'static str,
    pub title: &'static str,
    pub children: &'static [DocumentCategory],
}

const fn leaf(key: &'static str, title: &'static str) -> DocumentCategory {
    DocumentCategory {
        key,
        title,
        children: &[],
    }
}

pub const ALL_CATEGORIES: &str = "all";

pub static DOCUMENT_CATEGORIES: &[DocumentCategory] = &[
    leaf(ALL_CATEGORIES, "Tất cả"),
    DocumentCategory {
        key: "linux-devops",
        title: "Linux & DevOps",
        children: &[
            leaf("linux-os", "Hệ điều hành Linux"),
            leaf("shell-script", "Shell Script"),
            leaf("command-line", "Command Line"),
            leaf("system-admin", "System Administration"),
            leaf("network-admin", "Network Administration"),
            leaf("security", "Security"),
        ],
    },
    DocumentCategory {
        key: "container",
        title: "Container & Orchestration",
        children: &[
            leaf("docker", "Docker"),
            leaf("kubernetes", "Kubernetes"),
            leaf("docker-compose", "Docker Compose"),
            leaf("container-security", "Container Security"),
        ],
    },
    DocumentCategory {
        key: "cicd-vcs",
        title: "CI/CD & Version Control",
        children: &[
            leaf("git", "Git"),
            leaf("github", "GitHub"),
            leaf("gitlab-cicd", "GitLab CI/CD"),
            leaf("jenkins", "Jenkins"),
            leaf("github-actions", "GitHub Actions"),
        ],
    },
    DocumentCategory {
        key: "programming",
        title: "Lập trình",
        children: &[
            leaf("web", "Web Development"),
            leaf("mobile", "Mobile Development"),
            leaf("ai", "AI/ML"),
            leaf("backend", "Backend"),
            leaf("frontend", "Frontend"),
        ],
    },
    DocumentCategory {
        key: "database",
        title: "Cơ sở dữ liệu",
        children: &[
            leaf("sql", "SQL"),
            leaf("nosql", "NoSQL"),
            leaf("data-modeling", "Data Modeling"),
        ],
    },
    DocumentCategory {
        key: "study",
        title: "Tài liệu học tập",
        children: &[
            leaf("slides", "Slide"),
            leaf("exercises", "Bài tập"),
            leaf("exam-samples", "Đề thi mẫu"),
        ],
    },
];

/// Breadcrumb trail for the selected category key, rooted at "Tài liệu".
pub fn category_breadcrumbs(selected: &str) -> Vec<&'static str> {
    let mut crumbs = vec!["Tài liệu"];
    if selected == ALL_CATEGORIES {
        return crumbs;
    }
    for category in DOCUMENT_CATEGORIES {
        if category.key == selected {
            crumbs.push(category.title);
            break;
        }
        if let Some(sub) = category.children.iter().find(|c| c.key == selected) {
            crumbs.push(category.title);
            crumbs.push(sub.title);
            break;
        }
    }
    crumbs
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: String,
    #[serde(default)]
    pub upload_date: String,
    #[serde(default)]
    pub downloads: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Text fields sent alongside the uploaded file when saving a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
    pub description: String,
    pub category: String,
    pub sub_category: String,
    pub active: bool,
}

impl NewDocument {
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("category", self.category.clone()),
            ("subCategory", self.sub_category.clone()),
            ("active", self.active.to_string()),
        ]
    }
}

impl From<&Document> for NewDocument {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            description: doc.description.clone(),
            category: doc.category.clone(),
            sub_category: doc.sub_category.clone(),
            active: doc.active,
        }
    }
}

/// Patch bumping the public download counter.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct DownloadCount {
    pub downloads: u32,
}
