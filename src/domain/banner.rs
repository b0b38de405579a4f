use serde::{Deserialize, Serialize};

use crate::domain::types::BannerId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Text fields sent alongside the uploaded image when saving a banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBanner {
    pub title: String,
    pub description: String,
    pub order: i32,
    pub active: bool,
}

impl NewBanner {
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("order", self.order.to_string()),
            ("active", self.active.to_string()),
        ]
    }
}

impl From<&Banner> for NewBanner {
    fn from(banner: &Banner) -> Self {
        Self {
            title: banner.title.clone(),
            description: banner.description.clone(),
            order: banner.order,
            active: banner.active,
        }
    }
}

/// Active banners in display order, as shown on the home page slider.
pub fn active_banners(mut banners: Vec<Banner>) -> Vec<Banner> {
    banners.retain(|b| b.active);
    banners.sort_by_key(|b| b.order);
    banners
}
