//! Forms posted by the admin console.

pub mod banners;
pub mod documents;
pub mod events;
pub mod members;
pub mod projects;

use serde::Deserialize;

/// Body of the activate/deactivate switches on banners and documents.
#[derive(Debug, Deserialize)]
pub struct ToggleActiveForm {
    #[serde(default)]
    pub active: bool,
}
