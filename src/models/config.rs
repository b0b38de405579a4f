//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Base URL of the REST API.
    pub api_url: String,
    /// Host serving uploaded images and files; relative media paths are
    /// resolved against it.
    pub upload_url: String,
    /// Shown for members without an avatar.
    pub default_avatar: String,
    pub registration_relay_url: String,
    pub contact_relay_url: String,
}
