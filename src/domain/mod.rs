//! Domain records exposed by the portal's service layer.

pub mod auth;
pub mod banner;
pub mod contact;
pub mod document;
pub mod event;
pub mod member;
pub mod project;
pub mod registration;
pub mod types;
pub mod wizard;
