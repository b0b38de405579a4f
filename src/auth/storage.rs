//! Durable key/value storage backing the login session.

use std::collections::HashMap;

use actix_session::Session as CookieSession;
use thiserror::Error;

use crate::domain::auth::{Session, User};

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to store {key}: {message}")]
    Write { key: String, message: String },
}

/// String storage keyed by name, modelled after browser local storage.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str);
}

/// Storage kept in the signed session cookie.
#[derive(Clone)]
pub struct CookieSessionStorage {
    session: CookieSession,
}

impl CookieSessionStorage {
    pub fn new(session: CookieSession) -> Self {
        Self { session }
    }
}

impl SessionStorage for CookieSessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.session.get::<String>(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to read session key {key}: {err}");
                None
            }
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.session
            .insert(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                message: err.to_string(),
            })
    }

    fn remove_item(&mut self, key: &str) {
        self.session.remove(key);
    }
}

/// In-process storage, used where no cookie session is available.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStorage {
    items: HashMap<String, String>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Reads the persisted session.
///
/// Nothing is restored unless all three keys are present. A profile that no
/// longer parses is removed from storage while the tokens are kept.
pub fn load_session<S: SessionStorage + ?Sized>(storage: &mut S) -> Session {
    let (Some(token), Some(refresh_token), Some(raw_user)) = (
        storage.get_item(TOKEN_KEY),
        storage.get_item(REFRESH_TOKEN_KEY),
        storage.get_item(USER_KEY),
    ) else {
        return Session::default();
    };

    let user = match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Some(user),
        Err(err) => {
            log::warn!("Discarding stored user: {err}");
            storage.remove_item(USER_KEY);
            None
        }
    };

    Session {
        user,
        access_token: Some(token),
        refresh_token: Some(refresh_token),
    }
}

/// Writes every part of the session, overwriting what was stored before.
pub fn store_session<S: SessionStorage + ?Sized>(
    storage: &mut S,
    access_token: &str,
    refresh_token: &str,
    user: &User,
) -> Result<(), StorageError> {
    let raw_user = serde_json::to_string(user).map_err(|err| StorageError::Write {
        key: USER_KEY.to_string(),
        message: err.to_string(),
    })?;
    storage.set_item(TOKEN_KEY, access_token)?;
    storage.set_item(REFRESH_TOKEN_KEY, refresh_token)?;
    storage.set_item(USER_KEY, &raw_user)
}

pub fn clear_session<S: SessionStorage + ?Sized>(storage: &mut S) {
    storage.remove_item(TOKEN_KEY);
    storage.remove_item(REFRESH_TOKEN_KEY);
    storage.remove_item(USER_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UserId;

    fn admin() -> User {
        User {
            id: UserId::new(1).unwrap(),
            username: "admin".into(),
            role: "admin".into(),
        }
    }

    #[test]
    fn stored_session_is_loaded_back() {
        let mut storage = MemorySessionStorage::new();
        store_session(&mut storage, "access", "refresh", &admin()).unwrap();

        let session = load_session(&mut storage);
        assert_eq!(session, Session::new("access".into(), "refresh".into(), admin()));
    }

    #[test]
    fn partial_storage_restores_nothing() {
        let mut storage = MemorySessionStorage::new();
        storage.set_item(TOKEN_KEY, "access").unwrap();
        storage.set_item(USER_KEY, r#"{"id":1,"username":"a","role":"admin"}"#).unwrap();

        assert_eq!(load_session(&mut storage), Session::default());
    }

    #[test]
    fn corrupted_user_is_dropped_and_tokens_kept() {
        let mut storage = MemorySessionStorage::new();
        storage.set_item(TOKEN_KEY, "access").unwrap();
        storage.set_item(REFRESH_TOKEN_KEY, "refresh").unwrap();
        storage.set_item(USER_KEY, "{not json").unwrap();

        let session = load_session(&mut storage);
        assert_eq!(session.user, None);
        assert_eq!(session.access_token.as_deref(), Some("access"));
        assert!(session.is_authenticated());
        assert_eq!(storage.get_item(USER_KEY), None);
        assert_eq!(storage.get_item(REFRESH_TOKEN_KEY).as_deref(), Some("refresh"));
    }

    #[test]
    fn clear_removes_all_keys() {
        let mut storage = MemorySessionStorage::new();
        store_session(&mut storage, "a", "r", &admin()).unwrap();
        clear_session(&mut storage);
        assert!(storage.is_empty());
    }
}
