use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::ClientError;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";
pub const AVATAR_KEY: &str = "profileImage";
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";

/// Every key the session owns, in write order. The flag goes last so a torn
/// write never reads back as authenticated.
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, USERNAME_KEY, AVATAR_KEY, AUTHENTICATED_KEY];

/// Durable string key/value storage that survives reloads.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

/// In-process storage. Clones share the same entries, so a second store built
/// over a clone sees what the first one persisted (a "reload").
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(b.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        b.remove(TOKEN_KEY).unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove(USERNAME_KEY).is_ok());
        assert_eq!(storage.len(), 0);
    }
}
