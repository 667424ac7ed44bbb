use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::contract::model::{NewUser, User};
use crate::domain::error::DomainError;

/// Users keyed by id, plus the generator for ids the caller leaves out.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<BTreeMap<u64, User>>,
    next_id: AtomicU64,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `new_user`, rejecting a username that is already present.
    ///
    /// The uniqueness check and the write happen under the same lock. An
    /// explicit id replaces whatever user held it before; a generated id
    /// always skips ids already in use.
    pub fn insert(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write();
        if users.values().any(|u| u.username == new_user.username) {
            return Err(DomainError::username_taken(new_user.username));
        }

        let id = match new_user.id {
            Some(id) => id,
            None => loop {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                if !users.contains_key(&id) {
                    break id;
                }
            },
        };
        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    pub fn get(&self, id: u64) -> Option<User> {
        self.users.read().get(&id).cloned()
    }

    /// Every user satisfying `keep`, in id order.
    pub fn list<F>(&self, keep: F) -> Vec<User>
    where
        F: Fn(&User) -> bool,
    {
        self.users.read().values().filter(|u| keep(u)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}
