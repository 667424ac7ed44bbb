use jsonapi_core::FilterParameters;
use tracing::{debug, info};

use crate::contract::model::{NewUser, User};
use crate::domain::error::DomainError;
use crate::domain::store::UserStore;

/// Attributes of [`User`] that `filter[...]` parameters can target.
pub const FILTERABLE_ATTRIBUTES: [&str; 2] = ["username", "email"];

/// Domain service over an owned [`UserStore`].
#[derive(Debug, Default)]
pub struct Service {
    store: UserStore,
}

impl Service {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    pub fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!(
            username = %new_user.username,
            email = new_user.email.as_deref().unwrap_or(""),
            "Create user"
        );
        self.store.insert(new_user)
    }

    pub fn get_user(&self, id: u64) -> Result<User, DomainError> {
        self.store
            .get(id)
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// Users matching every filter on a filterable attribute; filters on any
    /// other attribute are ignored.
    pub fn list_users(&self, filters: &FilterParameters) -> Vec<User> {
        let users = self.store.list(|user| matches_filters(user, filters));
        debug!(filters = filters.len(), found = users.len(), "Listed users");
        users
    }
}

fn attribute<'a>(user: &'a User, name: &str) -> Option<&'a str> {
    match name {
        "username" => Some(user.username.as_str()),
        "email" => user.email.as_deref(),
        _ => None,
    }
}

/// Within one operator any value may match; across operators and attributes
/// all must. A user without the attribute (no email) never matches it.
fn matches_filters(user: &User, filters: &FilterParameters) -> bool {
    filters
        .iter()
        .filter(|(name, _)| FILTERABLE_ATTRIBUTES.contains(name))
        .all(|(name, operators)| {
            let Some(candidate) = attribute(user, name) else {
                return false;
            };
            operators
                .iter()
                .all(|(op, values)| values.iter().any(|v| op.matches(candidate, v)))
        })
}
