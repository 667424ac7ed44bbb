use anyhow::{Context, Result};
use tracing::info;

use crate::contract::model::NewUser;
use crate::domain::service::Service;

/// Create `user1..=userN`, each with a `userN@domain.com` address.
pub fn seed(service: &Service, count: u32) -> Result<()> {
    for i in 1..=count {
        let username = format!("user{i}");
        service
            .create_user(NewUser::new(&username).with_email(format!("{username}@domain.com")))
            .with_context(|| format!("Failed to seed user '{username}'"))?;
    }
    info!(count, "Seeded users");
    Ok(())
}
