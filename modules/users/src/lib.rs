//! In-memory user collection exposed at `/users`.
//!
//! The collection is an explicit [`UserStore`](domain::store::UserStore)
//! owned by a [`Service`](domain::service::Service); the REST layer receives
//! the service through an axum `Extension`.

pub mod contract {
    pub mod model;
}

pub mod domain {
    pub mod error;
    pub mod service;
    pub mod store;
}

pub mod api {
    pub mod rest {
        pub mod dto;
        pub mod error;
        pub mod handlers;
        pub mod routes;
    }
}

pub mod config;
pub mod seed;

pub use config::UsersConfig;
pub use contract::model::{NewUser, User};
pub use domain::error::DomainError;
pub use domain::service::Service;

/// Name of this module's entry in the `modules` configuration bag.
pub const MODULE_NAME: &str = "users";
