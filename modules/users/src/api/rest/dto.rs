use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::contract::model::{NewUser, User};

/// REST DTO for user representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserReq {
    #[serde(default)]
    pub id: Option<u64>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "must be a well-formed email address"))]
    pub email: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            id: req.id,
            username: req.username,
            email: req.email,
        }
    }
}
