//! Ownership policy shared by every resource that belongs to an account.

use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Only the owner of a resource may act on it.
pub fn authorize(caller_id: Uuid, resource_owner_id: Uuid) -> Access {
    if caller_id == resource_owner_id {
        Access::Allow
    } else {
        Access::Deny
    }
}

impl Access {
    /// Turns a denial into `Forbidden`, naming the resource in the message.
    pub fn require(self, resource: &str) -> Result<(), AppError> {
        match self {
            Access::Allow => Ok(()),
            Access::Deny => Err(AppError::Forbidden(format!(
                "Not allowed to modify this {resource}"
            ))),
        }
    }
}
