//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Repository port for user lookups.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user (registration and profile updates).
    async fn store(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
