use uuid::Uuid;

use super::error::AuthError;
use crate::database::UserRecord;

/// A resource carrying the id of the user allowed to modify it.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// Accounts are owned by themselves: a user may only update or delete their own record.
impl Owned for UserRecord {
    fn owner_id(&self) -> Uuid {
        self.id
    }
}

/// Permit a mutating operation only when `actor` owns the target.
pub fn ensure_owner(actor: &UserRecord, owner_id: Uuid) -> Result<(), AuthError> {
    if actor.id == owner_id {
        Ok(())
    } else {
        tracing::warn!(
            "Ownership check failed: user {} acting on resource owned by {}",
            actor.id,
            owner_id
        );
        Err(AuthError::Forbidden)
    }
}

pub fn ensure_can_modify<R: Owned + ?Sized>(
    actor: &UserRecord,
    resource: &R,
) -> Result<(), AuthError> {
    ensure_owner(actor, resource.owner_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Todo {
        user_id: Uuid,
    }

    impl Owned for Todo {
        fn owner_id(&self) -> Uuid {
            self.user_id
        }
    }

    #[test]
    fn owner_may_modify_own_resource() {
        let alice = UserRecord::new("alice", "alice@test.com", "digest");
        let todo = Todo { user_id: alice.id };

        assert!(ensure_can_modify(&alice, &todo).is_ok());
        assert!(ensure_owner(&alice, alice.id).is_ok());
    }

    #[test]
    fn other_user_is_forbidden() {
        let alice = UserRecord::new("alice", "alice@test.com", "digest");
        let bob = UserRecord::new("bob", "bob@test.com", "digest");
        let todo = Todo { user_id: bob.id };

        assert!(matches!(ensure_can_modify(&alice, &todo), Err(AuthError::Forbidden)));
        assert!(matches!(ensure_owner(&alice, bob.id), Err(AuthError::Forbidden)));
    }

    #[test]
    fn user_may_only_modify_own_account() {
        let alice = UserRecord::new("alice", "alice@test.com", "digest");
        let bob = UserRecord::new("bob", "bob@test.com", "digest");

        assert!(ensure_can_modify(&alice, &alice).is_ok());
        assert!(matches!(ensure_can_modify(&alice, &bob), Err(AuthError::Forbidden)));
    }
}
