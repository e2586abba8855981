//! Capability checks for privileged operations.
//!
//! Admin-only operations call [`ensure_admin`] before doing anything else.
//! The HTTP layer also runs the same check in its `RequireAdmin` extractor,
//! so a handler body is never entered for a non-admin identity.

use crate::error::CoreError;
use crate::types::DbId;

/// An authenticated identity as seen by domain operations.
pub trait Principal {
    fn user_id(&self) -> DbId;
    fn is_admin(&self) -> bool;
}

/// Reject non-admin identities with [`CoreError::Forbidden`].
pub fn ensure_admin<P: Principal + ?Sized>(principal: &P) -> Result<(), CoreError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Admin access required".into()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    struct Fixed {
        id: DbId,
        admin: bool,
    }

    impl Principal for Fixed {
        fn user_id(&self) -> DbId {
            self.id
        }
        fn is_admin(&self) -> bool {
            self.admin
        }
    }

    #[test]
    fn admin_passes() {
        assert!(ensure_admin(&Fixed { id: 1, admin: true }).is_ok());
    }

    #[test]
    fn non_admin_is_forbidden() {
        assert_matches!(
            ensure_admin(&Fixed { id: 2, admin: false }),
            Err(CoreError::Forbidden(_))
        );
    }
}
