//! Capability checks at the service boundary

use crate::contract::{AuthContext, Capability, NoticeError};

/// Answers "can the current caller do X"
pub trait Authorizer: Send + Sync {
    fn can(&self, ctx: &AuthContext, capability: Capability) -> bool;
}

/// Grants exactly the capabilities attached to the caller's context.
///
/// `manage_options` implies `edit_posts`, mirroring an administrator role that
/// can also edit content.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityAuthorizer;

impl Authorizer for CapabilityAuthorizer {
    fn can(&self, ctx: &AuthContext, capability: Capability) -> bool {
        if !ctx.is_authenticated() {
            return false;
        }

        match capability {
            Capability::EditPosts => {
                ctx.capabilities.contains(&Capability::EditPosts)
                    || ctx.capabilities.contains(&Capability::ManageOptions)
            }
            Capability::ManageOptions => ctx.capabilities.contains(&Capability::ManageOptions),
        }
    }
}

/// Fail with `Unauthorized` for anonymous callers and `Forbidden` for callers
/// without the capability
pub fn require(
    authorizer: &dyn Authorizer,
    ctx: &AuthContext,
    capability: Capability,
) -> Result<(), NoticeError> {
    if !ctx.is_authenticated() {
        return Err(NoticeError::Unauthorized);
    }

    if !authorizer.can(ctx, capability) {
        tracing::warn!(
            user_id = ctx.nonce_subject(),
            capability = %capability,
            "access denied"
        );
        return Err(NoticeError::Forbidden { capability });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_unauthorized() {
        let result = require(&CapabilityAuthorizer, &AuthContext::anonymous(), Capability::EditPosts);
        assert_eq!(result, Err(NoticeError::Unauthorized));
    }

    #[test]
    fn test_editor_cannot_manage_options() {
        let editor = AuthContext::user("editor", [Capability::EditPosts]);
        assert!(require(&CapabilityAuthorizer, &editor, Capability::EditPosts).is_ok());
        assert_eq!(
            require(&CapabilityAuthorizer, &editor, Capability::ManageOptions),
            Err(NoticeError::Forbidden {
                capability: Capability::ManageOptions
            })
        );
    }

    #[test]
    fn test_admin_can_edit_posts() {
        let admin = AuthContext::user("admin", [Capability::ManageOptions]);
        assert!(CapabilityAuthorizer.can(&admin, Capability::EditPosts));
        assert!(CapabilityAuthorizer.can(&admin, Capability::ManageOptions));
    }

    #[test]
    fn test_user_without_capabilities() {
        let nobody = AuthContext::user("subscriber", Vec::<Capability>::new());
        assert!(!CapabilityAuthorizer.can(&nobody, Capability::EditPosts));
    }
}
