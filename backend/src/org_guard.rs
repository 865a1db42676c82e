//! Org-boundary validation for record creators.
//!
//! Resolving a profile only proves the caller exists, not that they belong to
//! the organization named in the request. Deployments that want that check
//! turn on `REQUIRE_ORG_MEMBERSHIP`; it is off by default.

use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    store::ProfileStore,
};

pub async fn verify_membership(
    profiles: &dyn ProfileStore,
    organization_id: Uuid,
    profile_id: Uuid,
) -> Result<()> {
    if !profiles.is_member(organization_id, profile_id).await? {
        tracing::warn!(
            %organization_id,
            %profile_id,
            "Rejected create from non-member profile"
        );
        return Err(AppError::Forbidden(
            "User is not a member of this organization".into(),
        ));
    }
    Ok(())
}
