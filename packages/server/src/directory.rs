use async_trait::async_trait;
use common::{RoleDraft, RoleStore, RoleSummary, StaffMember, StaffRole, StoreError};

use crate::rest::{RestClient, RestError};

pub const ROLES_TABLE: &str = "staff_roles";
pub const STAFF_TABLE: &str = "staff_members";

/// Role fields joined onto a staff member by the email lookup.
const LOOKUP_SELECT: &str = "*, role:staff_roles(id, name_en, name_hi, permissions)";
/// Full role relation joined onto every staff member in the list.
const LIST_SELECT: &str = "*, role:staff_roles(*)";

/// Read access to staff and roles, plus role writes through [`RoleStore`].
///
/// Staff records come back normalized: `role` is a single object or absent and
/// `role_id` is back-filled from it.
#[async_trait]
pub trait StaffDirectory: RoleStore {
    /// All roles, oldest first.
    async fn list_roles(&self) -> Result<Vec<StaffRole>, RestError>;

    async fn find_role(&self, id: &str) -> Result<Option<StaffRole>, RestError>;

    /// The staff member whose email matches exactly, with a role summary.
    async fn find_staff_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StaffMember<RoleSummary>>, RestError>;

    /// All staff members, newest first, with the full role joined.
    async fn list_staff(&self) -> Result<Vec<StaffMember>, RestError>;
}

#[async_trait]
impl StaffDirectory for RestClient {
    async fn list_roles(&self) -> Result<Vec<StaffRole>, RestError> {
        self.table(ROLES_TABLE)
            .select("*")
            .order("created_at", true)
            .fetch()
            .await
    }

    async fn find_role(&self, id: &str) -> Result<Option<StaffRole>, RestError> {
        self.table(ROLES_TABLE)
            .select("*")
            .eq("id", id)
            .maybe_single()
            .await
    }

    async fn find_staff_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StaffMember<RoleSummary>>, RestError> {
        let member: Option<StaffMember<RoleSummary>> = self
            .table(STAFF_TABLE)
            .select(LOOKUP_SELECT)
            .eq("email", email)
            .maybe_single()
            .await?;
        Ok(member.map(StaffMember::normalize))
    }

    async fn list_staff(&self) -> Result<Vec<StaffMember>, RestError> {
        let members: Vec<StaffMember> = self
            .table(STAFF_TABLE)
            .select(LIST_SELECT)
            .order("created_at", false)
            .fetch()
            .await?;
        Ok(members.into_iter().map(StaffMember::normalize).collect())
    }
}

#[async_trait]
impl RoleStore for RestClient {
    async fn insert_role(&self, draft: &RoleDraft) -> Result<StaffRole, StoreError> {
        let mut rows: Vec<StaffRole> = self.table(ROLES_TABLE).insert(draft).await?;
        rows.pop()
            .ok_or_else(|| RestError::NotFound("Inserted role".into()).into())
    }

    async fn update_role(
        &self,
        id: &str,
        draft: &RoleDraft,
    ) -> Result<Option<StaffRole>, StoreError> {
        let mut rows: Vec<StaffRole> = self.table(ROLES_TABLE).eq("id", id).update(draft).await?;
        Ok(rows.pop())
    }
}
