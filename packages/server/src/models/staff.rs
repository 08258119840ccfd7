use common::{RoleSummary, StaffMember};
use serde::{Deserialize, Serialize};

/// Query parameters for the staff lookup.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StaffLookupParams {
    /// Exact email address of the staff member.
    pub email: Option<String>,
}

/// A single staff member with a summary of their role.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StaffLookupResponse {
    pub staff: StaffMember<RoleSummary>,
}

/// Every staff member with the full role embedded.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StaffListResponse {
    pub staff: Vec<StaffMember>,
}
