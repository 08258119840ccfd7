use axum::{
    Json,
    extract::{Query, State},
};
use tracing::{error, instrument};

use crate::error::{AppError, ErrorBody};
use crate::models::staff::{StaffListResponse, StaffLookupParams, StaffLookupResponse};
use crate::state::AppState;

/// Look up one staff member by email.
#[utoipa::path(
    get,
    path = "/staff",
    tag = "Staff",
    operation_id = "getStaffByEmail",
    summary = "Get a staff member by email",
    description = "Returns the staff member whose email matches exactly, with their role name and permissions.",
    params(StaffLookupParams),
    responses(
        (status = 200, description = "Staff member found", body = StaffLookupResponse),
        (status = 400, description = "Email is missing (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "No staff member with that email (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Data service not configured or query failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state, params))]
pub async fn get_staff(
    State(state): State<AppState>,
    Query(params): Query<StaffLookupParams>,
) -> Result<Json<StaffLookupResponse>, AppError> {
    let email = params
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("Email is required".into()))?;

    let directory = state.directory()?;

    let staff = directory
        .find_staff_by_email(&email)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch staff member");
            AppError::from_rest(e, state.expose_details())
        })?
        .ok_or_else(|| AppError::NotFound("Staff member not found".into()))?;

    Ok(Json(StaffLookupResponse { staff }))
}

/// List every staff member with their role.
#[utoipa::path(
    get,
    path = "/staff-list",
    tag = "Staff",
    operation_id = "listStaff",
    summary = "List staff members",
    description = "Returns all staff members, newest first. Each record embeds its role as a single object (or null) and carries a `role_id` back-filled from that role when the stored value is empty.",
    responses(
        (status = 200, description = "Staff members", body = StaffListResponse),
        (status = 500, description = "Data service not configured or query failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_staff(State(state): State<AppState>) -> Result<Json<StaffListResponse>, AppError> {
    let directory = state.directory()?;

    let staff = directory.list_staff().await.map_err(|e| {
        error!(error = %e, "Failed to fetch staff list");
        AppError::from_rest(e, state.expose_details())
    })?;

    Ok(Json(StaffListResponse { staff }))
}
