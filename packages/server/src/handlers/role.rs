use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{RoleDraft, RoleModal, StaffRole, fallback_roles, role_modal::validate_draft};
use tracing::{error, info, instrument, warn};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::role::UpdateRoleRequest;
use crate::state::AppState;

/// List staff roles.
///
/// Serves the built-in fallback roles whenever the live collection cannot be
/// read for configuration or credential reasons, so the dashboard always has
/// roles to offer.
#[utoipa::path(
    get,
    path = "/roles",
    tag = "Roles",
    operation_id = "listRoles",
    summary = "List staff roles",
    description = "Returns all staff roles ordered by creation time. Falls back to the built-in Administrator and Editor roles when the data service is not configured, rejects the service key, or cannot be reached.",
    responses(
        (status = 200, description = "Roles, live or fallback", body = Vec<StaffRole>),
        (status = 500, description = "The data service rejected the query (QUERY_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<StaffRole>>, AppError> {
    let Some(directory) = state.directory.as_deref() else {
        warn!("Data service is not configured, serving fallback roles");
        return Ok(Json(fallback_roles()));
    };

    match directory.list_roles().await {
        Ok(roles) => Ok(Json(roles)),
        Err(e) if e.is_credential_error() => {
            warn!(error = %e, "Data service rejected the service key, serving fallback roles");
            Ok(Json(fallback_roles()))
        }
        Err(e) if e.is_query_error() => {
            error!(error = %e, "Failed to fetch roles");
            Err(AppError::Query {
                message: e.to_string(),
                details: None,
            })
        }
        Err(e) => {
            error!(error = %e, "Unexpected failure fetching roles, serving fallback roles");
            Ok(Json(fallback_roles()))
        }
    }
}

/// Create a role from the add-role form.
#[utoipa::path(
    post,
    path = "/roles",
    tag = "Roles",
    operation_id = "createRole",
    summary = "Create a staff role",
    request_body = RoleDraft,
    responses(
        (status = 201, description = "Role created", body = StaffRole),
        (status = 400, description = "Invalid role (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Data service not configured or write failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state, draft), fields(name_en = %draft.name_en))]
pub async fn create_role(
    State(state): State<AppState>,
    AppJson(draft): AppJson<RoleDraft>,
) -> Result<impl IntoResponse, AppError> {
    validate_draft(&draft)?;
    let directory = state.directory()?;

    let role = RoleModal::add().submit(directory, &draft).await?;
    info!(role_id = %role.id, "Role created");

    Ok((StatusCode::CREATED, Json(role)))
}

/// Update a role from the edit-role form.
#[utoipa::path(
    patch,
    path = "/roles/{id}",
    tag = "Roles",
    operation_id = "updateRole",
    summary = "Update a staff role",
    description = "Applies the provided fields over the stored role. Absent fields are kept; `null` clears nullable fields.",
    params(("id" = String, Path, description = "Role ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = StaffRole),
        (status = 400, description = "Invalid role (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Role not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Data service not configured or write failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateRoleRequest>,
) -> Result<Json<StaffRole>, AppError> {
    let directory = state.directory()?;

    let role = directory
        .find_role(&id)
        .await
        .map_err(|e| AppError::from_rest(e, state.expose_details()))?
        .ok_or_else(|| AppError::NotFound(format!("Role '{}' not found", id)))?;

    let modal = RoleModal::edit(role);
    let draft = payload.apply(modal.initial_draft());
    let role = modal.submit(directory, &draft).await?;
    info!("Role updated");

    Ok(Json(role))
}
