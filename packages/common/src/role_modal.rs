use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::permission;
use crate::role::{RoleDraft, StaffRole};

/// Maximum length, in characters, of a role display name.
pub const MAX_NAME_CHARS: usize = 100;

/// Error type returned by [`RoleStore`] implementations.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Write access to the role collection.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Create a role from `draft` and return the stored record.
    async fn insert_role(&self, draft: &RoleDraft) -> Result<StaffRole, StoreError>;

    /// Overwrite the editable fields of role `id` and return the stored
    /// record, or `None` when no role has that id.
    async fn update_role(
        &self,
        id: &str,
        draft: &RoleDraft,
    ) -> Result<Option<StaffRole>, StoreError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalMode {
    Add,
    Edit,
}

/// Why a role submission did not produce a stored role.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The draft was rejected before anything was written.
    #[error("{0}")]
    Invalid(String),
    /// The role being edited no longer exists.
    #[error("Role '{0}' not found")]
    NotFound(String),
    /// The store refused or failed the write.
    #[error("Failed to save role: {0}")]
    Store(String),
}

/// The add/edit role form.
///
/// Holds no state beyond its mode and, in edit mode, the role being edited.
/// The role is kept exactly as given; [`RoleModal::role`] hands back the same
/// value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleModal {
    mode: ModalMode,
    role: Option<StaffRole>,
}

impl RoleModal {
    pub fn add() -> Self {
        Self {
            mode: ModalMode::Add,
            role: None,
        }
    }

    pub fn edit(role: StaffRole) -> Self {
        Self {
            mode: ModalMode::Edit,
            role: Some(role),
        }
    }

    pub fn mode(&self) -> ModalMode {
        self.mode
    }

    pub fn role(&self) -> Option<&StaffRole> {
        self.role.as_ref()
    }

    /// The form contents shown when the modal opens.
    pub fn initial_draft(&self) -> RoleDraft {
        self.role.as_ref().map(RoleDraft::from).unwrap_or_default()
    }

    /// Validate `draft` and write it through `store`.
    ///
    /// Text fields are trimmed before validation and the trimmed draft is
    /// what gets written. Add mode inserts a new role; edit mode updates the
    /// held role by id. Nothing is written when validation fails.
    pub async fn submit<S>(&self, store: &S, draft: &RoleDraft) -> Result<StaffRole, SubmitError>
    where
        S: RoleStore + ?Sized,
    {
        let draft = draft.trimmed();
        validate_draft(&draft)?;

        match (&self.mode, &self.role) {
            (ModalMode::Edit, Some(role)) => store
                .update_role(&role.id, &draft)
                .await
                .map_err(|e| SubmitError::Store(e.to_string()))?
                .ok_or_else(|| SubmitError::NotFound(role.id.clone())),
            _ => store
                .insert_role(&draft)
                .await
                .map_err(|e| SubmitError::Store(e.to_string())),
        }
    }

    /// Dismiss the modal, returning the untouched role in edit mode.
    pub fn close(self) -> Option<StaffRole> {
        self.role
    }
}

/// Check a draft against the role form rules.
pub fn validate_draft(draft: &RoleDraft) -> Result<(), SubmitError> {
    let name_en = draft.name_en.trim();
    if name_en.is_empty() || name_en.chars().count() > MAX_NAME_CHARS {
        return Err(SubmitError::Invalid(format!(
            "English name must be 1-{MAX_NAME_CHARS} characters"
        )));
    }
    if let Some(name_hi) = &draft.name_hi
        && name_hi.trim().chars().count() > MAX_NAME_CHARS
    {
        return Err(SubmitError::Invalid(format!(
            "Hindi name must be at most {MAX_NAME_CHARS} characters"
        )));
    }
    if draft.permissions.is_empty() {
        return Err(SubmitError::Invalid(
            "A role must grant at least one permission".into(),
        ));
    }
    if let Some(bad) = draft
        .permissions
        .iter()
        .find(|tag| !permission::is_valid_tag(tag))
    {
        return Err(SubmitError::Invalid(format!(
            "Invalid permission tag '{bad}'"
        )));
    }
    Ok(())
}
