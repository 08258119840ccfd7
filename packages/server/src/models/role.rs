use std::collections::BTreeSet;

use common::RoleDraft;
use serde::Deserialize;

use super::shared::double_option;

/// Request body for a partial role update. Absent fields keep their value.
#[derive(Deserialize, Default, PartialEq, Debug, utoipa::ToSchema)]
pub struct UpdateRoleRequest {
    #[schema(example = "Senior Editor")]
    pub name_en: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name_hi: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description_hi: Option<Option<String>>,
    #[schema(example = json!(["content_management", "booking_management"]))]
    pub permissions: Option<BTreeSet<String>>,
    pub is_active: Option<bool>,
}

impl UpdateRoleRequest {
    /// Overlay the provided fields on `draft`.
    pub fn apply(self, mut draft: RoleDraft) -> RoleDraft {
        if let Some(name_en) = self.name_en {
            draft.name_en = name_en;
        }
        if let Some(name_hi) = self.name_hi {
            draft.name_hi = name_hi;
        }
        if let Some(description_en) = self.description_en {
            draft.description_en = description_en;
        }
        if let Some(description_hi) = self.description_hi {
            draft.description_hi = description_hi;
        }
        if let Some(permissions) = self.permissions {
            draft.permissions = permissions;
        }
        if let Some(is_active) = self.is_active {
            draft.is_active = is_active;
        }
        draft
    }
}
