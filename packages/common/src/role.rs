use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{permission, timestamp};

/// Identifier of the fallback administrator role.
pub const FALLBACK_ADMIN_ID: &str = "default-admin";
/// Identifier of the fallback editor role.
pub const FALLBACK_EDITOR_ID: &str = "default-editor";

/// A staff role as stored in the `staff_roles` collection.
///
/// `permissions` is a set: order and duplicates in the stored array carry no
/// meaning, and it is always serialized sorted and de-duplicated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StaffRole {
    /// Unique role identifier.
    #[schema(example = "default-admin")]
    pub id: String,
    /// English display name.
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(example = "Administrator")]
    pub name_en: String,
    /// Hindi display name.
    #[serde(default)]
    #[schema(example = "प्रशासक")]
    pub name_hi: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub description_hi: Option<String>,
    /// Capability tags granted by this role.
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(example = json!(["admin", "content_management"]))]
    pub permissions: BTreeSet<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The role fields joined onto a staff member by the email lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoleSummary {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(default)]
    pub name_hi: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: BTreeSet<String>,
}

/// Anything that can be embedded as a staff member's role.
pub trait RoleRef {
    fn role_id(&self) -> &str;
}

impl RoleRef for StaffRole {
    fn role_id(&self) -> &str {
        &self.id
    }
}

impl RoleRef for RoleSummary {
    fn role_id(&self) -> &str {
        &self.id
    }
}

/// Editable role fields, as submitted from the role modal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoleDraft {
    #[schema(example = "Editor")]
    pub name_en: String,
    #[serde(default)]
    #[schema(example = "संपादक")]
    pub name_hi: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub description_hi: Option<String>,
    #[serde(default)]
    #[schema(example = json!(["content_management"]))]
    pub permissions: BTreeSet<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Default for RoleDraft {
    fn default() -> Self {
        Self {
            name_en: String::new(),
            name_hi: None,
            description_en: None,
            description_hi: None,
            permissions: BTreeSet::new(),
            is_active: true,
        }
    }
}

impl RoleDraft {
    /// The draft with surrounding whitespace removed from its text fields.
    /// Optional fields left blank become `None`.
    pub fn trimmed(&self) -> Self {
        Self {
            name_en: self.name_en.trim().to_string(),
            name_hi: trim_optional(&self.name_hi),
            description_en: trim_optional(&self.description_en),
            description_hi: trim_optional(&self.description_hi),
            permissions: self.permissions.clone(),
            is_active: self.is_active,
        }
    }
}

fn trim_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl From<&StaffRole> for RoleDraft {
    fn from(role: &StaffRole) -> Self {
        Self {
            name_en: role.name_en.clone(),
            name_hi: role.name_hi.clone(),
            description_en: role.description_en.clone(),
            description_hi: role.description_hi.clone(),
            permissions: role.permissions.clone(),
            is_active: role.is_active,
        }
    }
}

/// Roles served when the live role collection cannot be read.
pub fn fallback_roles() -> Vec<StaffRole> {
    let now = Utc::now();
    vec![
        StaffRole {
            id: FALLBACK_ADMIN_ID.into(),
            name_en: "Administrator".into(),
            name_hi: Some("प्रशासक".into()),
            description_en: Some("Full access to all features".into()),
            description_hi: Some("सभी सुविधाओं तक पूर्ण पहुंच".into()),
            permissions: tags(permission::ALL),
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        },
        StaffRole {
            id: FALLBACK_EDITOR_ID.into(),
            name_en: "Editor".into(),
            name_hi: Some("संपादक".into()),
            description_en: Some("Can manage site content".into()),
            description_hi: Some("साइट सामग्री का प्रबंधन कर सकते हैं".into()),
            permissions: tags(&[permission::CONTENT_MANAGEMENT]),
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        },
    ]
}

fn tags(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|t| t.to_string()).collect()
}

fn default_active() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
