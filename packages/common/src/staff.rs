use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::role::{RoleRef, StaffRole};
use crate::timestamp;

/// The role joined onto a staff member.
///
/// The data service returns a to-one join either as a bare object or as a
/// zero/one element array depending on how it infers cardinality. Decoding
/// collapses every shape into this enum:
///
/// * `null`, missing, `[]` => `Absent`
/// * `[role, ..]`          => `Single(role)` (first element)
/// * `role`                => `Single(role)`
///
/// It is serialized as the role object or `null`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleEmbed<R> {
    Absent,
    Single(R),
}

impl<R> RoleEmbed<R> {
    pub fn as_ref(&self) -> Option<&R> {
        match self {
            Self::Absent => None,
            Self::Single(role) => Some(role),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<R> Default for RoleEmbed<R> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<R> From<Option<R>> for RoleEmbed<R> {
    fn from(role: Option<R>) -> Self {
        role.map_or(Self::Absent, Self::Single)
    }
}

impl<'de, R> Deserialize<'de> for RoleEmbed<R>
where
    R: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Joined<R> {
            Many(Vec<R>),
            One(R),
        }

        Ok(match Option::<Joined<R>>::deserialize(deserializer)? {
            None => Self::Absent,
            Some(Joined::Many(roles)) => roles.into_iter().next().into(),
            Some(Joined::One(role)) => Self::Single(role),
        })
    }
}

impl<R> Serialize for RoleEmbed<R>
where
    R: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_ref().serialize(serializer)
    }
}

/// A staff member from the `staff_members` collection, with its role joined.
///
/// `R` is the shape of the joined role: the full [`StaffRole`] for the staff
/// list, a [`crate::RoleSummary`] for the email lookup.
///
/// Rows are passed through as stored: name and email columns may be `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct StaffMember<R = StaffRole> {
    #[schema(example = "6f1c2a9e-0d4b-4f3e-9a57-2b8c1e7d5a10")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Natural key used by the email lookup.
    #[serde(default)]
    #[schema(example = "priya@example.com")]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Identifier of the referenced role, back-filled from `role` when empty.
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    /// The joined role object, or `null` when the member has none.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub role: RoleEmbed<R>,
}

impl<R: RoleRef> StaffMember<R> {
    /// Back-fill `role_id` from the joined role.
    ///
    /// The stored `role_id` wins when present and non-empty; otherwise the
    /// joined role's id is used, otherwise it is `None`. Applying this to an
    /// already normalized record changes nothing.
    pub fn normalize(mut self) -> Self {
        let has_role_id = self.role_id.as_deref().is_some_and(|id| !id.is_empty());
        if !has_role_id {
            self.role_id = self.role.as_ref().map(|role| role.role_id().to_owned());
        }
        self
    }
}

fn default_active() -> bool {
    true
}
