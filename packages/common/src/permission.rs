//! Capability tags carried by staff roles.

/// Full access. A role holding this tag is granted every other capability.
pub const ADMIN: &str = "admin";
pub const CONTENT_MANAGEMENT: &str = "content_management";
pub const BOOKING_MANAGEMENT: &str = "booking_management";
pub const STAFF_MANAGEMENT: &str = "staff_management";
pub const SETTINGS_MANAGEMENT: &str = "settings_management";

/// Every tag the admin panel knows how to enforce.
pub const ALL: &[&str] = &[
    ADMIN,
    CONTENT_MANAGEMENT,
    BOOKING_MANAGEMENT,
    STAFF_MANAGEMENT,
    SETTINGS_MANAGEMENT,
];

/// Returns true if `tag` is well formed: non-empty, lowercase ASCII letters,
/// digits, `_` or `:`.
///
/// Unknown but well-formed tags are accepted so the database can introduce
/// capabilities before the panel enforces them.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == ':')
}
