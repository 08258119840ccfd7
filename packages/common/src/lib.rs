pub mod admin_page;
pub mod permission;
pub mod role;
pub mod role_modal;
pub mod staff;
pub mod timestamp;

pub use admin_page::AdminPage;
pub use role::{RoleDraft, RoleRef, RoleSummary, StaffRole, fallback_roles};
pub use role_modal::{ModalMode, RoleModal, RoleStore, StoreError, SubmitError};
pub use staff::{RoleEmbed, StaffMember};
