pub mod role;
pub mod staff;
