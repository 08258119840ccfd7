pub mod role;
pub mod shared;
pub mod staff;
