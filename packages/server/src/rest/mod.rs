//! Access to the hosted database through its REST layer.

mod client;
mod error;

pub use client::{RestClient, TableQuery};
pub use error::RestError;
