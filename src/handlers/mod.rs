//! HTTP handlers for users and bikes.

pub mod bikes;
pub mod users;
pub use bikes::*;
pub use users::*;
