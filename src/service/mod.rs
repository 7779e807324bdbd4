//! Persistence services: one method per operation, typed records in and out.

mod bikes;
mod users;
mod validation;
pub use bikes::BikeService;
pub use users::UserService;
pub use validation::RequestValidator;
