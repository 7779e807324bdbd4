//! Records and request bodies for the two resources.

mod bike;
mod user;

pub use bike::{parse_availability, Bike, BikeState, BikeStatusUpdate, NewBike, UNASSIGNED};
pub use user::{User, UserInput};
