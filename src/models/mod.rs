//! Domain models exchanged with the casafind API.

pub mod reservation;
pub mod user;

pub use reservation::Reservation;
pub use user::UserProfile;
