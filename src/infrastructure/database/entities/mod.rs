//! Database entities module

pub mod discount_code;
pub mod parking_lot;
pub mod parking_session;
pub mod payment;
pub mod reservation;
pub mod user;
pub mod vehicle;

pub use discount_code::Entity as DiscountCode;
pub use parking_lot::Entity as ParkingLot;
pub use parking_session::Entity as ParkingSession;
pub use payment::Entity as Payment;
pub use reservation::Entity as Reservation;
pub use user::Entity as User;
pub use vehicle::Entity as Vehicle;
