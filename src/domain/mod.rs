pub mod discount;
pub mod parking_lot;
pub mod parking_session;
pub mod payment;
pub mod principal;
pub mod repositories;
pub mod reservation;
pub mod user;
pub mod vehicle;

// Re-export commonly used types
pub use discount::DiscountCode;
pub use parking_lot::ParkingLot;
pub use parking_session::{ParkingSession, PaymentStatus};
pub use payment::Payment;
pub use principal::{Principal, Role};
pub use repositories::RepositoryProvider;
pub use reservation::{Reservation, ReservationStatus};
pub use user::User;
pub use vehicle::Vehicle;

pub use crate::shared::{DomainError, DomainResult};
