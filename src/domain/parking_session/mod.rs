pub mod model;
pub mod repository;

pub use model::{normalize_plate, ParkingSession, PaymentStatus};
pub use repository::ParkingSessionRepository;
