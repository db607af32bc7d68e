pub mod model;
pub mod repository;

pub use model::ParkingLot;
pub use repository::ParkingLotRepository;
