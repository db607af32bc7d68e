pub mod model;
pub mod repository;

pub use model::{validate_code, DiscountCode, MAX_CODE_LEN};
pub use repository::DiscountRepository;
