//! Infrastructure layer: persistence implementations of the domain
//! repository interfaces.

pub mod database;
pub mod storage;
