pub mod packing_history_service;
pub mod user_service;

pub use packing_history_service::*;
pub use user_service::*;
