pub mod packing_histories;
pub mod users;

pub use packing_histories::*;
pub use users::*;
