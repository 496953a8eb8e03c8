pub mod packing_history;
pub mod suggestion;
pub mod user;

pub use packing_history::*;
pub use suggestion::*;
pub use user::*;
