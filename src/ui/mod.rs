pub mod suggestion_card;
pub mod view;

pub use suggestion_card::SuggestionCard;
pub use view::{Control, TextStyle, View};
