//! Card presenting one packing suggestion with like/dislike controls.
//!
//! The card holds no state of its own. `render` is a pure function of the
//! suggestion, and `press` forwards the user's intent to the caller's callbacks
//! without debouncing or disabling anything.

use crate::models::Suggestion;
use crate::ui::view::{Control, TextStyle, View};

pub struct SuggestionCard<'a, L, D>
where
    L: Fn(),
    D: Fn(),
{
    suggestion: &'a Suggestion,
    on_like: L,
    on_dislike: D,
}

impl<'a, L, D> SuggestionCard<'a, L, D>
where
    L: Fn(),
    D: Fn(),
{
    pub fn new(suggestion: &'a Suggestion, on_like: L, on_dislike: D) -> Self {
        Self {
            suggestion,
            on_like,
            on_dislike,
        }
    }

    pub fn render(&self) -> View {
        let suggestion = self.suggestion;

        let mut children = vec![
            View::Image {
                uri: suggestion.image_url.clone(),
            },
            View::Text {
                style: TextStyle::Title,
                content: suggestion.name.clone(),
            },
        ];

        if let Some(reason) = &suggestion.reason {
            children.push(View::Text {
                style: TextStyle::Caption,
                content: reason.clone(),
            });
        }

        children.push(View::Row {
            children: vec![
                View::Button {
                    label: "Like".to_string(),
                    control: Control::Like,
                },
                View::Button {
                    label: "Dislike".to_string(),
                    control: Control::Dislike,
                },
            ],
        });

        View::Card { children }
    }

    /// Called once per tap.
    pub fn press(&self, control: Control) {
        tracing::trace!(suggestion_id = %self.suggestion.id, ?control, "suggestion card pressed");
        match control {
            Control::Like => (self.on_like)(),
            Control::Dislike => (self.on_dislike)(),
        }
    }
}
