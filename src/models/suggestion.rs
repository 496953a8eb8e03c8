use serde::{Deserialize, Serialize};
use validator::Validate;

/// A packing item offered to the user. Produced elsewhere; this crate only renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    /// Rendering never checks this; callers may run `validate()` before handing it over.
    #[validate(url)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_is_optional_on_the_wire() {
        let json = r#"{"id":"7","name":"Sunscreen","image_url":"https://x/sun.png"}"#;
        let suggestion: Suggestion = serde_json::from_str(json).unwrap();
        assert!(suggestion.reason.is_none());
        assert!(suggestion.validate().is_ok());

        let back = serde_json::to_value(&suggestion).unwrap();
        assert!(back.get("reason").is_none());
    }

    #[test]
    fn non_url_image_fails_validation() {
        let suggestion = Suggestion {
            id: "8".to_string(),
            name: "Hat".to_string(),
            image_url: "hat.png".to_string(),
            reason: None,
        };
        assert!(suggestion.validate().is_err());
    }
}
