use derive_more::Display;
use unicode_segmentation::UnicodeSegmentation;

/// A subscriber display name between 2 and 100 graphemes.
#[derive(Clone, Display)]
#[display(fmt = "{}", _0)]
pub struct Name(String);

impl TryFrom<String> for Name {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err("name is empty".into());
        }

        let length = value.graphemes(true).count();
        if length < 2 {
            return Err("name is too short".into());
        }
        if length > 100 {
            return Err("name is too long".into());
        }

        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        if value.chars().any(|g| forbidden_characters.contains(&g)) {
            return Err("name contains invalid characters".into());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
