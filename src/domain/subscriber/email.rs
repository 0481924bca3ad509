use derive_more::Display;
use validator::validate_email;

/// A subscriber email address, normalized to its lowercase form so lookups
/// and the store's uniqueness constraint treat `Ada@…` and `ada@…` as the
/// same subscriber.
#[derive(Clone, Display)]
#[display(fmt = "{}", _0)]
pub struct Email(String);

impl TryFrom<String> for Email {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim().to_lowercase();
        if validate_email(&value) {
            Ok(Self(value))
        } else {
            Err("invalid email".into())
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
