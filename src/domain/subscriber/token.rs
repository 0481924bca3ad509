use rand::{distributions::Alphanumeric, thread_rng, Rng};

const TOKEN_LENGTH: usize = 32;

/// Opaque per-subscriber secret embedded in unsubscribe links.
///
/// Knowing the token is sufficient to deactivate the subscription, so it is
/// drawn from a cryptographically secure generator and never logged. It stays
/// stable for the lifetime of the record; the store looks it up by exact
/// match.
#[derive(Clone)]
pub struct UnsubscribeToken(String);

impl UnsubscribeToken {
    /// Generate a random 32-characters-long case-sensitive token.
    pub fn generate() -> Self {
        let mut rng = thread_rng();
        Self(
            std::iter::repeat_with(|| rng.sample(Alphanumeric))
                .map(char::from)
                .take(TOKEN_LENGTH)
                .collect(),
        )
    }
}

impl TryFrom<String> for UnsubscribeToken {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err("unsubscribe token is missing".into());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for UnsubscribeToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
