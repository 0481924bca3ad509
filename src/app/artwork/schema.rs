use serde::Deserialize;

#[derive(Deserialize)]
pub struct PublishArtworkBody {
    /// What was added to the portfolio, e.g. "painting" or "etching". Used in
    /// the notification subject and body.
    pub kind: String,
}
