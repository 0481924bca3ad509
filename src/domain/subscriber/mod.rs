pub mod email;
pub mod name;
pub mod token;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use self::email::Email;
use self::name::Name;
use self::token::UnsubscribeToken;

/// A validated subscription request, before it has been persisted.
pub struct NewSubscriber {
    pub name: Name,
    pub email: Email,
}

/// A persisted subscriber record.
///
/// A subscriber cycles between active and inactive: unsubscribing flips
/// `is_active` off, subscribing with the same email flips it back on. Records
/// are never deleted.
#[derive(Clone)]
pub struct Subscriber {
    pub id: Uuid,
    pub name: Name,
    pub email: Email,
    pub unsubscribe_token: UnsubscribeToken,
    pub is_active: bool,
    pub subscribed_at: DateTime<Utc>,
}
