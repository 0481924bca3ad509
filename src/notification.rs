//! Notification dispatch: turns domain events into outgoing email.
//!
//! Broadcast sends are independent of each other. A recipient whose delivery
//! fails is logged and counted, never allowed to abort the rest of the
//! fan-out.

use tokio::task::JoinSet;
use tracing::instrument;

use crate::domain::subscriber::Subscriber;
use crate::email::EmailClient;
use crate::registry;
use crate::store::{StoreError, SubscriberStore};

/// Per-broadcast delivery tally.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BroadcastOutcome {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// The unsubscribe capability link for one specific subscriber.
pub fn unsubscribe_url(base_url: &str, subscriber: &Subscriber) -> String {
    format!(
        "{}/subscriptions/unsubscribe?token={}",
        base_url,
        subscriber.unsubscribe_token.as_ref()
    )
}

#[instrument(name = "Sending a welcome email", skip(email_client, subscriber, base_url), fields(email = %subscriber.email))]
pub async fn send_welcome(
    email_client: &EmailClient,
    subscriber: &Subscriber,
    base_url: &str,
) -> Result<(), reqwest::Error> {
    let unsubscribe_link = unsubscribe_url(base_url, subscriber);
    let text_body = format!(
        "Welcome {}!\n\
         You will now hear about every new piece added to the portfolio.\n\
         Unsubscribe any time: {}",
        subscriber.name, unsubscribe_link
    );
    let html_body = format!(
        "Welcome {}!<br />\
         You will now hear about every new piece added to the portfolio.<br />\
         <a href=\"{}\">Unsubscribe</a> any time.",
        subscriber.name, unsubscribe_link
    );

    email_client
        .send_email(
            &subscriber.email,
            "Welcome to the studio",
            &html_body,
            &text_body,
        )
        .await
}

/// Fan out a "new artwork" email to every active subscriber.
///
/// All sends are issued concurrently and the broadcast completes once every
/// attempt has settled. An empty subscriber list is a successful no-op.
#[instrument(name = "Broadcasting new artwork", skip(store, email_client, base_url))]
pub async fn broadcast_new_artwork(
    store: &dyn SubscriberStore,
    email_client: &EmailClient,
    base_url: &str,
    artwork_kind: &str,
) -> Result<BroadcastOutcome, StoreError> {
    let subscribers = registry::list_active(store).await?;
    let subject = format!("New {} in the portfolio", artwork_kind);

    let mut sends = JoinSet::new();
    for subscriber in subscribers {
        let unsubscribe_link = unsubscribe_url(base_url, &subscriber);
        let text_body = format!(
            "A new {} has just been added to the portfolio. Come have a look!\n\
             Unsubscribe any time: {}",
            artwork_kind, unsubscribe_link
        );
        let html_body = format!(
            "A new {} has just been added to the portfolio. Come have a look!<br />\
             <a href=\"{}\">Unsubscribe</a> any time.",
            artwork_kind, unsubscribe_link
        );
        let email_client = email_client.clone();
        let subject = subject.clone();

        sends.spawn(async move {
            let outcome = email_client
                .send_email(&subscriber.email, &subject, &html_body, &text_body)
                .await;
            (subscriber.email, outcome)
        });
    }

    let mut outcome = BroadcastOutcome {
        attempted: 0,
        delivered: 0,
        failed: 0,
    };
    while let Some(settled) = sends.join_next().await {
        outcome.attempted += 1;
        match settled {
            Ok((_, Ok(()))) => outcome.delivered += 1,
            Ok((email, Err(e))) => {
                outcome.failed += 1;
                tracing::warn!(
                    error = %e,
                    email = %email,
                    "Failed to deliver an artwork notification."
                );
            }
            Err(e) => {
                outcome.failed += 1;
                tracing::error!(error = %e, "An artwork notification task failed to run.");
            }
        }
    }

    tracing::info!(
        attempted = outcome.attempted,
        delivered = outcome.delivered,
        failed = outcome.failed,
        "Artwork broadcast settled."
    );

    Ok(outcome)
}
