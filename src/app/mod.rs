use std::{io, net::IpAddr, sync::Arc};

use axum::{http::Request, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::Settings, email::EmailClient, store::SubscriberStore};

mod artwork;
mod error;
mod health;
mod subscription;
mod unsubscribe;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn SubscriberStore>,
    email_client: EmailClient,
    base_url: String,
}

fn app_router() -> Router<AppState> {
    health::router()
        .merge(subscription::router())
        .merge(unsubscribe::router())
        .merge(artwork::router())
}

pub struct App {
    listener: TcpListener,
    email_client: EmailClient,
    base_url: String,
}

impl App {
    pub async fn with(config: Settings) -> Self {
        let timeout = config.email_client.timeout();
        let email_client = EmailClient::new(
            config.email_client.base_url,
            config
                .email_client
                .sender_email
                .try_into()
                .expect("The sender email should be valid."),
            config.email_client.authorization_token,
            timeout,
        );

        let listener = TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await
        .expect("The listener should be able to bind the address.");

        Self {
            listener,
            email_client,
            base_url: config.application.base_url,
        }
    }

    pub fn host(&self) -> IpAddr {
        self.listener.local_addr().unwrap().ip()
    }

    pub fn port(&self) -> u16 {
        self.listener.local_addr().unwrap().port()
    }

    pub async fn serve(self, store: Arc<dyn SubscriberStore>) -> Result<(), io::Error> {
        let app = app_router()
            .with_state(AppState {
                store,
                email_client: self.email_client,
                base_url: self.base_url,
            })
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                    let id = uuid::Uuid::new_v4();
                    tracing::info_span!(
                        "request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        %id,
                    )
                }),
            );

        axum::serve(self.listener, app.into_make_service()).await
    }
}
