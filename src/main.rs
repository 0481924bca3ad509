use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::util::SubscriberInitExt;

use atelier::{
    app::App, config::get_configuration, store::postgres::PgSubscriberStore,
    telemetry::get_subscriber,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration().expect("Failed to read configuration.");

    get_subscriber(&config.log_level, std::io::stderr).init();

    let db = PgPoolOptions::new()
        .max_connections(50)
        .connect_with(config.database.with_db())
        .await
        .context("Could not connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Could not run database migrations")?;

    let app = App::with(config).await;

    tracing::info!(port = app.port(), "starting server");
    app.serve(Arc::new(PgSubscriberStore::new(db)))
        .await
        .context("The server should be running")?;

    Ok(())
}
