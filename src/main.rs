mod model;
mod server;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{
    config::Config,
    error::AppError,
    router, startup,
    service::{
        mail::{NotificationDispatcher, SendGridTransport},
        media::MediaStore,
        token::TokenIssuer,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;

    let transport = SendGridTransport::new(
        http_client,
        config.sendgrid_api_key.clone(),
        config.mail_api_url.clone(),
    );
    let mailer = NotificationDispatcher::new(Arc::new(transport));
    let tokens = TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl_seconds);

    let media = MediaStore::new(&config.upload_dir);
    media.ensure_dirs().await?;

    let app = router::router(AppState::new(db.clone(), tokens, media, mailer));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    db.close().await?;
    tracing::info!("Server stopped");

    Ok(())
}
