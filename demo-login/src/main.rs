use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oauth2_login::{AuthService, Config, GoogleClient, PostgrestUserStore, SingleSlotSessionStore};
use oauth2_login_axum::app_router;

mod server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,oauth2_login=debug,oauth2_login_axum=debug,tower_http=info",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    config.startup_report();

    let google = GoogleClient::new(&config)?;
    let users = PostgrestUserStore::new(&config)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let auth = AuthService::new(
        Arc::new(config),
        google,
        Arc::new(users),
        Arc::new(SingleSlotSessionStore::new()),
    );

    server::serve(addr, app_router(auth)).await?;
    Ok(())
}
