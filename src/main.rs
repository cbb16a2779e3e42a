use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use neo_filter::config::Config;
use neo_filter::routes::create_router;
use neo_filter::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    dotenvy::dotenv().ok();

    let config = Config::from_env();
    let port = config.port;
    let state = AppState::new(config)?;

    let app = create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("neo_filter listening on 0.0.0.0:{}", port);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
