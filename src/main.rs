use decodex::{
    api::{create_router, AppState},
    config::Config,
    services::{self, providers, WeightTable},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("decodex=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(config.clone());

    // The server answers 503 until the index is published. A catalog that
    // cannot be loaded is fatal.
    let provider = providers::from_source(&config.catalog_source);
    let build_state = state.clone();
    tokio::spawn(async move {
        let built = services::initialize(provider.as_ref(), WeightTable::default())
            .await
            .and_then(|index| build_state.publish(index));

        if let Err(e) = built {
            tracing::error!(error = %e, "Failed to build recommendation index");
            std::process::exit(1);
        }
    });

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
