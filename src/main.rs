use sharefood::server::{
    config::Config,
    model::app::{AppState, LifecycleSettings},
    router, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let image_host = startup::build_image_host_client(&config)?;
    let db = startup::connect_to_database(&config).await?;

    let state = AppState {
        db,
        image_host,
        jwt_secret: config.jwt_secret.clone(),
        settings: LifecycleSettings {
            auto_reject_on_approve: config.auto_reject_on_approve,
        },
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Starting server on {}", config.listen_addr);

    axum::serve(listener, router::routes().with_state(state)).await?;

    Ok(())
}
