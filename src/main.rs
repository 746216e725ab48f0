use anyhow::Result;
use schoolmis_rs::app::logger;
use schoolmis_rs::app::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    info!("Initializing application state...");

    let state = AppState::new().await?;

    info!("Application state ready");
    info!("Backend: {}", state.config.api_base_url);

    // Example: sign in and list classes
    // let user = schoolmis_rs::api::auth::login(&state, "head.teacher", "password").await?;
    // let classes = schoolmis_rs::api::classes::list_classes(&state).await?;

    // Example: end-of-year promotion run
    // let stats = schoolmis_rs::app::workflow::promotion::promote_classes(
    //     &state, &classes, state.config.concurrency).await;

    info!("Startup complete, press Ctrl+C to exit");

    tokio::signal::ctrl_c().await?;

    info!("Shutting down...");
    Ok(())
}
