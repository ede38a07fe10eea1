use intake_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    intake_api::telemetry::init();

    // Initialize the application (credentials, backends, routes)
    let (state, router) = intake_api::setup::initialize_app(config).await?;

    // Start the server
    intake_api::setup::server::start_server(&state.config, router).await?;

    Ok(())
}
