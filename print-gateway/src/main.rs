use print_gateway::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (.env, then config, then logging)
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    setup_environment(&config);

    tracing::info!("Print gateway starting...");

    // 2. Shared state around the OS spooler
    let state = ServerState::initialize(config.clone());

    // 3. Serve until ctrl-c
    let server = Server::new(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
