use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};
use mercato_gateway::GatewayState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = GatewayState::from_config(&config)?;
    let server = ServerConfig::from_config(&config, 8080);
    serve(mercato_gateway::app(state), &server, "gateway").await?;
    Ok(())
}
