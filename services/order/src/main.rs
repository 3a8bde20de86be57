use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};
use mercato_order::OrderState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = OrderState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8086);
    serve(mercato_order::app(state), &server, "order").await?;
    Ok(())
}
