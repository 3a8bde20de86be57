use mercato_cart::CartState;
use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = CartState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8084);
    serve(mercato_cart::app(state), &server, "cart").await?;
    Ok(())
}
