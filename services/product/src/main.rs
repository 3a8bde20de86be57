use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};
use mercato_product::ProductState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = ProductState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8083);
    serve(mercato_product::app(state), &server, "product").await?;
    Ok(())
}
