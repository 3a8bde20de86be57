use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};
use mercato_shop::ShopState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = ShopState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8082);
    serve(mercato_shop::app(state), &server, "shop").await?;
    Ok(())
}
