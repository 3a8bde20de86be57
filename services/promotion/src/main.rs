use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};
use mercato_promotion::PromotionState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = PromotionState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8085);
    serve(mercato_promotion::app(state), &server, "promotion").await?;
    Ok(())
}
