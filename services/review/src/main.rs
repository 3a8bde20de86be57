use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};
use mercato_review::ReviewState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = ReviewState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8088);
    serve(mercato_review::app(state), &server, "review").await?;
    Ok(())
}
