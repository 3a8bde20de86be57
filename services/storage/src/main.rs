use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};
use mercato_storage::StorageState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = StorageState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8090);
    serve(mercato_storage::app(state), &server, "storage").await?;
    Ok(())
}
