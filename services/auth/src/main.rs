use mercato_auth::AuthState;
use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = AuthState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8081);
    serve(mercato_auth::app(state), &server, "auth").await?;
    Ok(())
}
