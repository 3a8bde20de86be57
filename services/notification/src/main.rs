use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};
use mercato_notification::NotificationState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = NotificationState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8089);
    serve(mercato_notification::app(state), &server, "notification").await?;
    Ok(())
}
