use mercato_core::server::{serve, ServerConfig};
use mercato_core::{layers, BoxError, MercatoConfig};
use mercato_payment::PaymentState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = MercatoConfig::load("dev")?;
    layers::init_tracing(&config);

    let state = PaymentState::from_config(&config).await?;
    let server = ServerConfig::from_config(&config, 8087);
    serve(mercato_payment::app(state), &server, "payment").await?;
    Ok(())
}
