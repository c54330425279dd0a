use tracing::info;
use tracing_subscriber::EnvFilter;

use kv_server::server::{Server, ServerConfig, ServerError};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    init_tracing();

    let server = Server::bind(&ServerConfig::default()).await?;
    let addr = server.local_addr()?;

    println!("TCP Server started. Port: {}", addr.port());
    info!(%addr, "listening");

    server.run().await
}
