use std::net::SocketAddr;

use recruitment_site::{
    config::{get_config, init_config},
    routes,
    utils::crypto::hash_password,
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    // `recruitment-site hash-password <plain>` prints a value for ADMIN_PASSWORD_HASH.
    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        if command == "hash-password" {
            let plain = args
                .next()
                .ok_or_else(|| anyhow::anyhow!("usage: recruitment-site hash-password <password>"))?;
            let hash = hash_password(&plain).map_err(|e| anyhow::anyhow!("hashing failed: {}", e))?;
            println!("{}", hash);
            return Ok(());
        }
        anyhow::bail!("unknown command: {}", command);
    }

    init_config()?;
    let config = get_config()?;

    let app_state = AppState::new(config)?;
    info!(backend = %config.api_base_url, "Using recruitment backend");

    let app = routes::router(app_state, config.public_rps);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
