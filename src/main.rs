use {
    across_bridge::{AcrossApi, AcrossBridge, AcrossChain, BridgeConfig, Error, log_progress},
    alloy_provider::ProviderBuilder,
    tracing::{error, info},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match BridgeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("cannot start: {e}");
            return Ok(());
        }
    };
    info!(
        "bridging {} -> {} from {}",
        config.origin,
        config.destination,
        config.address()
    );

    let provider = ProviderBuilder::new()
        .wallet(config.signer.clone())
        .connect_http(config.rpc_url(config.origin)?);
    let api = AcrossApi::new(config.origin.sandbox());
    let bridge = AcrossBridge::new(provider, api, config);

    match bridge.run(&mut |event| log_progress(event)).await {
        Ok(receipt) => info!("bridge complete: {receipt}"),
        Err(e @ Error::InsufficientFunds { .. }) => {
            error!("{e}");
        }
        Err(e) => error!("bridge failed: {e}"),
    }
    Ok(())
}
