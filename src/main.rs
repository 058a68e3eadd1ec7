use digitalocean_dns::config::Config;
use digitalocean_dns::error::Error;
use digitalocean_dns::libdns::{Context, DNSProvider};
use digitalocean_dns::providers::digitalocean::DigitalOceanProvider;
use digitalocean_dns::smoke;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("DO_AUTH_TOKEN and ZONE must be set: {}", e);
            return Ok(());
        }
    };

    let provider = DigitalOceanProvider::new(config.provider_config());
    let ctx = Context::new();

    // Abort in-flight requests on Ctrl-C
    let shutdown = ctx.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    match provider.get_records(&ctx, &config.zone).await {
        Ok(records) => {
            for rr in records {
                println!("{} {} {}", rr.record_type, rr.name, rr.value);
            }
        }
        Err(e) => report("Failed to list records", &e),
    }

    if let Err(e) = smoke::txt_round_trip(&provider, &ctx, &config.zone).await {
        report("TXT test failed", &e);
    }
    if let Err(e) = smoke::address_upsert(&provider, &ctx, &config.zone).await {
        report("A test failed", &e);
    }

    Ok(())
}

fn report(what: &str, err: &Error) {
    match err.hint() {
        Some(hint) => error!("{}: {} ({})", what, err, hint),
        None => error!("{}: {}", what, err),
    }
}
