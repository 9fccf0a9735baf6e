use anyhow::Context;
use clap::Parser;
use movesurvey::core::proxy;
use movesurvey::utils::{logger, validation::Validate};
use movesurvey::ProxyCli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ProxyCli::parse();

    logger::init_logger(args.verbose, args.log_json);

    let config = match args.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    tracing::info!(
        "🚀 Starting dev proxy: {} -> {}",
        config.prefix,
        config.target
    );

    proxy::serve(&config)
        .await
        .with_context(|| format!("dev proxy on {} stopped", config.bind))?;

    Ok(())
}
