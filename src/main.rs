use clap::Parser;
use movesurvey::utils::{logger, validation::Validate};
use movesurvey::{report, CliConfig, ProcessRunner, SurveyInvoker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting movesurvey");
    if cli.verbose {
        tracing::debug!("CLI flags: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let invoker = SurveyInvoker::new(ProcessRunner::new(), config);
    let outcome = if cli.dry_run {
        invoker.dry_run()
    } else {
        invoker.execute()
    };

    // A failed CLI run is reported, not propagated.
    if outcome.is_success() {
        report(&outcome, &mut std::io::stdout().lock())?;
    } else {
        report(&outcome, &mut std::io::stderr().lock())?;
    }

    Ok(())
}
