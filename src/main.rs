use clap::Parser;
use hh_vacancies::utils::{logger, validation::Validate};
use hh_vacancies::{CliConfig, HarvestEngine, HttpFetcher, Renderer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting hh-vacancies");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let fetcher = HttpFetcher::new(&config)?;
    let engine = HarvestEngine::new(fetcher, config);
    let mut renderer = Renderer::new(std::io::stdout().lock(), cli.format);

    match engine.run(&mut renderer).await {
        Ok(summary) => {
            tracing::info!(
                "✅ Run finished: {} rendered, {} found, {} pages, failed pages: {:?}",
                summary.rendered,
                summary.found,
                summary.pages,
                summary.failed_pages
            );
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ Failed to fetch vacancies: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
