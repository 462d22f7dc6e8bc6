use clap::Parser;
use collection_etl::domain::ports::ConfigProvider;
use collection_etl::utils::{logger, validation::Validate};
use collection_etl::{CliConfig, CollectionPipeline, EtlEngine, EtlError, LocalStorage};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting collection-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration resolution failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // A missing export aborts the run before the output file is touched.
    if !Path::new(config.csv_path()).exists() {
        let e = EtlError::InputNotFound {
            path: config.csv_path().to_string(),
        };
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = CollectionPipeline::new(storage, config);

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(report) => {
            tracing::info!("✅ Collection build completed successfully!");
            println!("✅ Collection build completed successfully!");
            println!(
                "📁 Generated {} with {} records",
                report.output_path, report.record_count
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Collection build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                collection_etl::utils::error::ErrorSeverity::Low => 0,
                collection_etl::utils::error::ErrorSeverity::Medium => 2,
                collection_etl::utils::error::ErrorSeverity::High => 1,
                collection_etl::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
