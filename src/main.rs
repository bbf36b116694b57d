use anyhow::Context;
use clap::Parser;
use diy99_client::config::cli::Command;
use diy99_client::utils::error::ErrorSeverity;
use diy99_client::utils::{logger, validation::Validate};
use diy99_client::{CliConfig, Diy99Client, Diy99Error, OrderRequest, PushEngine};

fn load_orders(path: &std::path::Path) -> anyhow::Result<OrderRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading order file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing order file {}", path.display()))
}

fn exit_code(e: &Diy99Error) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2, // 可重試的網路錯誤
        ErrorSeverity::High => 1, // 請求或遠端錯誤
        ErrorSeverity::Critical => 3, // 設定或系統錯誤
    }
}

fn report(e: &Diy99Error) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = cli.client_config();
    let verbose = match &config {
        Ok(config) => cli.log_verbose(config),
        Err(_) => cli.verbose,
    };

    if cli.json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting diy99 CLI");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => report(&e),
    };
    if let Err(e) = config.validate() {
        report(&e);
    }

    let request = match load_orders(cli.orders_path()) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(3);
        }
    };

    let client = match Diy99Client::new(config) {
        Ok(client) => client,
        Err(e) => report(&e),
    };
    let engine = PushEngine::new(client.web_image_editor());

    match &cli.command {
        Command::Validate { .. } => {
            if let Err(e) = engine.check(&request) {
                report(&e);
            }
            println!("✅ Order request is valid");
        }
        Command::Push { .. } => match engine.run(request).await {
            Ok(order_id) => {
                println!("✅ Orders pushed successfully!");
                println!("📋 Order id: {}", order_id);
            }
            Err(e) => report(&e),
        },
    }

    Ok(())
}
