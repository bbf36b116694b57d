use crate::config::ClientConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "diy99")]
#[command(about = "Validate and push web image editor orders to 99Diy")]
pub struct CliConfig {
    #[arg(long, help = "TOML client configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Use the sandbox environment")]
    pub sandbox: bool,

    #[arg(long, help = "Log request and response bodies")]
    pub debug: bool,

    #[arg(long, help = "Override the API base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate an order file without contacting the API
    Validate { orders: PathBuf },
    /// Validate and push an order file, printing the order id
    Push { orders: PathBuf },
}

impl CliConfig {
    /// 設定檔為底，命令列參數覆蓋
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        config.sandbox |= self.sandbox;
        config.debug |= self.debug;
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }

        Ok(config)
    }

    /// `--debug` 記錄的請求內容是 debug 等級，需要一併放寬日誌過濾
    pub fn log_verbose(&self, config: &ClientConfig) -> bool {
        self.verbose || config.debug
    }

    pub fn orders_path(&self) -> &PathBuf {
        match &self.command {
            Command::Validate { orders } | Command::Push { orders } => orders,
        }
    }
}
