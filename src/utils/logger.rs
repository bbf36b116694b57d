use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 預設過濾規則；verbose（或 --debug）時放寬到 debug 才看得到請求與回應內容
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "diy99_client=debug,info"
    } else {
        "diy99_client=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

fn base_layer<S>() -> fmt::Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(base_layer().compact())
        .init();
}

/// 非互動環境（CI、排程任務）用 JSON 格式，方便日誌系統收集
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(base_layer().json())
        .init();
}
