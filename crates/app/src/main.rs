use std::path::Path;
use std::sync::Arc;

use halving_api::server::{AppState, start_server};
use halving_cache::mem::MemCache;
use halving_core::common::time::RealTimeProvider;
use halving_core::config::{AppConfig, LoggingConfig};
use halving_dashboard::loader::CachedPriceLoader;
use halving_dashboard::service::DashboardService;
use halving_feed::json::JsonFileProvider;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 可选的配置文件 (不含扩展名)
const CONFIG_FILE: &str = "config/halving";
/// 环境变量前缀，例如 `HALVING__SERVER__PORT=9000`
const ENV_PREFIX: &str = "HALVING";

/// # Summary
/// 按 默认值 → 配置文件 → 环境变量 的顺序叠加加载配置。
///
/// # Arguments
/// * `file` - 配置文件路径 (不含扩展名)，文件不存在时跳过。
fn load_config(file: &str) -> Result<AppConfig, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

/// # Summary
/// 初始化全局日志：控制台输出 + 可选的按天滚动文件。
///
/// # Returns
/// * `Option<WorkerGuard>` - 文件写入线程的守卫，必须持有到进程退出。
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let (file_layer, guard) = match &logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(Path::new(dir), &logging.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 DashboardService。
///
/// # Logic
/// 1. 加载配置并初始化全局日志。
/// 2. 实例化基础设施层（JSON 数据源、内存缓存、系统时钟）。
/// 3. 构造加载器与应用服务层（DashboardService）。
/// 4. 启动 HTTP 服务，收到退出信号后结束。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 配置与日志
    let config = load_config(CONFIG_FILE)?;
    let _guard = init_tracing(&config.logging);
    info!("Halving dashboard starting...");
    info!("price history source: {}", config.dashboard.data_path);

    // 2. 实例化基础设施层
    let provider = Arc::new(JsonFileProvider::new(&config.dashboard.data_path));
    let cache = Arc::new(MemCache::new());
    let clock = Arc::new(RealTimeProvider);

    // 3. 构造应用服务层（注入 Core Trait 抽象）
    let loader = Arc::new(CachedPriceLoader::new(provider, cache, clock.clone()));
    let dashboard = DashboardService::new(loader, clock, config.dashboard.clone());

    // 4. 启动服务，等待外部退出信号
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    tokio::select! {
        result = start_server(AppState { dashboard }, &bind_addr) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent").to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.dashboard.data_path, "data/btc_data.json");
        assert_eq!(config.dashboard.projections.current_epoch, 5);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("halving.toml"),
            "[server]\nport = 9090\n\n[dashboard]\ndata_path = \"/srv/btc.json\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = load_config(dir.path().join("halving").to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dashboard.data_path, "/srv/btc.json");
        assert_eq!(config.dashboard.halving_markers.len(), 4);
        assert_eq!(config.logging.level, "debug");
    }
}
