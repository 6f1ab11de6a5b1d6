//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `BOOKBASE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `BOOKBASE_STORAGE__DATA_DIR=/var/lib/bookbase`
/// - `BOOKBASE_IPC__DIR=/tmp/bookbase-ipc`
/// - `BOOKBASE_IPC__TIMEOUT_MS=2000`
/// - `BOOKBASE_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("storage.data_dir", "data")?
        .set_default("storage.books_file", "books.json")?
        .set_default("storage.history_file", "read_books.json")?
        .set_default("ipc.dir", "data/ipc")?
        .set_default("ipc.poll_interval_ms", 100)?
        .set_default("ipc.timeout_ms", 5000)?
        .set_default("suggestion.delegate_random", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: BOOKBASE_
    // 层级分隔符: __ (双下划线)
    // 例如: BOOKBASE_IPC__TIMEOUT_MS=2000
    builder = builder.add_source(
        Environment::with_prefix("BOOKBASE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.storage.books_file.is_empty() {
        return Err(ConfigError::ValidationError(
            "Books file name cannot be empty".to_string(),
        ));
    }

    if config.storage.history_file.is_empty() {
        return Err(ConfigError::ValidationError(
            "History file name cannot be empty".to_string(),
        ));
    }

    if config.storage.books_file == config.storage.history_file {
        return Err(ConfigError::ValidationError(
            "Books file and history file must differ".to_string(),
        ));
    }

    if config.ipc.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "IPC poll interval cannot be 0".to_string(),
        ));
    }

    if config.ipc.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "IPC timeout cannot be 0".to_string(),
        ));
    }

    if config.ipc.poll_interval_ms >= config.ipc.timeout_ms {
        return Err(ConfigError::ValidationError(
            "IPC poll interval must be smaller than the timeout".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Data Directory: {:?}", config.storage.data_dir);
    tracing::info!("Books File: {}", config.storage.books_file);
    tracing::info!("History File: {}", config.storage.history_file);
    tracing::info!("IPC Directory: {:?}", config.ipc.dir);
    tracing::info!("IPC Poll Interval: {}ms", config.ipc.poll_interval_ms);
    tracing::info!("IPC Timeout: {}ms", config.ipc.timeout_ms);
    tracing::info!("Delegate Random: {}", config.suggestion.delegate_random);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
