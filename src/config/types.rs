//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// IPC 通道配置
    #[serde(default)]
    pub ipc: IpcConfig,

    /// 推荐配置
    #[serde(default)]
    pub suggestion: SuggestionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            ipc: IpcConfig::default(),
            suggestion: SuggestionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 数据目录
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// TBR 列表文件名
    #[serde(default = "default_books_file")]
    pub books_file: String,

    /// 阅读历史文件名
    #[serde(default = "default_history_file")]
    pub history_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_books_file() -> String {
    "books.json".to_string()
}

fn default_history_file() -> String {
    "read_books.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            books_file: default_books_file(),
            history_file: default_history_file(),
        }
    }
}

impl StorageConfig {
    /// TBR 列表文件路径
    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    /// 阅读历史文件路径
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }
}

/// IPC 通道配置
#[derive(Debug, Clone, Deserialize)]
pub struct IpcConfig {
    /// 槽文件目录（客户端与 worker 必须指向同一目录）
    #[serde(default = "default_ipc_dir")]
    pub dir: PathBuf,

    /// 轮询间隔（毫秒）
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// 客户端等待响应的超时（毫秒）
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_ipc_dir() -> PathBuf {
    PathBuf::from("data/ipc")
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for IpcConfig {
    fn default() -> Self {
        Self {
            dir: default_ipc_dir(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl IpcConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// 推荐配置
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    /// 是否委托 rng_service worker 做随机选择
    /// 关闭时使用进程内随机数，不依赖 worker 存活
    #[serde(default = "default_delegate_random")]
    pub delegate_random: bool,
}

fn default_delegate_random() -> bool {
    true
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            delegate_random: default_delegate_random(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.storage.books_file, "books.json");
        assert_eq!(config.ipc.poll_interval_ms, 100);
        assert_eq!(config.ipc.timeout_ms, 5000);
        assert!(config.suggestion.delegate_random);
    }

    #[test]
    fn test_storage_paths() {
        let config = StorageConfig::default();
        assert_eq!(config.books_path(), PathBuf::from("data/books.json"));
        assert_eq!(config.history_path(), PathBuf::from("data/read_books.json"));
    }

    #[test]
    fn test_ipc_durations() {
        let config = IpcConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.timeout(), Duration::from_millis(5000));
    }
}
