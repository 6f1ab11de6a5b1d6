//! Helper Service Ports - 辅助服务端口
//!
//! 每个辅助服务是一个独立运行的 worker 进程，通过槽文件通道交换
//! JSON 请求/响应（实现见 infrastructure/ipc）。端口只描述契约，
//! 不关心传输方式，因此也允许进程内实现（如本地随机选择）。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::Book;

/// Helper 服务错误
///
/// 两种失败需要区分对待：
/// - `Transport`：通道层失败（超时、无法解码、IO），worker 可能根本没在运行
/// - `Service`：worker 收到了请求但报告 `success: false`
#[derive(Debug, Error)]
pub enum HelperError {
    #[error("helper transport error: {0}")]
    Transport(String),

    #[error("helper reported failure: {0}")]
    Service(String),
}

/// 文本转换格式
///
/// 操作集是封闭的：枚举在解码时即拒绝未知取值，
/// worker 不存在"未知 format"的运行时分支。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    Upper,
    Lower,
    Title,
    /// 移除所有既非字母数字也非空白的字符
    Clean,
}

impl TextFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextFormat::Upper => "upper",
            TextFormat::Lower => "lower",
            TextFormat::Title => "title",
            TextFormat::Clean => "clean",
        }
    }
}

/// Text Formatter Port
#[async_trait]
pub trait TextFormatPort: Send + Sync {
    async fn format(&self, text: &str, format: TextFormat) -> Result<String, HelperError>;
}

/// 条目计数结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBreakdown {
    pub total: usize,
    pub unique: usize,
    /// 每个不同条目的出现次数
    pub counts: BTreeMap<String, usize>,
}

/// 文本统计结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    /// 字符数（按 Unicode 标量计）
    pub characters: usize,
    /// 词数（按空白分隔的最大非空白段计）
    pub words: usize,
}

/// Data Counter Port
#[async_trait]
pub trait CounterPort: Send + Sync {
    async fn count_items(&self, items: &[String]) -> Result<ItemBreakdown, HelperError>;

    async fn text_stats(&self, text: &str) -> Result<TextStats, HelperError>;
}

/// Random Choice Port
///
/// 均匀性是契约；是否委托给 rng worker 进程是实现细节。
#[async_trait]
pub trait RandomChoicePort: Send + Sync {
    /// 从候选中均匀随机选一本；空候选列表是调用方错误
    async fn choose(&self, candidates: &[Book]) -> Result<Book, HelperError>;
}

/// 标题词频条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleWord {
    pub word: String,
    pub count: usize,
}

/// Title Words Port - 标题常用词分析
#[async_trait]
pub trait TitleWordsPort: Send + Sync {
    async fn common_words(
        &self,
        titles: &[String],
        limit: usize,
    ) -> Result<Vec<TitleWord>, HelperError>;
}
