//! Wire Messages - 各 helper 的请求/响应 JSON 结构
//!
//! 每次交换都是一个 JSON 对象。请求用带判别字段的枚举表达，
//! 未知的 `format`/`mode` 取值在解码阶段即被拒绝；响应统一携带
//! `success` 与 `error`，结果字段因操作而异。失败响应可能缺少
//! 结果字段，所有结果字段都带 `#[serde(default)]` 以便宽容解析。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::ports::{TextFormat, TitleWord};

/// 通用失败信封——在无法判定请求形状（如 counter 解码失败，
/// 不知道该回 count 还是 stats 响应）时使用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: String,
}

impl FailureEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// ============================================================================
// text_formatter
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatRequest {
    pub text: String,
    pub format: TextFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatResponse {
    pub success: bool,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub error: String,
}

impl FormatResponse {
    pub fn ok(result: String) -> Self {
        Self {
            success: true,
            result,
            error: String::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: String::new(),
            error: error.into(),
        }
    }
}

// ============================================================================
// data_counter
// ============================================================================

/// counter 请求：`{"mode": "count", "data": [...]}` 或
/// `{"mode": "stats", "data": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", content = "data", rename_all = "lowercase")]
pub enum CountRequest {
    Count(Vec<String>),
    Stats(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub success: bool,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub unique_count: usize,
    #[serde(default)]
    pub item_counts: BTreeMap<String, usize>,
    #[serde(default)]
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(default)]
    pub character_count: usize,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub error: String,
}

// ============================================================================
// rng_service
// ============================================================================

/// 候选用任意 JSON 值表达，调用方负责序列化/还原自己的类型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceRequest {
    pub items: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceResponse {
    pub success: bool,
    #[serde(default)]
    pub choice: Option<serde_json::Value>,
    #[serde(default)]
    pub error: String,
}

impl ChoiceResponse {
    pub fn ok(choice: serde_json::Value) -> Self {
        Self {
            success: true,
            choice: Some(choice),
            error: String::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            choice: None,
            error: error.into(),
        }
    }
}

// ============================================================================
// title_words
// ============================================================================

fn default_word_limit() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsRequest {
    pub titles: Vec<String>,
    #[serde(default = "default_word_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsResponse {
    pub success: bool,
    #[serde(default)]
    pub words: Vec<TitleWord>,
    #[serde(default)]
    pub error: String,
}

impl WordsResponse {
    pub fn ok(words: Vec<TitleWord>) -> Self {
        Self {
            success: true,
            words,
            error: String::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            words: Vec::new(),
            error: error.into(),
        }
    }
}
