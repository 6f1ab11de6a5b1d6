//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{HelperError, RepositoryError};

/// 应用层错误
///
/// 注意：推荐查询的"没有可推荐的书"不是错误，
/// 由 `SuggestionOutcome::NothingEligible` 表达。
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },

    /// 自然键命中多本书，需要更精确的定位
    #[error("Ambiguous key {key}: matches {count} books")]
    Ambiguous { key: String, count: usize },

    /// 验证错误
    #[error("Validation error: {0}")]
    Validation(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    Repository(String),

    /// 辅助服务错误
    #[error("Helper service error: {0}")]
    Helper(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    pub fn not_found(resource: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            key: key.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err.to_string())
    }
}

impl From<HelperError> for ApplicationError {
    fn from(err: HelperError) -> Self {
        Self::Helper(err.to_string())
    }
}
