//! Helper Clients - 各端口的槽通道实现
//!
//! 应用层通过 ports 里的 trait 调用 helper；这里把每个 trait
//! 落到一次 `SlotClient::exchange`。两类失败分开上报：
//! 通道层失败（超时、解码、IO）→ `HelperError::Transport`，
//! worker 报告的 `success: false` → `HelperError::Service`。

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::ports::{
    CounterPort, HelperError, ItemBreakdown, RandomChoicePort, TextFormat, TextFormatPort,
    TextStats, TitleWord, TitleWordsPort,
};
use crate::domain::Book;
use crate::infrastructure::ipc::messages::{
    ChoiceRequest, ChoiceResponse, CountRequest, CountResponse, FormatRequest, FormatResponse,
    StatsResponse, WordsRequest, WordsResponse,
};
use crate::infrastructure::ipc::{SlotChannel, SlotClient};
use crate::infrastructure::workers;

/// 客户端通道配置
#[derive(Debug, Clone)]
pub struct IpcClientConfig {
    /// 槽文件目录
    pub dir: PathBuf,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl IpcClientConfig {
    fn client(&self, helper: &str) -> SlotClient {
        SlotClient::new(
            SlotChannel::for_helper(&self.dir, helper),
            self.poll_interval,
            self.timeout,
        )
    }
}

impl From<crate::infrastructure::ipc::client::IpcError> for HelperError {
    fn from(err: crate::infrastructure::ipc::client::IpcError) -> Self {
        HelperError::Transport(err.to_string())
    }
}

// ============================================================================
// text_formatter
// ============================================================================

pub struct IpcTextFormatClient {
    client: SlotClient,
}

impl IpcTextFormatClient {
    pub fn new(config: &IpcClientConfig) -> Self {
        Self {
            client: config.client(workers::TEXT_FORMATTER),
        }
    }
}

#[async_trait]
impl TextFormatPort for IpcTextFormatClient {
    async fn format(&self, text: &str, format: TextFormat) -> Result<String, HelperError> {
        let request = FormatRequest {
            text: text.to_string(),
            format,
        };
        let response: FormatResponse = self.client.exchange(&request).await?;

        if response.success {
            Ok(response.result)
        } else {
            Err(HelperError::Service(response.error))
        }
    }
}

// ============================================================================
// data_counter
// ============================================================================

pub struct IpcCounterClient {
    client: SlotClient,
}

impl IpcCounterClient {
    pub fn new(config: &IpcClientConfig) -> Self {
        Self {
            client: config.client(workers::DATA_COUNTER),
        }
    }
}

#[async_trait]
impl CounterPort for IpcCounterClient {
    async fn count_items(&self, items: &[String]) -> Result<ItemBreakdown, HelperError> {
        let request = CountRequest::Count(items.to_vec());
        let response: CountResponse = self.client.exchange(&request).await?;

        if response.success {
            Ok(ItemBreakdown {
                total: response.total_count,
                unique: response.unique_count,
                counts: response.item_counts,
            })
        } else {
            Err(HelperError::Service(response.error))
        }
    }

    async fn text_stats(&self, text: &str) -> Result<TextStats, HelperError> {
        let request = CountRequest::Stats(text.to_string());
        let response: StatsResponse = self.client.exchange(&request).await?;

        if response.success {
            Ok(TextStats {
                characters: response.character_count,
                words: response.word_count,
            })
        } else {
            Err(HelperError::Service(response.error))
        }
    }
}

// ============================================================================
// rng_service
// ============================================================================

pub struct IpcRandomClient {
    client: SlotClient,
}

impl IpcRandomClient {
    pub fn new(config: &IpcClientConfig) -> Self {
        Self {
            client: config.client(workers::RNG_SERVICE),
        }
    }
}

#[async_trait]
impl RandomChoicePort for IpcRandomClient {
    async fn choose(&self, candidates: &[Book]) -> Result<Book, HelperError> {
        let items: Vec<serde_json::Value> = candidates
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()
            .map_err(|e| HelperError::Transport(format!("encode candidates: {}", e)))?;

        let response: ChoiceResponse = self.client.exchange(&ChoiceRequest { items }).await?;

        if !response.success {
            return Err(HelperError::Service(response.error));
        }

        let choice = response
            .choice
            .ok_or_else(|| HelperError::Service("success response without choice".to_string()))?;
        serde_json::from_value(choice)
            .map_err(|e| HelperError::Service(format!("choice is not a book: {}", e)))
    }
}

// ============================================================================
// title_words
// ============================================================================

pub struct IpcTitleWordsClient {
    client: SlotClient,
}

impl IpcTitleWordsClient {
    pub fn new(config: &IpcClientConfig) -> Self {
        Self {
            client: config.client(workers::TITLE_WORDS),
        }
    }
}

#[async_trait]
impl TitleWordsPort for IpcTitleWordsClient {
    async fn common_words(
        &self,
        titles: &[String],
        limit: usize,
    ) -> Result<Vec<TitleWord>, HelperError> {
        let request = WordsRequest {
            titles: titles.to_vec(),
            limit,
        };
        let response: WordsResponse = self.client.exchange(&request).await?;

        if response.success {
            Ok(response.words)
        } else {
            Err(HelperError::Service(response.error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ipc::SlotWorker;
    use crate::infrastructure::workers::{RngService, TextFormatterService};
    use tempfile::tempdir;

    fn config(dir: &std::path::Path) -> IpcClientConfig {
        IpcClientConfig {
            dir: dir.to_path_buf(),
            poll_interval: Duration::from_millis(10),
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_format_through_live_worker() {
        let dir = tempdir().unwrap();
        let channel = SlotChannel::for_helper(dir.path(), workers::TEXT_FORMATTER);
        let handle = tokio::spawn(
            SlotWorker::new(channel, Duration::from_millis(10)).run(TextFormatterService),
        );

        let client = IpcTextFormatClient::new(&config(dir.path()));
        let result = client.format("hello world", TextFormat::Upper).await.unwrap();
        assert_eq!(result, "HELLO WORLD");

        handle.abort();
    }

    #[tokio::test]
    async fn test_choose_round_trips_book_fields() {
        let dir = tempdir().unwrap();
        let channel = SlotChannel::for_helper(dir.path(), workers::RNG_SERVICE);
        let handle =
            tokio::spawn(SlotWorker::new(channel, Duration::from_millis(10)).run(RngService));

        let client = IpcRandomClient::new(&config(dir.path()));
        let book = Book::new("Dune", "Herbert", Some("SF".to_string()), None, None);
        let chosen = client.choose(std::slice::from_ref(&book)).await.unwrap();

        assert_eq!(chosen.title, book.title);
        assert_eq!(chosen.author, book.author);
        assert_eq!(chosen.genre, book.genre);

        handle.abort();
    }

    #[tokio::test]
    async fn test_worker_failure_is_service_error() {
        let dir = tempdir().unwrap();
        let channel = SlotChannel::for_helper(dir.path(), workers::RNG_SERVICE);
        let handle =
            tokio::spawn(SlotWorker::new(channel, Duration::from_millis(10)).run(RngService));

        // 空候选列表：worker 返回失败响应而非崩溃
        let client = IpcRandomClient::new(&config(dir.path()));
        let err = client.choose(&[]).await.unwrap_err();
        assert!(matches!(err, HelperError::Service(_)));

        handle.abort();
    }

    #[tokio::test]
    async fn test_missing_worker_is_transport_error() {
        let dir = tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.timeout = Duration::from_millis(100);

        let client = IpcTextFormatClient::new(&cfg);
        let err = client.format("x", TextFormat::Lower).await.unwrap_err();
        assert!(matches!(err, HelperError::Transport(_)));
    }
}
