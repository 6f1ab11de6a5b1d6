//! Data Counter - 计数 helper
//!
//! 两种模式：
//! - count: 统计列表条目（总数、去重数、每项出现次数）
//! - stats: 统计文本（字符数按 Unicode 标量、词数按空白切分）

use std::collections::BTreeMap;

use crate::infrastructure::ipc::messages::{
    CountRequest, CountResponse, FailureEnvelope, StatsResponse,
};
use crate::infrastructure::ipc::{encode_response, SlotService};

/// 条目计数
pub fn count_items(items: &[String]) -> CountResponse {
    let mut item_counts: BTreeMap<String, usize> = BTreeMap::new();
    for item in items {
        *item_counts.entry(item.clone()).or_insert(0) += 1;
    }

    CountResponse {
        success: true,
        total_count: items.len(),
        unique_count: item_counts.len(),
        item_counts,
        error: String::new(),
    }
}

/// 文本统计
pub fn text_stats(text: &str) -> StatsResponse {
    StatsResponse {
        success: true,
        character_count: text.chars().count(),
        word_count: text.split_whitespace().count(),
        error: String::new(),
    }
}

/// data_counter 的槽服务实现
pub struct DataCounterService;

impl SlotService for DataCounterService {
    fn name(&self) -> &'static str {
        super::DATA_COUNTER
    }

    fn respond(&self, raw: &str) -> String {
        match serde_json::from_str::<CountRequest>(raw) {
            Ok(CountRequest::Count(items)) => encode_response(&count_items(&items)),
            Ok(CountRequest::Stats(text)) => encode_response(&text_stats(&text)),
            // 解码失败时无从得知请求的模式，回通用失败信封
            Err(e) => encode_response(&FailureEnvelope::new(format!("invalid request: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_invariants() {
        let items: Vec<String> = ["a", "b", "a", "c", "a"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let response = count_items(&items);

        // sum(item_counts) == total_count == len(L)
        assert_eq!(response.total_count, items.len());
        assert_eq!(
            response.item_counts.values().sum::<usize>(),
            response.total_count
        );
        // len(item_counts) == unique_count
        assert_eq!(response.item_counts.len(), response.unique_count);
        assert_eq!(response.item_counts["a"], 3);
    }

    #[test]
    fn test_count_empty_list() {
        let response = count_items(&[]);
        assert!(response.success);
        assert_eq!(response.total_count, 0);
        assert_eq!(response.unique_count, 0);
        assert!(response.item_counts.is_empty());
    }

    #[test]
    fn test_stats_counts_chars_and_words() {
        let response = text_stats("hello brave  new world");
        assert_eq!(response.character_count, 22);
        assert_eq!(response.word_count, 4);
    }

    #[test]
    fn test_word_count_zero_iff_whitespace_only() {
        assert_eq!(text_stats("").word_count, 0);
        assert_eq!(text_stats("   \t\n").word_count, 0);
        assert_eq!(text_stats("x").word_count, 1);
        // character_count("") == 0
        assert_eq!(text_stats("").character_count, 0);
    }

    #[test]
    fn test_stats_counts_unicode_scalars() {
        // 字符数按标量计，不按字节
        let response = text_stats("héllo");
        assert_eq!(response.character_count, 5);
    }

    #[test]
    fn test_dispatch_count_mode() {
        let raw = r#"{"mode":"count","data":["x","x","y"]}"#;
        let response: CountResponse =
            serde_json::from_str(&DataCounterService.respond(raw)).unwrap();

        assert!(response.success);
        assert_eq!(response.total_count, 3);
        assert_eq!(response.unique_count, 2);
    }

    #[test]
    fn test_dispatch_stats_mode() {
        let raw = r#"{"mode":"stats","data":"two words"}"#;
        let response: StatsResponse =
            serde_json::from_str(&DataCounterService.respond(raw)).unwrap();

        assert!(response.success);
        assert_eq!(response.word_count, 2);
        assert_eq!(response.character_count, 9);
    }

    #[test]
    fn test_unknown_mode_is_failure_response() {
        let raw = r#"{"mode":"tally","data":[]}"#;
        let response: FailureEnvelope =
            serde_json::from_str(&DataCounterService.respond(raw)).unwrap();

        assert!(!response.success);
        assert!(!response.error.is_empty());
    }
}
