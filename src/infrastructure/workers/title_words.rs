//! Title Words - 标题词频 helper
//!
//! 统计一组标题中最常见的词：统一小写、剥掉词首尾的非字母数字
//! 字符、丢弃常见虚词（停用词表是调参项，不是正确性属性），
//! 按出现次数降序、同次数按字典序排序。

use std::collections::BTreeMap;

use crate::application::ports::TitleWord;
use crate::infrastructure::ipc::messages::{WordsRequest, WordsResponse};
use crate::infrastructure::ipc::{encode_response, SlotService};

/// 停用词表
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "is", "it", "of", "on", "or", "the",
    "to", "with",
];

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// 计算最常见的词
pub fn common_words(titles: &[String], limit: usize) -> Vec<TitleWord> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for title in titles {
        for token in title.split_whitespace() {
            let word: String = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if word.is_empty() || is_stopword(&word) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut words: Vec<TitleWord> = counts
        .into_iter()
        .map(|(word, count)| TitleWord { word, count })
        .collect();

    // 次数降序；BTreeMap 已保证同次数时字典序稳定
    words.sort_by(|a, b| b.count.cmp(&a.count));
    words.truncate(limit);
    words
}

/// title_words 的槽服务实现
pub struct TitleWordsService;

impl SlotService for TitleWordsService {
    fn name(&self) -> &'static str {
        super::TITLE_WORDS
    }

    fn respond(&self, raw: &str) -> String {
        let response = match serde_json::from_str::<WordsRequest>(raw) {
            Ok(request) => WordsResponse::ok(common_words(&request.titles, request.limit)),
            Err(e) => WordsResponse::failure(format!("invalid request: {}", e)),
        };
        encode_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_across_titles_case_insensitive() {
        let words = common_words(
            &titles(&["Dune Messiah", "DUNE", "Children of dune"]),
            10,
        );

        assert_eq!(words[0].word, "dune");
        assert_eq!(words[0].count, 3);
    }

    #[test]
    fn test_stopwords_discarded() {
        let words = common_words(&titles(&["The Name of the Wind"]), 10);

        let found: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert!(found.contains(&"name"));
        assert!(found.contains(&"wind"));
        assert!(!found.contains(&"the"));
        assert!(!found.contains(&"of"));
    }

    #[test]
    fn test_punctuation_stripped_from_word_edges() {
        let words = common_words(&titles(&["Dune: Part Two", "(Dune)"]), 10);
        assert_eq!(words[0].word, "dune");
        assert_eq!(words[0].count, 2);
    }

    #[test]
    fn test_limit_and_tie_ordering() {
        let words = common_words(&titles(&["bravo alpha", "bravo alpha charlie"]), 2);

        // 同次数按字典序：alpha 在 bravo 前
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "alpha");
        assert_eq!(words[1].word, "bravo");
    }

    #[test]
    fn test_empty_titles_yield_empty_words() {
        let raw = r#"{"titles":[]}"#;
        let response: WordsResponse =
            serde_json::from_str(&TitleWordsService.respond(raw)).unwrap();

        assert!(response.success);
        assert!(response.words.is_empty());
    }
}
