//! RNG Service - 随机选择 helper
//!
//! 从候选列表中均匀随机选一项；空列表返回失败响应，
//! 绝不产生未定义的选择。同一套选择逻辑也提供进程内实现
//! （`LocalRandomChooser`），供不委托 worker 的配置使用。

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::application::ports::{HelperError, RandomChoicePort};
use crate::domain::Book;
use crate::infrastructure::ipc::messages::{ChoiceRequest, ChoiceResponse};
use crate::infrastructure::ipc::{encode_response, SlotService};

/// 均匀随机选一项，空切片返回 None
pub fn choose_uniform<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::thread_rng())
}

/// rng_service 的槽服务实现
pub struct RngService;

impl SlotService for RngService {
    fn name(&self) -> &'static str {
        super::RNG_SERVICE
    }

    fn respond(&self, raw: &str) -> String {
        let response = match serde_json::from_str::<ChoiceRequest>(raw) {
            Ok(request) => match choose_uniform(&request.items) {
                Some(choice) => ChoiceResponse::ok(choice.clone()),
                None => ChoiceResponse::failure("empty candidate list"),
            },
            Err(e) => ChoiceResponse::failure(format!("invalid request: {}", e)),
        };
        encode_response(&response)
    }
}

/// 进程内随机选择
///
/// 均匀性契约与 rng worker 相同，仅省去通道往返。
pub struct LocalRandomChooser;

#[async_trait]
impl RandomChoicePort for LocalRandomChooser {
    async fn choose(&self, candidates: &[Book]) -> Result<Book, HelperError> {
        choose_uniform(candidates)
            .cloned()
            .ok_or_else(|| HelperError::Service("empty candidate list".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_comes_from_candidates() {
        let items = vec!["a", "b", "c"];
        for _ in 0..20 {
            let choice = choose_uniform(&items).unwrap();
            assert!(items.contains(choice));
        }
    }

    #[test]
    fn test_single_candidate_always_chosen() {
        let items = vec![42];
        assert_eq!(choose_uniform(&items), Some(&42));
    }

    #[test]
    fn test_empty_slice_yields_none() {
        let items: Vec<i32> = Vec::new();
        assert_eq!(choose_uniform(&items), None);
    }

    #[test]
    fn test_empty_request_is_failure_response() {
        let raw = r#"{"items":[]}"#;
        let response: ChoiceResponse = serde_json::from_str(&RngService.respond(raw)).unwrap();

        assert!(!response.success);
        assert!(response.choice.is_none());
        assert_eq!(response.error, "empty candidate list");
    }

    #[test]
    fn test_choice_echoes_arbitrary_json_values() {
        let raw = r#"{"items":[{"title":"Dune","author":"Herbert"}]}"#;
        let response: ChoiceResponse = serde_json::from_str(&RngService.respond(raw)).unwrap();

        assert!(response.success);
        let choice = response.choice.unwrap();
        assert_eq!(choice["title"], "Dune");
    }

    #[tokio::test]
    async fn test_local_chooser_empty_candidates() {
        let err = LocalRandomChooser.choose(&[]).await.unwrap_err();
        assert!(matches!(err, HelperError::Service(_)));
    }
}
