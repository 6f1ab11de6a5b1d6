//! Text Formatter - 文本转换 helper
//!
//! 操作集：upper / lower / title / clean。
//! title 采用"每个字母连续段首字母大写、其余小写"的规则，
//! 非字母字符都是边界（"j.r.r. tolkien" → "J.R.R. Tolkien"）。
//! clean 移除所有既非字母数字也非空白的字符，幂等。

use crate::application::ports::TextFormat;
use crate::infrastructure::ipc::messages::{FormatRequest, FormatResponse};
use crate::infrastructure::ipc::{encode_response, SlotService};

/// 应用指定的文本转换
pub fn format_text(text: &str, format: TextFormat) -> String {
    match format {
        TextFormat::Upper => text.to_uppercase(),
        TextFormat::Lower => text.to_lowercase(),
        TextFormat::Title => title_case(text),
        TextFormat::Clean => clean(text),
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// text_formatter 的槽服务实现
pub struct TextFormatterService;

impl SlotService for TextFormatterService {
    fn name(&self) -> &'static str {
        super::TEXT_FORMATTER
    }

    fn respond(&self, raw: &str) -> String {
        let response = match serde_json::from_str::<FormatRequest>(raw) {
            Ok(request) => FormatResponse::ok(format_text(&request.text, request.format)),
            Err(e) => FormatResponse::failure(format!("invalid request: {}", e)),
        };
        encode_response(&response)
    }
}
