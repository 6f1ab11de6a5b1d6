//! Workers - 各 helper 服务的实现
//!
//! 每个模块包含该 helper 的纯操作与 `SlotService` 实现；
//! 对应的常驻进程入口在 src/bin/ 下，用同一个名字常量
//! 推导通道文件名。

pub mod data_counter;
pub mod rng_service;
pub mod text_formatter;
pub mod title_words;

/// helper 名称（兼作通道文件名前缀）
pub const TEXT_FORMATTER: &str = "text_formatter";
pub const DATA_COUNTER: &str = "data_counter";
pub const RNG_SERVICE: &str = "rng_service";
pub const TITLE_WORDS: &str = "title_words";

pub use data_counter::DataCounterService;
pub use rng_service::{LocalRandomChooser, RngService};
pub use text_formatter::TextFormatterService;
pub use title_words::TitleWordsService;
