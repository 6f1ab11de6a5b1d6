//! BookBase - TBR 图书清单管理系统
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book: 图书实体与自然键
//! - Series: 系列分组与排序
//! - Suggestion: 防剧透的系列顺序推荐规则
//!
//! 应用层 (application/):
//! - Ports: 端口定义（BookRepository, TextFormat, Counter, RandomChoice, TitleWords）
//! - Commands: CQRS 命令处理器（添加、编辑、已读/未读、删除）
//! - Queries: CQRS 查询处理器（列表、推荐、统计）
//!
//! 基础设施层 (infrastructure/):
//! - Ipc: 槽文件请求/响应协议（客户端 + worker 循环）
//! - Workers: 各 helper 服务实现（文本格式化、计数、随机、标题词频）
//! - Persistence: JSON 文件存储
//! - Fsio: 原子文件读写

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
