//! 翻译模块
//!
//! 把字符串资源送往LLM翻译后端的完整链路：
//! - **backlog**: 计算每个语言缺失的待翻译条目
//! - **client**: 翻译后端抽象与chat completions客户端
//! - **service**: 串行编排器（重试、回退、报告）
//! - **error**: 统一的错误类型
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use stringsync::config::SyncConfig;
//! use stringsync::locale::LocaleTarget;
//! use stringsync::parsers::parse_strings_file;
//! use stringsync::translation::{compute_backlog, LlmClient, TranslationService};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SyncConfig::load(None)?;
//! let source = parse_strings_file(&config.resolved_source_path());
//! let locale = LocaleTarget::new("de");
//! let existing = parse_strings_file(&config.target_path(&locale));
//!
//! let backlog = compute_backlog(&source, &existing, &locale);
//! let client = LlmClient::new(&config.api, config.retry.request_timeout())?;
//! let service = TranslationService::new(&client, config.retry.clone());
//! let report = service.translate_backlog(&backlog);
//! # Ok(())
//! # }
//! ```

/// 积压计算模块 - 源与目标文档的键差集
pub mod backlog;

/// 客户端模块 - 翻译后端trait与HTTP实现
pub mod client;

/// 错误处理模块 - 翻译过程的错误分类
pub mod error;

/// 编排模块 - 重试、回退与逐语言报告
pub mod service;

pub use backlog::{compute_backlog, TranslationBacklog};
pub use client::{LlmClient, TranslationBackend, TranslationRequest};
pub use error::{TranslationError, TranslationResult};
pub use service::{sanitize_model_output, TranslationReport, TranslationService};
