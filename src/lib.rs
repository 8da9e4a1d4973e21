//! # Stringsync Library
//!
//! 增量同步Android字符串资源的工具库：解析`strings.xml`、
//! 计算每个目标语言缺失的条目、通过OpenAI兼容端点翻译，
//! 再按源文档顺序写回。
//!
//! ## 模块组织
//!
//! - `core` - 同步运行控制器和错误类型
//! - `config` - 配置加载、环境变量覆盖与校验
//! - `env` - 类型安全的环境变量定义
//! - `locale` - BCP 47语言代码与`values-*`目录的映射
//! - `parsers` - `strings.xml`的解析与序列化
//! - `translation` - 积压计算、翻译后端与编排器

pub mod config;
pub mod core;
pub mod env;
pub mod locale;
pub mod parsers;
pub mod translation;

// Re-export commonly used items for convenience
pub use core::*;
pub use parsers::*;
