//! # 解析器模块
//!
//! 这个模块包含资源文档的解析与序列化功能：
//!
//! - strings.xml文档解析、顺序保持、内联标记往返
//! - 合并写回与原子替换
//!
//! # 模块组织
//!
//! - `strings` - Android字符串资源文档编解码

pub mod strings;

// Re-export commonly used items for convenience
pub use strings::{
    parse_strings_file, parse_strings_str, write_strings_file, StringEntry, StringResources,
};
