//! Android字符串资源文档编解码
//!
//! 子模块分工：
//!
//! - `document`: 文档模型与解析
//! - `serializer`: 合并写回与片段校验

pub mod document;
pub mod serializer;

pub use document::{parse_strings_file, parse_strings_str, StringEntry, StringResources};
pub use serializer::write_strings_file;
