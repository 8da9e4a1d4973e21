//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。`STRINGSYNC_*`变量只做
//! 覆盖用途：未设置时`get()`返回错误，配置文件里的值得以保留。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "STRINGSYNC_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何非空值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 翻译端点相关环境变量
pub mod api {
    use super::*;

    /// 端点基础URL
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "STRINGSYNC_API_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str =
            "OpenAI-compatible endpoint base URL, without /chat/completions";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API URL must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// API密钥
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "STRINGSYNC_API_KEY";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "API key sent as a bearer token";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 模型名称
    pub struct Model;
    impl EnvVar<String> for Model {
        const NAME: &'static str = "STRINGSYNC_MODEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Model name passed to the chat completions endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            let model = value.trim();
            if model.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Model name cannot be empty".to_string(),
                });
            }
            Ok(model.to_string())
        }
    }
}

/// 重试策略相关环境变量
pub mod retry {
    use super::*;

    /// 最大重试次数
    pub struct MaxRetries;
    impl EnvVar<usize> for MaxRetries {
        const NAME: &'static str = "STRINGSYNC_MAX_RETRIES";
        const DEFAULT: Option<usize> = None;
        const DESCRIPTION: &'static str = "Maximum retries per entry after the first attempt";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_usize_in_range(value, Self::NAME, 0, 20)
        }
    }

    /// 重试间隔
    pub struct RetryDelay;
    impl EnvVar<Duration> for RetryDelay {
        const NAME: &'static str = "STRINGSYNC_RETRY_DELAY_SECS";
        const DEFAULT: Option<Duration> = None;
        const DESCRIPTION: &'static str = "Fixed delay between retries in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_seconds(value, Self::NAME, 0, 300)
        }
    }

    /// 单次请求超时
    pub struct RequestTimeout;
    impl EnvVar<Duration> for RequestTimeout {
        const NAME: &'static str = "STRINGSYNC_REQUEST_TIMEOUT_SECS";
        const DEFAULT: Option<Duration> = None;
        const DESCRIPTION: &'static str = "Per-request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_seconds(value, Self::NAME, 1, 600)
        }
    }
}

/// 资源路径相关环境变量
pub mod paths {
    use super::*;

    /// Android资源目录
    pub struct WorkDir;
    impl EnvVar<String> for WorkDir {
        const NAME: &'static str = "STRINGSYNC_WORK_DIR";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Android resource directory containing values-* dirs";

        fn parse(value: &str) -> EnvResult<String> {
            let dir = value.trim();
            if dir.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Directory cannot be empty".to_string(),
                });
            }
            Ok(dir.to_string())
        }
    }

    /// 源文档相对路径
    pub struct SourceFile;
    impl EnvVar<String> for SourceFile {
        const NAME: &'static str = "STRINGSYNC_SOURCE_FILE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Source strings.xml path relative to the work dir";

        fn parse(value: &str) -> EnvResult<String> {
            let path = value.trim();
            if path.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Path cannot be empty".to_string(),
                });
            }
            Ok(path.to_string())
        }
    }
}

/// 辅助函数
fn parse_usize_in_range(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid non-negative number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

fn parse_seconds(value: &str, var_name: &str, min: u64, max: u64) -> EnvResult<Duration> {
    let seconds: u64 = value.parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid number of seconds".to_string(),
    })?;

    if seconds < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {} seconds", seconds, min),
        });
    }

    if seconds > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {} seconds", seconds, max),
        });
    }

    Ok(Duration::from_secs(seconds))
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: info)\n",
        core::LogLevel::NAME,
        core::LogLevel::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        core::NoColor::NAME,
        core::NoColor::DESCRIPTION
    ));

    docs.push_str("\n## API Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {}\n",
        api::ApiUrl::NAME,
        api::ApiUrl::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        api::ApiKey::NAME,
        api::ApiKey::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        api::Model::NAME,
        api::Model::DESCRIPTION
    ));

    docs.push_str("\n## Retry Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {}\n",
        retry::MaxRetries::NAME,
        retry::MaxRetries::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        retry::RetryDelay::NAME,
        retry::RetryDelay::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        retry::RequestTimeout::NAME,
        retry::RequestTimeout::DESCRIPTION
    ));

    docs.push_str("\n## Path Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {}\n",
        paths::WorkDir::NAME,
        paths::WorkDir::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        paths::SourceFile::NAME,
        paths::SourceFile::DESCRIPTION
    ));

    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(core::LogLevel::parse("debug").unwrap(), "debug");
        assert_eq!(core::LogLevel::parse("WARN").unwrap(), "warn");
        assert!(core::LogLevel::parse("verbose").is_err());
    }

    #[test]
    fn test_url_validation() {
        assert!(api::ApiUrl::parse("http://localhost:11434/v1").is_ok());
        assert!(api::ApiUrl::parse("https://api.example.com/v1").is_ok());
        assert!(api::ApiUrl::parse("ftp://example.com").is_err());
        assert!(api::ApiUrl::parse("not-a-url").is_err());
    }

    #[test]
    fn test_retry_range_validation() {
        assert_eq!(retry::MaxRetries::parse("0").unwrap(), 0);
        assert_eq!(retry::MaxRetries::parse("5").unwrap(), 5);
        assert!(retry::MaxRetries::parse("100").is_err());
        assert!(retry::MaxRetries::parse("-1").is_err());
        assert!(retry::MaxRetries::parse("abc").is_err());
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(
            retry::RequestTimeout::parse("30").unwrap(),
            Duration::from_secs(30)
        );
        assert!(retry::RequestTimeout::parse("0").is_err());
        assert!(retry::RequestTimeout::parse("10000").is_err());
    }

    #[test]
    fn test_no_color_follows_standard() {
        assert!(core::NoColor::parse("1").unwrap());
        assert!(core::NoColor::parse("anything").unwrap());
        assert!(!core::NoColor::parse("").unwrap());
    }

    #[test]
    fn test_override_vars_error_when_unset() {
        env::remove_var("STRINGSYNC_MODEL");
        assert!(api::Model::get().is_err());

        env::set_var("STRINGSYNC_MODEL", "qwen2.5:7b");
        assert_eq!(api::Model::get().unwrap(), "qwen2.5:7b");
        env::remove_var("STRINGSYNC_MODEL");
    }

    #[test]
    fn test_env_docs_list_all_variables() {
        let docs = generate_env_docs();
        assert!(docs.contains("STRINGSYNC_API_URL"));
        assert!(docs.contains("STRINGSYNC_MAX_RETRIES"));
        assert!(docs.contains("STRINGSYNC_WORK_DIR"));
        assert!(docs.contains("NO_COLOR"));
    }
}
