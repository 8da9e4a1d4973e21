//! 翻译模块统一错误处理
//!
//! 超时、坏状态码、响应格式错误、网络错误是四种可区分的
//! 服务侧失败，调用方据此决定重试与回退。

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 请求超时
    #[error("请求超时")]
    Timeout,

    /// 服务返回非成功状态码
    #[error("服务返回错误状态: {status}")]
    BadStatus { status: u16 },

    /// 响应体无法按预期格式解析
    #[error("响应格式无效: {0}")]
    MalformedResponse(String),

    /// 连接建立或传输失败
    #[error("网络错误: {0}")]
    Network(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    InvalidConfig(String),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(String),
}

impl TranslationError {
    /// 检查错误是否可重试
    ///
    /// 服务侧失败（包括返回无法解析的内容）都值得重试；
    /// 配置和本地IO问题重试无意义。
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::Timeout => true,
            TranslationError::BadStatus { .. } => true,
            TranslationError::MalformedResponse(_) => true,
            TranslationError::Network(_) => true,
            TranslationError::InvalidConfig(_) => false,
            TranslationError::Io(_) => false,
        }
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(e: std::io::Error) -> Self {
        TranslationError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(e: serde_json::Error) -> Self {
        TranslationError::MalformedResponse(e.to_string())
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslationError::Timeout
        } else {
            TranslationError::Network(e.to_string())
        }
    }
}

/// 翻译操作结果类型
pub type TranslationResult<T> = Result<T, TranslationError>;
