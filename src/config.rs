//! 同步配置管理
//!
//! 提供统一的配置接口，支持配置文件（TOML/JSON）、环境变量覆盖和默认值。
//! 加载顺序：`.env`文件 → 配置文件 → `STRINGSYNC_*`环境变量 → 校验。

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::locale::LocaleTarget;
use crate::translation::error::{TranslationError, TranslationResult};

/// 配置常量
pub mod constants {
    // 默认翻译端点（本地Ollama的OpenAI兼容接口）
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434/v1";
    pub const DEFAULT_API_KEY: &str = "ollama";
    pub const DEFAULT_MODEL: &str = "gemma3:12b";

    // Android资源树的默认位置
    pub const DEFAULT_WORK_DIR: &str = "app/src/main/res";
    pub const DEFAULT_SOURCE_FILE: &str = "values/strings.xml";

    // 重试策略
    pub const DEFAULT_MAX_RETRIES: usize = 3;
    pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// 默认目标语言（BCP 47代码）
    pub const DEFAULT_TARGET_LOCALES: &[&str] = &[
        "de", "en", "es", "fr", "ja", "ko", "pt-BR", "ru", "tr", "vi", "zh-Hans", "zh-Hant",
    ];

    /// 默认排除的语言
    pub const DEFAULT_EXCLUDE_LOCALES: &[&str] = &["zh-CN"];

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "stringsync.toml",
        ".stringsync.toml",
        "~/.config/stringsync/config.toml",
    ];

    // 环境变量文件搜索路径
    pub const ENV_FILES: &[&str] = &[".env.local", ".env"];
}

/// 检查当前目录下是否存在配置文件
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS
        .iter()
        .any(|path| Path::new(shellexpand::tilde(path).as_ref()).exists())
}

/// 翻译端点配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// OpenAI兼容端点的基础URL，不含`/chat/completions`后缀
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            api_key: constants::DEFAULT_API_KEY.to_string(),
            model: constants::DEFAULT_MODEL.to_string(),
        }
    }
}

/// 重试策略配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// 首次尝试之外的最大重试次数
    pub max_retries: usize,
    pub retry_delay_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: constants::DEFAULT_MAX_RETRIES,
            retry_delay_secs: constants::DEFAULT_RETRY_DELAY_SECS,
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl RetryConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 同步运行的完整配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Android资源目录，目标`values-*`目录都在它下面
    pub work_dir: PathBuf,
    /// 源文档相对`work_dir`的路径
    pub source_file: PathBuf,
    pub target_locales: Vec<String>,
    pub exclude_locales: Vec<String>,
    pub api: ApiConfig,
    pub retry: RetryConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from(constants::DEFAULT_WORK_DIR),
            source_file: PathBuf::from(constants::DEFAULT_SOURCE_FILE),
            target_locales: constants::DEFAULT_TARGET_LOCALES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_locales: constants::DEFAULT_EXCLUDE_LOCALES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            api: ApiConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl SyncConfig {
    /// 加载配置
    ///
    /// 给定`path`时必须存在；否则按`CONFIG_PATHS`顺序查找，
    /// 找不到就用默认值。随后应用环境变量覆盖并校验。
    pub fn load(path: Option<&Path>) -> TranslationResult<Self> {
        Self::load_dotenv();

        let mut config = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(TranslationError::InvalidConfig(format!(
                        "配置文件不存在: {}",
                        p.display()
                    )));
                }
                tracing::info!("加载配置文件: {}", p.display());
                Self::load_from_file(p)?
            }
            None => Self::find_config()?,
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 按搜索路径查找配置文件
    fn find_config() -> TranslationResult<Self> {
        for path in constants::CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded);
                return Self::load_from_file(Path::new(expanded.as_ref()));
            }
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 从指定文件加载配置，按扩展名选择TOML或JSON
    fn load_from_file(path: &Path) -> TranslationResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::InvalidConfig(format!("读取配置文件失败: {e}")))?;

        if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| TranslationError::InvalidConfig(format!("解析TOML配置失败: {e}")))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| TranslationError::InvalidConfig(format!("解析JSON配置失败: {e}")))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::debug!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 应用`STRINGSYNC_*`环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{api, paths, retry, EnvVar};

        if let Ok(url) = api::ApiUrl::get() {
            tracing::info!("环境变量覆盖端点URL: {}", url);
            self.api.base_url = url;
        }

        if let Ok(key) = api::ApiKey::get() {
            self.api.api_key = key;
        }

        if let Ok(model) = api::Model::get() {
            self.api.model = model;
        }

        if let Ok(max_retries) = retry::MaxRetries::get() {
            self.retry.max_retries = max_retries;
        }

        if let Ok(delay) = retry::RetryDelay::get() {
            self.retry.retry_delay_secs = delay.as_secs();
        }

        if let Ok(timeout) = retry::RequestTimeout::get() {
            self.retry.request_timeout_secs = timeout.as_secs();
        }

        if let Ok(work_dir) = paths::WorkDir::get() {
            self.work_dir = PathBuf::from(work_dir);
        }

        if let Ok(source_file) = paths::SourceFile::get() {
            self.source_file = PathBuf::from(source_file);
        }
    }

    /// 校验配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.work_dir.as_os_str().is_empty() {
            return Err(TranslationError::InvalidConfig(
                "工作目录不能为空".to_string(),
            ));
        }

        if self.target_locales.is_empty() {
            return Err(TranslationError::InvalidConfig(
                "目标语言列表不能为空".to_string(),
            ));
        }

        if self.target_locales.iter().any(|code| code.trim().is_empty()) {
            return Err(TranslationError::InvalidConfig(
                "目标语言代码不能为空".to_string(),
            ));
        }

        let parsed = url::Url::parse(&self.api.base_url)
            .map_err(|e| TranslationError::InvalidConfig(format!("无效的端点URL: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(TranslationError::InvalidConfig(format!(
                "端点URL必须是http或https: {}",
                self.api.base_url
            )));
        }

        if self.api.model.trim().is_empty() {
            return Err(TranslationError::InvalidConfig(
                "模型名称不能为空".to_string(),
            ));
        }

        if self.retry.request_timeout_secs == 0 {
            return Err(TranslationError::InvalidConfig(
                "请求超时必须大于0".to_string(),
            ));
        }

        Ok(())
    }

    /// 源文档的完整路径
    pub fn resolved_source_path(&self) -> PathBuf {
        self.work_dir.join(&self.source_file)
    }

    /// 目标语言的strings.xml路径
    pub fn target_path(&self, locale: &LocaleTarget) -> PathBuf {
        self.work_dir.join(locale.values_dir_name()).join("strings.xml")
    }

    /// 本次运行实际处理的目标语言
    ///
    /// 目标列表减去排除列表，比较在规范化后的语言上进行，
    /// 顺序保持目标列表的顺序。
    pub fn effective_locales(&self) -> Vec<LocaleTarget> {
        let excluded: Vec<LocaleTarget> = self
            .exclude_locales
            .iter()
            .map(|code| LocaleTarget::new(code))
            .collect();

        self.target_locales
            .iter()
            .map(|code| LocaleTarget::new(code))
            .filter(|target| !excluded.contains(target))
            .collect()
    }

    /// 生成带全部默认值的示例配置（TOML）
    pub fn generate_example_config() -> TranslationResult<String> {
        toml::to_string_pretty(&Self::default())
            .map_err(|e| TranslationError::InvalidConfig(format!("序列化配置失败: {e}")))
    }
}
