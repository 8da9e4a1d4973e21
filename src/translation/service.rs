//! 翻译编排服务
//!
//! 驱动积压中的条目逐个通过翻译后端：有界重试、固定间隔、
//! 重试耗尽后回退为源文本。逐条串行处理，诊断输出按积压顺序
//! 稳定可复现。

use std::collections::HashMap;
use std::sync::LazyLock;
use std::thread;

use regex::Regex;

use super::backlog::TranslationBacklog;
use super::client::{TranslationBackend, TranslationRequest};
use super::error::TranslationResult;
use crate::config::RetryConfig;
use crate::locale::LocaleTarget;

/// Android格式化占位符，如`%s`、`%d`、`%1$s`、`%.2f`
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(?:\d+\$)?(?:\.\d+)?[sdf]").unwrap());

/// 单个语言的翻译结果报告
///
/// `translations`覆盖积压中的每一个键：失败的键以源文本顶替
/// 并记入`fallback_keys`，不会悄悄丢键。
#[derive(Debug, Clone)]
pub struct TranslationReport {
    translations: HashMap<String, String>,
    total: usize,
    fallback_keys: Vec<String>,
}

impl TranslationReport {
    pub fn translations(&self) -> &HashMap<String, String> {
        &self.translations
    }

    pub fn into_translations(self) -> HashMap<String, String> {
        self.translations
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn fallback_keys(&self) -> &[String] {
        &self.fallback_keys
    }

    pub fn fallback_count(&self) -> usize {
        self.fallback_keys.len()
    }

    /// 完成率（百分比）。空积压视为100%
    pub fn completion_rate(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        (self.total - self.fallback_keys.len()) as f32 / self.total as f32 * 100.0
    }
}

/// 串行翻译编排器
pub struct TranslationService<'a> {
    backend: &'a dyn TranslationBackend,
    retry: RetryConfig,
}

impl<'a> TranslationService<'a> {
    pub fn new(backend: &'a dyn TranslationBackend, retry: RetryConfig) -> Self {
        Self { backend, retry }
    }

    /// 翻译单个条目
    ///
    /// 可重试的失败最多再尝试`max_retries`次，每次间隔固定的
    /// `retry_delay`。重试耗尽返回最后一个错误，由调用方决定回退。
    pub fn translate_one(
        &self,
        key: &str,
        text: &str,
        locale: &LocaleTarget,
    ) -> TranslationResult<String> {
        let request = TranslationRequest { key, text, locale };
        let mut attempt = 0usize;

        loop {
            match self.backend.translate_raw(&request) {
                Ok(raw) => {
                    let cleaned = sanitize_model_output(&raw);
                    check_placeholders(key, text, &cleaned);
                    return Ok(cleaned);
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        key,
                        attempt,
                        max_retries = self.retry.max_retries,
                        error = %e,
                        "翻译请求失败，等待重试"
                    );
                    thread::sleep(self.retry.retry_delay());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// 串行翻译整个积压
    ///
    /// 按积压（源文档）顺序逐个翻译；空结果和重试耗尽的条目
    /// 回退为源文本，诊断中点名失败的键。
    pub fn translate_backlog(&self, backlog: &TranslationBacklog) -> TranslationReport {
        tracing::info!(
            locale = %backlog.locale,
            count = backlog.len(),
            "开始翻译积压"
        );

        let mut translations = HashMap::with_capacity(backlog.len());
        let mut fallback_keys = Vec::new();

        for (key, text) in backlog.iter() {
            match self.translate_one(key, text, &backlog.locale) {
                Ok(translated) if !translated.is_empty() => {
                    tracing::debug!(key, "翻译完成");
                    translations.insert(key.to_string(), translated);
                }
                Ok(_) => {
                    tracing::warn!(key, "翻译结果为空，回退为源文本");
                    translations.insert(key.to_string(), text.to_string());
                    fallback_keys.push(key.to_string());
                }
                Err(e) => {
                    tracing::error!(
                        key,
                        retries = self.retry.max_retries,
                        error = %e,
                        "翻译失败（重试已用尽），回退为源文本"
                    );
                    translations.insert(key.to_string(), text.to_string());
                    fallback_keys.push(key.to_string());
                }
            }
        }

        let report = TranslationReport {
            translations,
            total: backlog.len(),
            fallback_keys,
        };
        tracing::info!(
            locale = %backlog.locale,
            completion_rate = report.completion_rate(),
            fallbacks = report.fallback_count(),
            "积压翻译结束"
        );
        report
    }
}

/// 清理模型输出
///
/// 去除首尾空白，并将单引号转义为`\'`，避免裸撇号截断
/// Android资源字面量。不做其他修整。
pub fn sanitize_model_output(raw: &str) -> String {
    raw.trim().replace('\'', "\\'")
}

/// 占位符保留检查，仅产生诊断
fn check_placeholders(key: &str, source: &str, translated: &str) {
    let mut expected: Vec<&str> = PLACEHOLDER_RE.find_iter(source).map(|m| m.as_str()).collect();
    if expected.is_empty() {
        return;
    }
    let mut actual: Vec<&str> = PLACEHOLDER_RE
        .find_iter(translated)
        .map(|m| m.as_str())
        .collect();
    expected.sort_unstable();
    actual.sort_unstable();
    if expected != actual {
        tracing::warn!(
            key,
            expected = ?expected,
            actual = ?actual,
            "翻译结果中的格式化占位符与原文不一致"
        );
    }
}
