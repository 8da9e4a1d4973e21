use std::error::Error;
use std::fmt;

use crate::config::SyncConfig;
use crate::locale::LocaleTarget;
use crate::parsers::{parse_strings_file, parse_strings_str, write_strings_file};
use crate::translation::{compute_backlog, TranslationBackend, TranslationService};

/// Represents errors that can occur during a sync run
///
/// This error type encapsulates all possible errors that can occur
/// when synchronizing string resources with the stringsync library.
#[derive(Debug)]
pub struct SyncError {
    details: String,
}

impl SyncError {
    /// Creates a new SyncError with the given message
    ///
    /// # Arguments
    ///
    /// * `msg` - The error message describing what went wrong
    ///
    /// # Returns
    ///
    /// A new SyncError instance
    pub fn new(msg: &str) -> SyncError {
        SyncError {
            details: msg.to_string(),
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Error for SyncError {
    fn description(&self) -> &str {
        &self.details
    }
}

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// 单个目标语言的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum LocaleStatus {
    /// 翻译并写回成功
    Synced { translated: usize, fallbacks: usize },
    /// 没有缺失的条目，未触碰目标文件
    UpToDate,
    /// 写回失败，目标文件保持原样
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct LocaleOutcome {
    pub locale: LocaleTarget,
    pub status: LocaleStatus,
}

/// 一次完整同步运行的汇总
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub outcomes: Vec<LocaleOutcome>,
}

impl SyncReport {
    pub fn synced_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, LocaleStatus::Synced { .. }))
            .count()
    }

    pub fn up_to_date_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == LocaleStatus::UpToDate)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, LocaleStatus::Failed(_)))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

/// Synchronizes every configured target locale against the source document
///
/// 源文档缺失或无法解析时整个运行中止。单个语言的失败只记录在
/// 该语言的结果里，循环继续处理剩余语言。没有缺失条目的语言
/// 不会被写回。
pub fn sync_locales(
    config: &SyncConfig,
    backend: &dyn TranslationBackend,
) -> Result<SyncReport, SyncError> {
    let source_path = config.resolved_source_path();
    if !source_path.exists() {
        return Err(SyncError::new(&format!(
            "源文档不存在: {}",
            source_path.display()
        )));
    }

    let xml = std::fs::read_to_string(&source_path)
        .map_err(|e| SyncError::new(&format!("读取源文档失败: {e}")))?;
    let source = parse_strings_str(&xml)
        .map_err(|e| SyncError::new(&format!("解析源文档失败: {e}")))?;

    tracing::info!(
        source = %source_path.display(),
        entries = source.len(),
        translatable = source.len() - source.non_translatable_count(),
        "已加载源文档"
    );

    let source_order = source.translatable_order();
    let service = TranslationService::new(backend, config.retry.clone());
    let mut report = SyncReport::default();

    for locale in config.effective_locales() {
        let target_path = config.target_path(&locale);
        let existing = parse_strings_file(&target_path);
        let backlog = compute_backlog(&source, &existing, &locale);

        if backlog.is_empty() {
            tracing::info!(locale = %locale, "没有缺失的条目，跳过");
            report.outcomes.push(LocaleOutcome {
                locale,
                status: LocaleStatus::UpToDate,
            });
            continue;
        }

        tracing::info!(
            locale = %locale,
            missing = backlog.len(),
            existing = existing.len(),
            "发现缺失条目"
        );

        let locale_report = service.translate_backlog(&backlog);
        let fallbacks = locale_report.fallback_count();
        let translated = locale_report.total() - fallbacks;

        match write_strings_file(&target_path, locale_report.translations(), Some(&source_order)) {
            Ok(()) => {
                tracing::info!(
                    locale = %locale,
                    path = %target_path.display(),
                    translated,
                    fallbacks,
                    "已写回目标文档"
                );
                report.outcomes.push(LocaleOutcome {
                    locale,
                    status: LocaleStatus::Synced {
                        translated,
                        fallbacks,
                    },
                });
            }
            Err(e) => {
                tracing::error!(locale = %locale, error = %e, "写入目标文档失败");
                report.outcomes.push(LocaleOutcome {
                    locale,
                    status: LocaleStatus::Failed(e.to_string()),
                });
            }
        }
    }

    Ok(report)
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}
