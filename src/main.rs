//! 命令行入口
//!
//! 加载配置、构建翻译客户端，随后串行同步所有目标语言。

use std::path::PathBuf;
use std::process;

use clap::Parser;

use stringsync::config::SyncConfig;
use stringsync::core::{print_error_message, print_info_message, sync_locales, LocaleStatus};
use stringsync::env::{core as env_core, generate_env_docs, EnvVar};
use stringsync::parsers::{parse_strings_file, parse_strings_str};
use stringsync::translation::{compute_backlog, LlmClient};

#[derive(Parser)]
#[command(
    name = "stringsync",
    version,
    about = "Incrementally translate Android strings.xml resources through an OpenAI-compatible endpoint"
)]
struct Cli {
    /// Path to a TOML or JSON config file (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Android resource directory containing the values-* dirs
    #[arg(short, long)]
    work_dir: Option<PathBuf>,

    /// Target locales (BCP 47, comma-separated), replacing the configured list
    #[arg(short, long, value_delimiter = ',')]
    locales: Vec<String>,

    /// Additional locales to exclude from this run
    #[arg(short, long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Model name passed to the chat completions endpoint
    #[arg(short, long)]
    model: Option<String>,

    /// List missing entries per locale without contacting the backend
    #[arg(long)]
    dry_run: bool,

    /// Print an example TOML config and exit
    #[arg(long)]
    generate_config: bool,

    /// Print environment variable documentation and exit
    #[arg(long)]
    env_help: bool,
}

fn main() {
    let cli = Cli::parse();

    init_logging();

    if cli.generate_config {
        match SyncConfig::generate_example_config() {
            Ok(rendered) => {
                print_info_message(&rendered);
                return;
            }
            Err(e) => {
                report_error(&e.to_string());
                process::exit(1);
            }
        }
    }

    if cli.env_help {
        print_info_message(&generate_env_docs());
        return;
    }

    match run(cli) {
        Ok(failed_locales) => {
            if failed_locales {
                process::exit(1);
            }
        }
        Err(msg) => {
            report_error(&msg);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<bool, String> {
    let mut config = SyncConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    if let Some(dir) = cli.work_dir {
        config.work_dir = dir;
    }
    if !cli.locales.is_empty() {
        config.target_locales = cli.locales;
    }
    if !cli.exclude.is_empty() {
        config.exclude_locales.extend(cli.exclude);
    }
    if let Some(model) = cli.model {
        config.api.model = model;
    }
    config.validate().map_err(|e| e.to_string())?;

    if cli.dry_run {
        dry_run(&config)?;
        return Ok(false);
    }

    let client =
        LlmClient::new(&config.api, config.retry.request_timeout()).map_err(|e| e.to_string())?;
    let report = sync_locales(&config, &client).map_err(|e| e.to_string())?;

    for outcome in &report.outcomes {
        match &outcome.status {
            LocaleStatus::Synced {
                translated,
                fallbacks,
            } => print_info_message(&format!(
                "{}: {} translated, {} fallbacks",
                outcome.locale, translated, fallbacks
            )),
            LocaleStatus::UpToDate => {
                print_info_message(&format!("{}: up to date", outcome.locale))
            }
            LocaleStatus::Failed(msg) => report_error(&format!("{}: {}", outcome.locale, msg)),
        }
    }

    print_info_message(&format!(
        "Done: {} synced, {} up to date, {} failed",
        report.synced_count(),
        report.up_to_date_count(),
        report.failed_count()
    ));

    Ok(report.has_failures())
}

/// 只列出每个语言缺失的键，不调用后端
fn dry_run(config: &SyncConfig) -> Result<(), String> {
    let source_path = config.resolved_source_path();
    if !source_path.exists() {
        return Err(format!("源文档不存在: {}", source_path.display()));
    }

    let xml = std::fs::read_to_string(&source_path).map_err(|e| format!("读取源文档失败: {e}"))?;
    let source = parse_strings_str(&xml).map_err(|e| format!("解析源文档失败: {e}"))?;

    for locale in config.effective_locales() {
        let existing = parse_strings_file(&config.target_path(&locale));
        let backlog = compute_backlog(&source, &existing, &locale);

        if backlog.is_empty() {
            print_info_message(&format!("{locale}: up to date"));
        } else {
            print_info_message(&format!("{locale}: {} missing", backlog.len()));
            for key in backlog.keys() {
                print_info_message(&format!("  {key}"));
            }
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let default_level = env_core::LogLevel::get().unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stringsync={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report_error(msg: &str) {
    let colored =
        atty::is(atty::Stream::Stderr) && !env_core::NoColor::get_or_default(false);
    if colored {
        print_error_message(msg);
    } else {
        eprintln!("{msg}");
    }
}
