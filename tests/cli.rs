//! 命令行集成测试
//!
//! 通过真实二进制检验帮助输出、示例配置生成和错误退出码。
//! 这些用例都不接触网络。

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;

/// 帮助信息描述工具用途
#[test]
fn test_help_mentions_resources() {
    let output = Command::cargo_bin("stringsync")
        .expect("binary should build")
        .arg("--help")
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("strings.xml"), "help should describe the tool: {stdout}");
    assert!(stdout.contains("--dry-run"), "help should list flags: {stdout}");

    println!("✅ 帮助输出测试通过");
}

/// --generate-config 输出可直接使用的TOML示例
#[test]
fn test_generate_config_prints_example() {
    let output = Command::cargo_bin("stringsync")
        .expect("binary should build")
        .arg("--generate-config")
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("base_url"), "example config should list the endpoint: {stdout}");
    assert!(stdout.contains("target_locales"), "example config should list locales: {stdout}");

    println!("✅ 示例配置生成测试通过");
}

/// --env-help 列出全部环境变量
#[test]
fn test_env_help_lists_variables() {
    let output = Command::cargo_bin("stringsync")
        .expect("binary should build")
        .arg("--env-help")
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("STRINGSYNC_API_URL"));
    assert!(stdout.contains("STRINGSYNC_WORK_DIR"));

    println!("✅ 环境变量帮助测试通过");
}

/// 源文档缺失时以非零退出码中止
#[test]
fn test_missing_source_aborts_with_error() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let output = Command::cargo_bin("stringsync")
        .expect("binary should build")
        .arg("--work-dir")
        .arg(dir.path())
        .output()
        .expect("run binary");

    assert!(!output.status.success(), "missing source must abort the run");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("源文档不存在"), "error should name the cause: {stderr}");

    println!("✅ 缺失源文档中止测试通过");
}

/// --dry-run 只列出缺失的键，不写任何文件
#[test]
fn test_dry_run_lists_missing_keys() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let values = dir.path().join("values");
    fs::create_dir_all(&values).expect("create values dir");
    fs::write(
        values.join("strings.xml"),
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n    <string name=\"hello\">Hello</string>\n</resources>\n",
    )
    .expect("write source");

    let output = Command::cargo_bin("stringsync")
        .expect("binary should build")
        .arg("--work-dir")
        .arg(dir.path())
        .args(["--locales", "de", "--dry-run"])
        .output()
        .expect("run binary");

    assert!(output.status.success(), "dry run should succeed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("de: 1 missing"), "dry run should count the backlog: {stdout}");
    assert!(stdout.contains("hello"), "dry run should list missing keys: {stdout}");
    assert!(
        !dir.path().join("values-de").exists(),
        "dry run must not create target directories"
    );

    println!("✅ 干跑模式测试通过");
}
