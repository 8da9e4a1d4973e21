// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use stringsync::config::{RetryConfig, SyncConfig};
use stringsync::translation::{TranslationBackend, TranslationRequest, TranslationResult};

/// 临时的Android资源树
///
/// 在临时目录下搭建`res/values*/strings.xml`布局，
/// 随`TempDir`一起自动清理。
pub struct ResourceTree {
    dir: TempDir,
}

impl ResourceTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// 资源根目录（相当于`app/src/main/res`）
    pub fn res_path(&self) -> PathBuf {
        self.dir.path().join("res")
    }

    pub fn write_source(&self, xml: &str) {
        let values = self.res_path().join("values");
        fs::create_dir_all(&values).expect("create values dir");
        fs::write(values.join("strings.xml"), xml).expect("write source file");
    }

    pub fn write_target(&self, values_dir: &str, xml: &str) {
        let dir = self.res_path().join(values_dir);
        fs::create_dir_all(&dir).expect("create target dir");
        fs::write(dir.join("strings.xml"), xml).expect("write target file");
    }

    pub fn target_file(&self, values_dir: &str) -> PathBuf {
        self.res_path().join(values_dir).join("strings.xml")
    }

    pub fn read_target(&self, values_dir: &str) -> String {
        fs::read_to_string(self.target_file(values_dir)).expect("read target file")
    }
}

/// 面向测试的同步配置：指向临时资源树，重试间隔为零
pub fn test_config(tree: &ResourceTree, locales: &[&str]) -> SyncConfig {
    let mut config = SyncConfig::default();
    config.work_dir = tree.res_path();
    config.target_locales = locales.iter().map(|s| s.to_string()).collect();
    config.exclude_locales.clear();
    config.retry = RetryConfig {
        max_retries: 1,
        retry_delay_secs: 0,
        request_timeout_secs: 5,
    };
    config
}

/// 可脚本化的模拟翻译后端
///
/// 为指定键排入预设结果队列；未命中脚本的请求返回
/// 形如`[de] Hello`的确定性译文。所有调用都会被记录。
pub struct MockBackend {
    scripted: RefCell<HashMap<String, Vec<TranslationResult<String>>>>,
    calls: RefCell<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            scripted: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// 为某个键排入按顺序消费的结果
    pub fn script(self, key: &str, results: Vec<TranslationResult<String>>) -> Self {
        self.scripted.borrow_mut().insert(key.to_string(), results);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_for(&self, key: &str) -> usize {
        self.calls.borrow().iter().filter(|k| *k == key).count()
    }
}

impl TranslationBackend for MockBackend {
    fn translate_raw(&self, request: &TranslationRequest<'_>) -> TranslationResult<String> {
        self.calls.borrow_mut().push(request.key.to_string());

        if let Some(queue) = self.scripted.borrow_mut().get_mut(request.key) {
            if !queue.is_empty() {
                return queue.remove(0);
            }
        }

        Ok(format!("[{}] {}", request.locale.code(), request.text))
    }
}

/// 含可翻译与不可翻译条目的最小源文档
pub fn simple_source_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="hello">Hello</string>
    <string name="app_name" translatable="false">Demo</string>
</resources>
"#
}
