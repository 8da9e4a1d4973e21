//! 翻译积压计算（增量差异引擎）
//!
//! 对比源文档与目标语言既有文档，得到本次运行需要翻译的键集合。
//! 计算是纯函数，结果按源文档顺序排列，保证诊断输出和写回顺序稳定。

use crate::locale::LocaleTarget;
use crate::parsers::strings::StringResources;

/// 某个目标语言的待翻译条目
#[derive(Debug, Clone)]
pub struct TranslationBacklog {
    pub locale: LocaleTarget,
    items: Vec<(String, String)>,
}

impl TranslationBacklog {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 按源文档顺序迭代 `(键, 源文本)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(k, _)| k.as_str())
    }
}

/// 计算目标语言的翻译积压
///
/// 积压 = 源文档中可翻译的条目 − 目标文档已有的键。
/// 空积压表示该语言已是最新，调用方应跳过翻译和写回。
pub fn compute_backlog(
    source: &StringResources,
    existing: &StringResources,
    locale: &LocaleTarget,
) -> TranslationBacklog {
    let items = source
        .iter()
        .filter(|e| e.translatable)
        .filter(|e| !existing.contains_key(&e.key))
        .map(|e| (e.key.clone(), e.content.clone()))
        .collect();

    TranslationBacklog {
        locale: locale.clone(),
        items,
    }
}
