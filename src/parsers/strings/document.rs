//! strings.xml 文档模型与解析
//!
//! 将Android字符串资源文件解析为保持文档顺序的内存模型。
//! 每个`<string>`条目的内容按"内部序列化形式"提取：直接文本加上
//! 嵌套子元素的原始XML，保证`<b>`等内联标记在多次读写循环中不丢失。

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// 单个字符串资源条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    /// `name`属性，文档内唯一
    pub key: String,
    /// 条目内容。纯文本条目存放解码后的文本；
    /// 含内联标记的条目存放原始内部XML（实体保持转义形态）
    pub content: String,
    /// `translatable`属性，缺省为可翻译
    pub translatable: bool,
}

/// 解析后的strings.xml文档
///
/// 条目按文档出现顺序保存，并带按键索引；重复键保留首次出现的位置，
/// 内容以后出现者为准。
#[derive(Debug, Clone, Default)]
pub struct StringResources {
    entries: Vec<StringEntry>,
    index: HashMap<String, usize>,
}

impl StringResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: StringEntry) {
        match self.index.get(&entry.key) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&StringEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn content(&self, key: &str) -> Option<&str> {
        self.get(key).map(|e| e.content.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按文档顺序迭代条目
    pub fn iter(&self) -> impl Iterator<Item = &StringEntry> {
        self.entries.iter()
    }

    /// 可翻译条目的键，按文档顺序。写回目标文件时作为排序依据
    pub fn translatable_order(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.translatable)
            .map(|e| e.key.clone())
            .collect()
    }

    /// 不可翻译条目数量
    pub fn non_translatable_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.translatable).count()
    }
}

/// 解析strings.xml文件
///
/// 文件不存在等价于"尚无翻译"，返回空文档；内容无法解析时同样
/// 返回空文档并记录警告，调用方无需区分这两种情况。
pub fn parse_strings_file(path: &Path) -> StringResources {
    if !path.exists() {
        return StringResources::new();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "读取资源文件失败，按空文档处理");
            return StringResources::new();
        }
    };

    match parse_strings_str(&content) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "解析XML失败，按空文档处理");
            StringResources::new()
        }
    }
}

/// 解析strings.xml文本
///
/// 只识别`<resources>`根元素的直接`<string>`子元素；`<plurals>`、
/// `<string-array>`等其他资源类型会被跳过。缺少`name`属性的条目忽略。
pub fn parse_strings_str(xml: &str) -> Result<StringResources, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut doc = StringResources::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 1 && e.name().as_ref() == b"string" {
                    let (key, translatable) = read_entry_attributes(&e)?;
                    let span = reader.read_to_end(e.name())?;
                    let raw = &xml[span.start as usize..span.end as usize];
                    if let Some(key) = key {
                        doc.insert(StringEntry {
                            key,
                            content: normalize_inner(raw)?,
                            translatable,
                        });
                    }
                } else {
                    depth += 1;
                }
            }
            Event::Empty(e) => {
                if depth == 1 && e.name().as_ref() == b"string" {
                    let (key, translatable) = read_entry_attributes(&e)?;
                    if let Some(key) = key {
                        doc.insert(StringEntry {
                            key,
                            content: String::new(),
                            translatable,
                        });
                    }
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(doc)
}

/// 读取`name`与`translatable`属性
fn read_entry_attributes(
    elem: &BytesStart<'_>,
) -> Result<(Option<String>, bool), quick_xml::Error> {
    let mut key = None;
    let mut translatable = true;

    for attr in elem.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"name" => {
                let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
                if !value.is_empty() {
                    key = Some(value.into_owned());
                }
            }
            b"translatable" => {
                translatable = !attr.value.as_ref().eq_ignore_ascii_case(b"false");
            }
            _ => {}
        }
    }

    Ok((key, translatable))
}

/// 规范化条目内部内容
///
/// 不含标签的条目解码XML实体，得到纯文本；含标签的条目保持原始
/// 内部XML不变，序列化时按标记片段原样写回。
fn normalize_inner(raw: &str) -> Result<String, quick_xml::Error> {
    if raw.contains('<') {
        Ok(raw.to_string())
    } else {
        let text = unescape(raw).map_err(quick_xml::Error::from)?;
        Ok(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="hello">Hello</string>
    <string name="app_name" translatable="false">MyApp</string>
    <string name="styled">Hello <b>World</b>!</string>
    <string name="amp">Tom &amp; Jerry</string>
    <string name="empty"></string>
</resources>
"#;

    #[test]
    fn test_parse_keeps_document_order() {
        let doc = parse_strings_str(SAMPLE).unwrap();
        let keys: Vec<&str> = doc.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["hello", "app_name", "styled", "amp", "empty"]);
    }

    #[test]
    fn test_parse_translatable_attribute() {
        let doc = parse_strings_str(SAMPLE).unwrap();
        assert!(doc.get("hello").unwrap().translatable);
        assert!(!doc.get("app_name").unwrap().translatable);
        assert_eq!(doc.non_translatable_count(), 1);
    }

    #[test]
    fn test_parse_preserves_inline_markup() {
        let doc = parse_strings_str(SAMPLE).unwrap();
        assert_eq!(doc.content("styled"), Some("Hello <b>World</b>!"));
    }

    #[test]
    fn test_parse_decodes_plain_text_entities() {
        let doc = parse_strings_str(SAMPLE).unwrap();
        assert_eq!(doc.content("amp"), Some("Tom & Jerry"));
    }

    #[test]
    fn test_parse_empty_and_self_closing_entries() {
        let doc = parse_strings_str(
            r#"<resources><string name="a"></string><string name="b"/></resources>"#,
        )
        .unwrap();
        assert_eq!(doc.content("a"), Some(""));
        assert_eq!(doc.content("b"), Some(""));
    }

    #[test]
    fn test_parse_skips_other_resource_types() {
        let doc = parse_strings_str(
            r#"<resources>
                <string name="a">A</string>
                <plurals name="songs"><item quantity="one">song</item></plurals>
                <string-array name="colors"><item>red</item></string-array>
            </resources>"#,
        )
        .unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.contains_key("a"));
    }

    #[test]
    fn test_parse_skips_entries_without_name() {
        let doc = parse_strings_str(r#"<resources><string>orphan</string></resources>"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_duplicate_key_keeps_first_position_last_content() {
        let doc = parse_strings_str(
            r#"<resources>
                <string name="a">first</string>
                <string name="b">B</string>
                <string name="a">second</string>
            </resources>"#,
        )
        .unwrap();
        let keys: Vec<&str> = doc.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(doc.content("a"), Some("second"));
    }

    #[test]
    fn test_parse_malformed_document_is_error() {
        assert!(parse_strings_str("<resources><string name=\"a\">x</resources>").is_err());
    }

    #[test]
    fn test_parse_missing_file_yields_empty_document() {
        let doc = parse_strings_file(Path::new("/nonexistent/values/strings.xml"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_translatable_order_excludes_non_translatable() {
        let doc = parse_strings_str(SAMPLE).unwrap();
        assert_eq!(doc.translatable_order(), ["hello", "styled", "amp", "empty"]);
    }
}
