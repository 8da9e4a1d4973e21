//! strings.xml 序列化与写回
//!
//! 将合并后的键值映射写成带固定声明头、4空格缩进的资源文档。
//! 含内联标记的内容先做片段合法性检查，合法则原样写回，否则整体
//! 按字面文本转义。写入通过临时文件加改名完成，目标文件不会出现
//! 半写状态。

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tempfile::NamedTempFile;

use super::document::parse_strings_file;
use crate::core::SyncError;

/// 合并写回strings.xml
///
/// 先解析既有文档（缺失或损坏按空文档处理），用`new_values`覆盖同名键，
/// 再按`source_order`给出的顺序序列化；不在顺序表中的键按字典序追加。
/// 未给出顺序表时全部按字典序输出。整个文件会被完整替换。
pub fn write_strings_file(
    path: &Path,
    new_values: &HashMap<String, String>,
    source_order: Option<&[String]>,
) -> Result<(), SyncError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| {
                SyncError::new(&format!("创建目录失败 {}: {}", parent.display(), e))
            })?;
            parent
        }
        _ => Path::new("."),
    };

    let existing = parse_strings_file(path);
    let mut merged: HashMap<String, String> = existing
        .iter()
        .map(|e| (e.key.clone(), e.content.clone()))
        .collect();
    for (key, value) in new_values {
        merged.insert(key.clone(), value.clone());
    }

    let document = serialize_resources(&merged, source_order)?;

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| SyncError::new(&format!("创建临时文件失败: {e}")))?;
    tmp.write_all(&document)
        .map_err(|e| SyncError::new(&format!("写入临时文件失败: {e}")))?;
    tmp.persist(path).map_err(|e| {
        SyncError::new(&format!("替换资源文件失败 {}: {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), entries = merged.len(), "资源文件已写入");
    Ok(())
}

/// 序列化为完整文档字节
fn serialize_resources(
    merged: &HashMap<String, String>,
    source_order: Option<&[String]>,
) -> Result<Vec<u8>, SyncError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| SyncError::new(&format!("写入XML声明失败: {e}")))?;
    writer
        .write_event(Event::Start(BytesStart::new("resources")))
        .map_err(|e| SyncError::new(&format!("写入根元素失败: {e}")))?;

    for key in ordered_keys(merged, source_order) {
        if let Some(content) = merged.get(&key) {
            write_string_entry(&mut writer, &key, content)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("resources")))
        .map_err(|e| SyncError::new(&format!("写入根元素失败: {e}")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// 序列化顺序：顺序表中的键优先，其余按字典序
fn ordered_keys(merged: &HashMap<String, String>, source_order: Option<&[String]>) -> Vec<String> {
    match source_order {
        Some(order) => {
            let mut keys: Vec<String> = order
                .iter()
                .filter(|k| merged.contains_key(k.as_str()))
                .cloned()
                .collect();
            let ordered: HashSet<&str> = order.iter().map(|k| k.as_str()).collect();
            let mut extras: Vec<String> = merged
                .keys()
                .filter(|k| !ordered.contains(k.as_str()))
                .cloned()
                .collect();
            extras.sort();
            keys.extend(extras);
            keys
        }
        None => {
            let mut keys: Vec<String> = merged.keys().cloned().collect();
            keys.sort();
            keys
        }
    }
}

fn write_string_entry(
    writer: &mut Writer<Vec<u8>>,
    key: &str,
    content: &str,
) -> Result<(), SyncError> {
    let mut elem = BytesStart::new("string");
    elem.push_attribute(("name", key));
    writer
        .write_event(Event::Start(elem))
        .map_err(|e| SyncError::new(&format!("写入条目失败 {key}: {e}")))?;

    // 含标记的内容先验证片段合法性，合法则原样写回；
    // 验证失败时回退为转义后的字面文本，绝不让坏片段中断整次写入
    let text = if content.contains('<') && content.contains('>') && fragment_is_well_formed(content)
    {
        BytesText::from_escaped(content)
    } else {
        BytesText::new(content)
    };
    writer
        .write_event(Event::Text(text))
        .map_err(|e| SyncError::new(&format!("写入条目失败 {key}: {e}")))?;
    writer
        .write_event(Event::End(BytesEnd::new("string")))
        .map_err(|e| SyncError::new(&format!("写入条目失败 {key}: {e}")))?;
    Ok(())
}

/// 判断内容是否为合法的XML片段
///
/// 标签必须配对、属性可解析、文本实体可解码。片段允许有多个
/// 顶层兄弟节点（例如`a<b>x</b>c`）。
fn fragment_is_well_formed(fragment: &str) -> bool {
    let mut reader = Reader::from_str(fragment);
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.attributes().any(|a| a.is_err()) {
                    return false;
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                if e.attributes().any(|a| a.is_err()) {
                    return false;
                }
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Ok(Event::Text(t)) => {
                if t.unescape().is_err() {
                    return false;
                }
            }
            Ok(Event::Eof) => return depth == 0,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
}
