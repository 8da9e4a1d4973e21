//! 语言区域标识与Android资源目录映射
//!
//! 负责ISO语言代码(`de`、`pt-BR`、`zh-Hans`)与Android资源目录名
//! (`values-de`、`values-pt-rBR`、`values-zh-rHans`)之间的双向转换，
//! 以及提示词中使用的语言显示名称。

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// 常用语言的本地化显示名称，未收录的语言回退为大写代码
static LANGUAGE_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("ar", "العربية"),
        ("de", "Deutsch"),
        ("en", "English"),
        ("es", "Español"),
        ("fr", "Français"),
        ("id", "Bahasa Indonesia"),
        ("it", "Italiano"),
        ("ja", "日本語"),
        ("ko", "한국어"),
        ("nl", "Nederlands"),
        ("pl", "Polski"),
        ("pt", "Português"),
        ("pt-BR", "Português (Brasil)"),
        ("pt-PT", "Português (Portugal)"),
        ("ru", "Русский"),
        ("th", "ไทย"),
        ("tr", "Türkçe"),
        ("uk", "Українська"),
        ("vi", "Tiếng Việt"),
        ("zh-CN", "简体中文"),
        ("zh-Hans", "简体中文"),
        ("zh-Hant", "繁體中文"),
        ("zh-TW", "繁體中文"),
    ])
});

/// 目标语言标识
///
/// 由语言子标签和可选的地区/文字子标签组成。构造时会做规范化：
/// 语言部分转小写，两位字母的地区子标签转大写，其余子标签
/// (如`Hans`这类文字代码)保持原样，保证目录名映射可以精确还原。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTarget {
    language: String,
    subtag: Option<String>,
}

impl LocaleTarget {
    pub fn new(code: &str) -> Self {
        match code.split_once('-') {
            Some((lang, sub)) => {
                let subtag = if sub.len() == 2 {
                    sub.to_uppercase()
                } else {
                    sub.to_string()
                };
                Self {
                    language: lang.to_lowercase(),
                    subtag: Some(subtag),
                }
            }
            None => Self {
                language: code.to_lowercase(),
                subtag: None,
            },
        }
    }

    /// 规范化后的完整语言代码，如`pt-BR`
    pub fn code(&self) -> String {
        match &self.subtag {
            Some(sub) => format!("{}-{}", self.language, sub),
            None => self.language.clone(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// 对应的Android资源目录名
    ///
    /// 带子标签的代码使用`values-<lang>-r<SUB>`形式，否则为`values-<lang>`。
    /// 与[`locale_from_values_dir`]互为精确逆映射。
    pub fn values_dir_name(&self) -> String {
        match &self.subtag {
            Some(sub) => format!("values-{}-r{}", self.language, sub),
            None => format!("values-{}", self.language),
        }
    }

    /// 提示词中使用的语言显示名称
    pub fn display_name(&self) -> String {
        let code = self.code();
        if let Some(name) = LANGUAGE_NAMES.get(code.as_str()) {
            return (*name).to_string();
        }
        if let Some(name) = LANGUAGE_NAMES.get(self.language.as_str()) {
            return (*name).to_string();
        }
        code.to_uppercase()
    }
}

impl fmt::Display for LocaleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 从Android资源目录名还原语言标识
///
/// `values`目录本身是源语言目录，不对应任何目标语言，返回`None`。
pub fn locale_from_values_dir(dir_name: &str) -> Option<LocaleTarget> {
    let code = dir_name.strip_prefix("values-")?;
    if code.is_empty() {
        return None;
    }
    match code.split_once("-r") {
        Some((lang, sub)) if !lang.is_empty() && !sub.is_empty() => {
            Some(LocaleTarget::new(&format!("{lang}-{sub}")))
        }
        _ => Some(LocaleTarget::new(code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_dir_name_plain_language() {
        assert_eq!(LocaleTarget::new("de").values_dir_name(), "values-de");
        assert_eq!(LocaleTarget::new("ja").values_dir_name(), "values-ja");
    }

    #[test]
    fn test_values_dir_name_with_region() {
        assert_eq!(LocaleTarget::new("pt-BR").values_dir_name(), "values-pt-rBR");
        assert_eq!(LocaleTarget::new("zh-Hans").values_dir_name(), "values-zh-rHans");
    }

    #[test]
    fn test_normalization() {
        // 语言小写、两位地区大写
        assert_eq!(LocaleTarget::new("PT-br").code(), "pt-BR");
        // 文字子标签保持原样
        assert_eq!(LocaleTarget::new("zh-Hant").code(), "zh-Hant");
    }

    #[test]
    fn test_dir_roundtrip_for_all_default_locales() {
        let locales = [
            "de", "en", "es", "fr", "ja", "ko", "pt-BR", "ru", "tr", "vi", "zh-Hans", "zh-Hant",
        ];
        for code in locales {
            let locale = LocaleTarget::new(code);
            let dir = locale.values_dir_name();
            let back = locale_from_values_dir(&dir);
            assert_eq!(back, Some(locale), "roundtrip failed for {}", code);
        }
    }

    #[test]
    fn test_source_dir_is_not_a_locale() {
        assert_eq!(locale_from_values_dir("values"), None);
        assert_eq!(locale_from_values_dir("values-"), None);
        assert_eq!(locale_from_values_dir("drawable"), None);
    }

    #[test]
    fn test_locale_from_values_dir() {
        assert_eq!(
            locale_from_values_dir("values-pt-rBR"),
            Some(LocaleTarget::new("pt-BR"))
        );
        assert_eq!(
            locale_from_values_dir("values-fr"),
            Some(LocaleTarget::new("fr"))
        );
    }

    #[test]
    fn test_display_name_known_and_fallback() {
        assert_eq!(LocaleTarget::new("de").display_name(), "Deutsch");
        assert_eq!(LocaleTarget::new("pt-BR").display_name(), "Português (Brasil)");
        // 未收录语言回退为大写代码
        assert_eq!(LocaleTarget::new("xx").display_name(), "XX");
        // 未收录的地区变体回退到语言名称
        assert_eq!(LocaleTarget::new("de-AT").display_name(), "Deutsch");
    }
}
