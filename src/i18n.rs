// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持阿拉伯语（默认）、英文、中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 3] = ["ar", "en", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言；不支持的语言代码回退到 "ar"
///
/// # 参数
/// - locale: 语言代码（"ar"、"en" 或 "zh-CN"）
pub fn set_locale(locale: &str) {
    if SUPPORTED_LOCALES.contains(&locale) {
        rust_i18n::set_locale(locale);
    } else {
        tracing::warn!(locale, "不支持的语言，回退到 ar");
        rust_i18n::set_locale("ar");
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use hotel_backoffice::i18n::t;
/// let msg = t("import.unsupported_format");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use hotel_backoffice::i18n::t_with_args;
/// let msg = t_with_args("import.success", &[("count", "12")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，测试并行执行时需串行化
    pub(crate) static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");

        set_locale("ar");
        assert_eq!(current_locale(), "ar");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_arabic() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("fr");
        assert_eq!(current_locale(), "ar");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        set_locale("ar");
        let msg = t_with_args("import.success", &[("count", "7")]);
        assert!(msg.contains('7'));
        assert!(msg.contains("تم استيراد"));

        set_locale("en");
        let msg = t_with_args("import.success", &[("count", "7")]);
        assert_eq!(msg, "Imported 7 reservations successfully");

        set_locale("zh-CN");
        let msg = t_with_args("import.success", &[("count", "7")]);
        assert!(msg.contains("7"));
        assert!(msg.contains("导入"));

        set_locale("ar");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("en");
        assert_eq!(t("import.unsupported_format"), "Unsupported file format");
        set_locale("ar");
    }
}
