pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod upload;
pub mod validate;

pub use extractor::SafeId;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;

/// 空白字符串视为未填写
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 可清除字段：未提供为 `None`，空字符串为 `Some(None)`
pub fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| non_blank(Some(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearable() {
        assert_eq!(clearable(None), None);
        assert_eq!(clearable(Some("".into())), Some(None));
        assert_eq!(clearable(Some("  ".into())), Some(None));
        assert_eq!(clearable(Some("g1".into())), Some(Some("g1".into())));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" abc ".into())), Some("abc".into()));
    }
}
