//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Collapse a multi-line model reply into a single-line preview for logs.
pub fn preview(s: &str, max_len: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&flat, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'の' is 3 bytes; max_len=7 -> target=4 -> back to boundary at 3
        assert_eq!(truncate("あのね", 7), "あ...");
        assert_eq!(truncate("あのね", 9), "あのね");
    }

    #[test]
    fn test_truncate_emoji() {
        // Emojis are 4 bytes each: max_len=10 -> target=7 -> boundary at 4
        assert_eq!(truncate("👋🌍🎉", 10), "👋...");
    }

    #[test]
    fn test_preview_flattens_whitespace() {
        assert_eq!(preview("line one\n\n  line two", 100), "line one line two");
        assert_eq!(preview("a b c d e f", 8), "a b c...");
    }
}
