/// Country prefix that triggers Swedish grouping
const SWEDISH_PREFIX: &str = "+46";

/// Digit group sizes after the prefix: `+46 70 123 45 67`
const PHONE_GROUPS: [usize; 4] = [2, 3, 2, 2];

/// Format a phone number for display.
///
/// Swedish numbers (`+46...`) are regrouped as `+46 70 123 45 67`. Anything
/// else is returned trimmed but otherwise unchanged.
pub fn format_phone(phone: &str) -> String {
    let phone = phone.trim();
    let Some(rest) = phone.strip_prefix(SWEDISH_PREFIX) else {
        return phone.to_string();
    };

    let digits: Vec<char> = rest.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut parts = vec![SWEDISH_PREFIX.to_string()];
    let mut start = 0;
    for size in PHONE_GROUPS {
        let end = (start + size).min(digits.len());
        if start < end {
            parts.push(digits[start..end].iter().collect());
        }
        start = end;
    }
    parts.join(" ")
}

/// Escape text for interpolation into HTML element content or attributes
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone_swedish() {
        assert_eq!(format_phone("+46701234567"), "+46 70 123 45 67");
        assert_eq!(format_phone("+46 70-123 45 67"), "+46 70 123 45 67");
        assert_eq!(format_phone("  +46701234567 "), "+46 70 123 45 67");
    }

    #[test]
    fn test_format_phone_short_number() {
        assert_eq!(format_phone("+4670"), "+46 70");
        assert_eq!(format_phone("+467012"), "+46 70 12");
        assert_eq!(format_phone("+46"), "+46");
    }

    #[test]
    fn test_format_phone_drops_extra_digits() {
        assert_eq!(format_phone("+4670123456789"), "+46 70 123 45 67");
    }

    #[test]
    fn test_format_phone_other_numbers_unchanged() {
        assert_eq!(format_phone("070-123 45 67"), "070-123 45 67");
        assert_eq!(format_phone("+4520123456"), "+4520123456");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Åsa" & 'Per'</b>"#),
            "&lt;b&gt;&quot;Åsa&quot; &amp; &#039;Per&#039;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Plats 4"), "Plats 4");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Öresund", 5), "Ör...");
    }
}
