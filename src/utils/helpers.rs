//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Generate a random alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Generate a display code with a fixed prefix, e.g. `ORD-7K2F9QXZ`
pub fn generate_display_code(prefix: &str) -> String {
    format!("{}-{}", prefix, generate_random_string(8))
}

/// Format an MMK amount for notifications, e.g. `12,500 MMK`
pub fn format_amount(amount: i64, currency: &str) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{} {}", grouped, currency)
    } else {
        format!("{} {}", grouped, currency)
    }
}

/// Escape HTML special characters for Telegram HTML parse mode
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_code_shape() {
        let code = generate_display_code("ORD");
        assert!(code.starts_with("ORD-"));
        assert_eq!(code.len(), "ORD-".len() + 8);
        assert!(code[4..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0, "MMK"), "0 MMK");
        assert_eq!(format_amount(950, "MMK"), "950 MMK");
        assert_eq!(format_amount(12500, "MMK"), "12,500 MMK");
        assert_eq!(format_amount(1234567, "MMK"), "1,234,567 MMK");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>1 & 2</b>"), "&lt;b&gt;1 &amp; 2&lt;/b&gt;");
    }
}
