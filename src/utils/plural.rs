//! Count formatting for log messages.

/// Format count with noun, adding an `s` unless the count is one.
///
/// - `plural_count(0, "output")` -> `"0 outputs"`
/// - `plural_count(1, "output")` -> `"1 output"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "header"), "0 headers");
        assert_eq!(plural_count(1, "header"), "1 header");
        assert_eq!(plural_count(7, "output"), "7 outputs");
    }
}
